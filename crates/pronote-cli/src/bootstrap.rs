use std::path::Path;

use anyhow::Context;
use pronote_config::{PortalConfig, PronoteConfig};
use pronote_portal::{BridgePortal, MemoryPortal};
use pronote_store::Store;

use crate::portal::AnyPortal;

/// Load `.env`, then the layered configuration.
pub fn load_config() -> anyhow::Result<PronoteConfig> {
    PronoteConfig::load_with_dotenv().context("failed to load configuration")
}

/// Select and open the persistence backend once for this process.
pub async fn open_store(config: &PronoteConfig) -> anyhow::Result<Store> {
    let store = pronote_store::open_store(config)
        .await
        .context("failed to open store")?;
    tracing::debug!(backend = %store.backend_selected(), "store ready");
    Ok(store)
}

/// The configured portal. A fixture wins over a bridge command.
pub fn select_portal(config: &PortalConfig, required: bool) -> anyhow::Result<AnyPortal> {
    if config.has_fixture() {
        let portal = MemoryPortal::from_path(Path::new(&config.fixture_path))
            .context("failed to load portal fixture")?;
        tracing::info!(fixture = %config.fixture_path, "using in-memory portal");
        return Ok(AnyPortal::Memory(portal));
    }
    if config.has_bridge() {
        tracing::debug!(command = %config.bridge_command, "using portal bridge");
        return Ok(AnyPortal::Bridge(BridgePortal::new(
            config.bridge_command.clone(),
            config.bridge_args.clone(),
        )));
    }
    if required {
        anyhow::bail!(
            "no portal configured: set PRONOTE_PORTAL__BRIDGE_COMMAND or PRONOTE_PORTAL__FIXTURE_PATH"
        );
    }
    Ok(AnyPortal::Unconfigured)
}
