use std::process::ExitCode;

use pronote_core::responses::ErrorResponse;
use pronote_store::StoreBackend;

use super::Manager;
use crate::cli::GlobalFlags;
use crate::output::output;

/// `pronote cached`: the stored snapshot, no network.
pub async fn handle(manager: &Manager<'_>, flags: &GlobalFlags) -> anyhow::Result<ExitCode> {
    match manager.store().snapshot_get().await? {
        Some(snapshot) => {
            output(&snapshot, flags.format)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            output(
                &ErrorResponse {
                    error: "no cached data; run `pronote data` first".into(),
                },
                flags.format,
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}
