mod cached;
mod connect;
mod data;
mod logout;
pub mod schema;
mod status;

use std::process::ExitCode;

use pronote_auth::SessionManager;
use pronote_store::Store;

use crate::cli::{Commands, GlobalFlags};
use crate::portal::AnyPortal;

pub type Manager<'a> = SessionManager<'a, AnyPortal, Store>;

/// Run one command. Each prints exactly one JSON document.
pub async fn dispatch(
    command: Commands,
    manager: &Manager<'_>,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Status => status::handle(manager, flags).await,
        Commands::StatusFull => status::handle_full(manager, flags).await,
        Commands::ConnectQr { qr_json, pin } => {
            connect::handle(manager, flags, &qr_json, &pin).await
        }
        Commands::ConnectQrFile { path } => connect::handle_file(manager, flags, &path).await,
        Commands::Logout => logout::handle(manager, flags).await,
        Commands::Data => data::handle(manager, flags).await,
        Commands::Cached => cached::handle(manager, flags).await,
        Commands::Schema => schema::handle(flags),
    }
}
