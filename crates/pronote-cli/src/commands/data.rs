use std::process::ExitCode;

use pronote_auth::Session;
use pronote_core::responses::DataErrorResponse;

use super::Manager;
use super::status::connect_response;
use crate::cli::GlobalFlags;
use crate::output::output;

/// `pronote data`: reconnect, export every family, print the snapshot.
pub async fn handle(manager: &Manager<'_>, flags: &GlobalFlags) -> anyhow::Result<ExitCode> {
    let mut session = Session::new();
    let result = manager.reconnect_with_token(&mut session).await;
    let details = connect_response(result)?;

    let Some(handle) = session.handle_mut().filter(|_| details.connected) else {
        output(
            &DataErrorResponse {
                error: "not connected".into(),
                details,
            },
            flags.format,
        )?;
        return Ok(ExitCode::FAILURE);
    };

    let snapshot =
        pronote_normalize::export_snapshot(handle, manager.store(), manager.fetch_options())
            .await?;
    output(&snapshot, flags.format)?;
    Ok(ExitCode::SUCCESS)
}
