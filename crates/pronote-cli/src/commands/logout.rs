use std::process::ExitCode;

use pronote_auth::Session;
use pronote_core::responses::LogoutResponse;

use super::Manager;
use crate::cli::GlobalFlags;
use crate::output::output;

/// `pronote logout`. A store failure is reported as `success: false` and
/// exits 1.
pub async fn handle(manager: &Manager<'_>, flags: &GlobalFlags) -> anyhow::Result<ExitCode> {
    let mut session = Session::new();
    let (response, code) = match manager.logout(&mut session).await {
        Ok(()) => (
            LogoutResponse {
                success: true,
                error: None,
            },
            ExitCode::SUCCESS,
        ),
        Err(error) => {
            tracing::error!(%error, "logout failed");
            (
                LogoutResponse {
                    success: false,
                    error: Some(error.to_string()),
                },
                ExitCode::FAILURE,
            )
        }
    };
    output(&response, flags.format)?;
    Ok(code)
}
