use std::process::ExitCode;

use pronote_auth::{CredentialCheck, Session, SessionError};
use pronote_core::responses::{ConnectResponse, StatusResponse};

use super::Manager;
use crate::cli::GlobalFlags;
use crate::output::output;

/// `pronote status`: offline check of the stored credentials.
pub async fn handle(manager: &Manager<'_>, flags: &GlobalFlags) -> anyhow::Result<ExitCode> {
    let response = match manager.check_credentials_exist().await? {
        CredentialCheck::Present => StatusResponse::present(),
        CredentialCheck::Missing(reason) => StatusResponse::absent(reason),
    };
    output(&response, flags.format)?;
    Ok(ExitCode::SUCCESS)
}

/// `pronote status-full`: reconnect with the saved token.
pub async fn handle_full(manager: &Manager<'_>, flags: &GlobalFlags) -> anyhow::Result<ExitCode> {
    let mut session = Session::new();
    let response = connect_response(manager.reconnect_with_token(&mut session).await)?;
    output(&response, flags.format)?;
    Ok(ExitCode::SUCCESS)
}

/// Map a login outcome to its response document. Fatal errors propagate.
pub fn connect_response(
    result: Result<pronote_core::entities::StudentInfo, SessionError>,
) -> anyhow::Result<ConnectResponse> {
    match result {
        Ok(student) => Ok(ConnectResponse::connected(student)),
        Err(error) if error.is_fatal() => Err(error.into()),
        Err(error) if error.is_token_expired() => Ok(ConnectResponse::token_expired(error.to_string())),
        Err(error) => {
            tracing::info!(%error, "not connected");
            Ok(ConnectResponse::failed(error.to_string()))
        }
    }
}
