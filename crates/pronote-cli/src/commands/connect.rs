use std::path::Path;
use std::process::ExitCode;

use pronote_auth::Session;
use pronote_core::responses::ConnectResponse;
use serde::Deserialize;

use super::Manager;
use super::status::connect_response;
use crate::cli::GlobalFlags;
use crate::output::output;

/// Contents of the `connect-qr-file` input.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QrFile {
    qr_json: String,
    pin: String,
}

/// `pronote connect-qr <qr_json> <pin>`.
pub async fn handle(
    manager: &Manager<'_>,
    flags: &GlobalFlags,
    qr_json: &str,
    pin: &str,
) -> anyhow::Result<ExitCode> {
    tracing::debug!(qr_len = qr_json.len(), pin_len = pin.len(), "pairing");
    let mut session = Session::new();
    let result = manager.pair_with_qr_code(&mut session, qr_json, pin).await;
    output(&connect_response(result)?, flags.format)?;
    Ok(ExitCode::SUCCESS)
}

/// `pronote connect-qr-file <path>`: same as `connect-qr`, with the inputs
/// read from a file to avoid shell escaping of the QR JSON.
pub async fn handle_file(
    manager: &Manager<'_>,
    flags: &GlobalFlags,
    path: &Path,
) -> anyhow::Result<ExitCode> {
    let input = match read_qr_file(path) {
        Ok(input) => input,
        Err(error) => {
            tracing::error!(path = %path.display(), %error, "unreadable pairing input");
            output(
                &ConnectResponse::failed(format!("failed to read input file: {error}")),
                flags.format,
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };
    handle(manager, flags, &input.qr_json, &input.pin).await
}

fn read_qr_file(path: &Path) -> anyhow::Result<QrFile> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
