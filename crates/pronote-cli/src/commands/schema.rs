use std::process::ExitCode;

use crate::cli::GlobalFlags;
use crate::output::output;

/// `pronote schema`: JSON Schema of the snapshot document.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<ExitCode> {
    output(&pronote_core::snapshot_schema(), flags.format)?;
    Ok(ExitCode::SUCCESS)
}
