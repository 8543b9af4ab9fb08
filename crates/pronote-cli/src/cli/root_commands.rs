use std::path::PathBuf;

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check for saved credentials without contacting the portal
    Status,

    /// Reconnect with the saved token and report the student
    #[command(name = "status-full", alias = "status_full")]
    StatusFull,

    /// Pair with the portal using a scanned QR code and its PIN
    #[command(name = "connect-qr", alias = "connect_qr")]
    ConnectQr {
        /// QR code content (JSON)
        qr_json: String,
        /// 4-digit PIN chosen when generating the QR code
        pin: String,
    },

    /// Pair using a JSON file holding `{"qr_json": ..., "pin": ...}`
    #[command(name = "connect-qr-file", alias = "connect_qr_file")]
    ConnectQrFile {
        /// Path to the input file
        path: PathBuf,
    },

    /// Forget the saved credentials
    Logout,

    /// Reconnect, fetch every record family, store and print the snapshot
    Data,

    /// Print the last stored snapshot without contacting the portal
    Cached,

    /// Print the JSON Schema of the snapshot document
    Schema,
}

impl Commands {
    /// Commands that log in to the portal.
    #[must_use]
    pub const fn needs_portal(&self) -> bool {
        matches!(
            self,
            Self::StatusFull | Self::ConnectQr { .. } | Self::ConnectQrFile { .. } | Self::Data
        )
    }
}
