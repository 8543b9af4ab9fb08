//! CLI response types returned as JSON by `pronote` commands.
//!
//! Optional fields are omitted when unset so each document carries only the
//! keys its outcome defines (`{"connected": false, "error": "..."}`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::StudentInfo;

/// Response from `pronote status` (no network).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusResponse {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_exist: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    #[must_use]
    pub const fn present() -> Self {
        Self {
            connected: true,
            credentials_exist: Some(true),
            error: None,
        }
    }

    #[must_use]
    pub fn absent(error: impl Into<String>) -> Self {
        Self {
            connected: false,
            credentials_exist: None,
            error: Some(error.into()),
        }
    }
}

/// Response from `pronote status-full`, `connect-qr`, and `connect-qr-file`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConnectResponse {
    pub connected: bool,
    #[serde(rename = "eleve", skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expired: Option<bool>,
}

impl ConnectResponse {
    #[must_use]
    pub const fn connected(student: StudentInfo) -> Self {
        Self {
            connected: true,
            student: Some(student),
            error: None,
            token_expired: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            connected: false,
            student: None,
            error: Some(error.into()),
            token_expired: None,
        }
    }

    #[must_use]
    pub fn token_expired(error: impl Into<String>) -> Self {
        Self {
            token_expired: Some(true),
            ..Self::failed(error)
        }
    }
}

/// Response from `pronote logout`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LogoutResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error document for `pronote data` when reconnection fails.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DataErrorResponse {
    pub error: String,
    pub details: ConnectResponse,
}

/// Generic fatal error document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
