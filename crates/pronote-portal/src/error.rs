//! Portal boundary errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a portal collaborator.
///
/// The kind is decided where the failure happens (the helper process or the
/// in-memory portal). Callers branch on the variant, never on the message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// The saved token was refused or the portal answered with an
    /// unexpected page during token login.
    #[error("token rejected: {0}")]
    TokenRejected(String),

    /// Wrong PIN or any other portal-side refusal of a login.
    #[error("login rejected: {0}")]
    LoginRejected(String),

    /// The login payload was structurally unusable.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Transport or protocol failure talking to the helper process.
    #[error("bridge error: {0}")]
    Bridge(String),

    #[error("portal error: {0}")]
    Upstream(String),
}

/// Error kinds as they travel over the bridge protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalErrorKind {
    TokenRejected,
    LoginRejected,
    InvalidPayload,
    Bridge,
    #[serde(other)]
    Upstream,
}

impl PortalError {
    #[must_use]
    pub const fn kind(&self) -> PortalErrorKind {
        match self {
            Self::TokenRejected(_) => PortalErrorKind::TokenRejected,
            Self::LoginRejected(_) => PortalErrorKind::LoginRejected,
            Self::InvalidPayload(_) => PortalErrorKind::InvalidPayload,
            Self::Bridge(_) => PortalErrorKind::Bridge,
            Self::Upstream(_) => PortalErrorKind::Upstream,
        }
    }

    #[must_use]
    pub fn from_kind(kind: PortalErrorKind, message: String) -> Self {
        match kind {
            PortalErrorKind::TokenRejected => Self::TokenRejected(message),
            PortalErrorKind::LoginRejected => Self::LoginRejected(message),
            PortalErrorKind::InvalidPayload => Self::InvalidPayload(message),
            PortalErrorKind::Bridge => Self::Bridge(message),
            PortalErrorKind::Upstream => Self::Upstream(message),
        }
    }

    /// The message without the kind prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::TokenRejected(m)
            | Self::LoginRejected(m)
            | Self::InvalidPayload(m)
            | Self::Bridge(m)
            | Self::Upstream(m) => m,
        }
    }
}
