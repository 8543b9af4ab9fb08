use pronote_core::SessionState;
use pronote_portal::PortalError;
use pronote_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The store holds no complete credential record.
    #[error("no saved token")]
    NoCredentials,

    /// The portal refused the saved token.
    #[error("token expired, pair again with a QR code: {0}")]
    TokenExpired(String),

    #[error("invalid QR code JSON: {0}")]
    InvalidQrPayload(String),

    /// Wrong PIN or another portal-side refusal.
    #[error("login rejected: {0}")]
    LoginRejected(String),

    #[error("invalid session transition: {from} -> {to}")]
    InvalidTransition {
        from: SessionState,
        to: SessionState,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Portal failure with no authentication meaning, reported as-is.
    #[error(transparent)]
    Portal(#[from] PortalError),
}

impl SessionError {
    /// Authentication outcomes are reported as structured results; store
    /// failures abort the command.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Store(_) | Self::InvalidTransition { .. })
    }

    #[must_use]
    pub const fn is_token_expired(&self) -> bool {
        matches!(self, Self::TokenExpired(_))
    }
}
