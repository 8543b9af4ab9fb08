//! # pronote-portal
//!
//! The boundary between the bridge and the school portal client.
//!
//! - [`Portal`] performs logins and yields a [`PortalSession`]
//! - [`PortalSession`] exposes the authenticated accessors, returning the
//!   optional-field shapes from [`upstream`]
//! - [`BridgePortal`] drives an external helper program over line-delimited
//!   JSON on its stdin/stdout
//! - [`MemoryPortal`] serves scripted data, for tests and offline runs
//!
//! Failures carry an explicit [`PortalError`] kind, decided by the
//! collaborator itself.

pub mod bridge;
pub mod error;
pub mod memory;
pub mod upstream;

pub use bridge::{BridgePortal, BridgeSession};
pub use error::{PortalError, PortalErrorKind};
pub use memory::{FixtureError, MemoryPortal, MemorySession, PortalCall, PortalFixture};

use pronote_core::DateWindow;
use serde::{Deserialize, Serialize};

use crate::upstream::{
    UpstreamDiscussion, UpstreamHomework, UpstreamLesson, UpstreamMenu, UpstreamPeriod,
    UpstreamStudent,
};

/// Token login against a previously paired account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLogin {
    pub url: String,
    pub username: String,
    pub password: String,
    #[serde(rename = "uuid")]
    pub device_uuid: String,
}

impl std::fmt::Debug for TokenLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLogin")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password_len", &self.password.len())
            .field("device_uuid", &self.device_uuid)
            .finish()
    }
}

/// First login from a scanned QR payload and its PIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrLogin {
    pub payload: serde_json::Value,
    pub pin: String,
    #[serde(rename = "uuid")]
    pub device_uuid: String,
}

/// What the portal reports right after a login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginOutcome {
    pub logged_in: bool,
    pub username: String,
    pub password: String,
    /// The portal's own URL for this session, with its scoping query
    /// parameters, when it reports one.
    pub url: Option<String>,
}

/// An authenticated connection to the portal.
///
/// Accessors take `&mut self`: a session serves one request at a time.
#[allow(async_fn_in_trait)]
pub trait PortalSession {
    fn logged_in(&self) -> bool;

    /// Rotated username issued by the last login.
    fn username(&self) -> &str;

    /// Rotated token issued by the last login.
    fn password(&self) -> &str;

    fn portal_url(&self) -> Option<&str>;

    async fn student(&mut self) -> Result<UpstreamStudent, PortalError>;

    /// Name of the active grading period, if the portal reports one.
    async fn current_period(&mut self) -> Result<Option<String>, PortalError>;

    async fn periods(&mut self) -> Result<Vec<UpstreamPeriod>, PortalError>;

    async fn homework(&mut self, window: DateWindow) -> Result<Vec<UpstreamHomework>, PortalError>;

    async fn lessons(&mut self, window: DateWindow) -> Result<Vec<UpstreamLesson>, PortalError>;

    async fn menus(&mut self, window: DateWindow) -> Result<Vec<UpstreamMenu>, PortalError>;

    async fn discussions(
        &mut self,
        only_unread: bool,
    ) -> Result<Vec<UpstreamDiscussion>, PortalError>;
}

/// Login entry points of the portal client.
#[allow(async_fn_in_trait)]
pub trait Portal {
    type Session: PortalSession;

    async fn token_login(&self, request: &TokenLogin) -> Result<Self::Session, PortalError>;

    async fn qr_login(&self, request: &QrLogin) -> Result<Self::Session, PortalError>;
}
