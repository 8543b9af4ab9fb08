//! # pronote-auth
//!
//! Session manager for the Pronote bridge.
//!
//! Owns the connection lifecycle against one [`Portal`] and one
//! [`StoreBackend`], both injected by the caller:
//!
//! - offline credential check
//! - token reconnection with mandatory persistence of the rotated token
//! - QR pairing with a fresh device id and a best-effort first export
//! - idempotent logout
//!
//! The portal token is single use. Every successful login issues a new one
//! and the old one stops working, so a reconnect that does not persist the
//! rotation leaves the next reconnect with a dead token.
//!
//! [`Portal`]: pronote_portal::Portal
//! [`StoreBackend`]: pronote_store::StoreBackend

pub mod error;
pub mod manager;
pub mod session;
pub mod urls;

pub use error::SessionError;
pub use manager::{CredentialCheck, SessionManager};
pub use session::Session;
