//! # pronote-core
//!
//! Core types shared across the Pronote bridge crates.
//!
//! - Normalized record shapes for every academic record family
//! - The credential record and the cached snapshot
//! - Session state machine and record family enums
//! - Calendar date windows used by the windowed families
//! - CLI response types printed as JSON by the `pronote` binary

pub mod entities;
pub mod enums;
pub mod responses;
pub mod window;

pub use entities::{CachedSnapshot, CredentialRecord};
pub use enums::{BackendKind, RecordFamily, SessionState};
pub use window::DateWindow;

/// JSON Schema of the snapshot document written by `data` and read by `cached`.
#[must_use]
pub fn snapshot_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(CachedSnapshot)).unwrap_or_default()
}
