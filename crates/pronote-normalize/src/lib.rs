//! # pronote-normalize
//!
//! Maps the portal's partially-populated records into the fixed snapshot
//! shapes.
//!
//! Each family has one async function taking the live [`PortalSession`]
//! (and a date window where the family is windowed). Missing fields become
//! defaults. A family that fails to fetch or map is logged and returned
//! empty; it never affects its siblings. [`export_snapshot`] is the only
//! function with a side effect: it writes the assembled snapshot through
//! the store.
//!
//! [`PortalSession`]: pronote_portal::PortalSession

mod discussions;
mod error;
mod homework;
mod lessons;
mod menus;
mod periods;
mod snapshot;
mod student;
pub mod values;
pub mod windows;

pub use discussions::discussions;
pub use error::NormalizeError;
pub use homework::homework;
pub use lessons::lessons;
pub use menus::menus;
pub use periods::{attendance, grades, subject_averages};
pub use snapshot::{collect_snapshot, export_snapshot};
pub use student::student;
pub use values::parse_hours;
pub use windows::FetchOptions;

use pronote_core::RecordFamily;

/// Contain a family failure: log it and yield an empty list.
fn contain<T>(family: RecordFamily, result: Result<Vec<T>, NormalizeError>) -> Vec<T> {
    result.unwrap_or_else(|error| {
        tracing::warn!(%family, %error, "record family failed; using empty list");
        Vec::new()
    })
}
