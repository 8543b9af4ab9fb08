//! Entity structs for the persisted and exported Pronote state.
//!
//! Field names are English in Rust; serde renames carry the JSON keys that the
//! dashboard already reads (`matiere`, `date_rendu`, ...). All record structs
//! derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod credential;
mod records;
mod snapshot;

pub use credential::CredentialRecord;
pub use records::{
    Absence, Discussion, Grade, Homework, Lesson, Menu, StudentInfo, SubjectAverage, Tardy,
};
pub use snapshot::CachedSnapshot;
