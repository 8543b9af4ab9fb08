//! Session states, record families, and store backends.
//!
//! All enums use `snake_case` serialization. `SessionState` exposes
//! `allowed_next_states()` so the session manager can reject invalid moves.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Lifecycle of one portal connection within a command execution.
///
/// ```text
/// disconnected → connecting → connected → disconnected
///                           → failed
/// ```
///
/// `failed` is terminal: the caller issues a new operation with a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

impl SessionState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Disconnected => &[Self::Connecting],
            Self::Connecting => &[Self::Connected, Self::Failed],
            Self::Connected => &[Self::Disconnected],
            Self::Failed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecordFamily
// ---------------------------------------------------------------------------

/// One independently fetched group of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordFamily {
    Student,
    Homework,
    Grades,
    SubjectAverages,
    Lessons,
    Menus,
    Discussions,
    Attendance,
}

impl RecordFamily {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Homework => "homework",
            Self::Grades => "grades",
            Self::SubjectAverages => "subject_averages",
            Self::Lessons => "lessons",
            Self::Menus => "menus",
            Self::Discussions => "discussions",
            Self::Attendance => "attendance",
        }
    }
}

impl fmt::Display for RecordFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BackendKind
// ---------------------------------------------------------------------------

/// Which persistence backend the process selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Database,
    File,
}

impl BackendKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::File => "file",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
