//! Record fetch windows and filters.

use serde::{Deserialize, Serialize};

const fn default_homework_days_before() -> u32 {
    7
}

const fn default_homework_days_after() -> u32 {
    30
}

const fn default_lesson_days_after() -> u32 {
    7
}

const fn default_menu_days_after() -> u32 {
    14
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default = "default_homework_days_before")]
    pub homework_days_before: u32,

    #[serde(default = "default_homework_days_after")]
    pub homework_days_after: u32,

    #[serde(default = "default_lesson_days_after")]
    pub lesson_days_after: u32,

    #[serde(default = "default_menu_days_after")]
    pub menu_days_after: u32,

    /// Only export unread discussions.
    #[serde(default)]
    pub unread_discussions_only: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            homework_days_before: default_homework_days_before(),
            homework_days_after: default_homework_days_after(),
            lesson_days_after: default_lesson_days_after(),
            menu_days_after: default_menu_days_after(),
            unread_discussions_only: false,
        }
    }
}
