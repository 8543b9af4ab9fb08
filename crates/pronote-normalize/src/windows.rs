//! Default fetch windows and per-run fetch options.

use chrono::NaiveDate;
use pronote_config::SyncConfig;
use pronote_core::DateWindow;

pub const HOMEWORK_DAYS_BEFORE: u32 = 7;
pub const HOMEWORK_DAYS_AFTER: u32 = 30;
pub const LESSON_DAYS_AFTER: u32 = 7;
pub const MENU_DAYS_AFTER: u32 = 14;

/// Today's calendar date on the local clock.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[must_use]
pub fn default_homework_window(today: NaiveDate) -> DateWindow {
    DateWindow::around(today, HOMEWORK_DAYS_BEFORE, HOMEWORK_DAYS_AFTER)
}

#[must_use]
pub fn default_lesson_window(today: NaiveDate) -> DateWindow {
    DateWindow::ahead(today, LESSON_DAYS_AFTER)
}

#[must_use]
pub fn default_menu_window(today: NaiveDate) -> DateWindow {
    DateWindow::ahead(today, MENU_DAYS_AFTER)
}

/// Windows and filters for one full snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub homework: DateWindow,
    pub lessons: DateWindow,
    pub menus: DateWindow,
    pub only_unread: bool,
}

impl FetchOptions {
    /// The built-in windows around `today`.
    #[must_use]
    pub fn defaults(today: NaiveDate) -> Self {
        Self {
            homework: default_homework_window(today),
            lessons: default_lesson_window(today),
            menus: default_menu_window(today),
            only_unread: false,
        }
    }

    /// Windows from the `[sync]` configuration section.
    #[must_use]
    pub fn from_config(sync: &SyncConfig, today: NaiveDate) -> Self {
        Self {
            homework: DateWindow::around(today, sync.homework_days_before, sync.homework_days_after),
            lessons: DateWindow::ahead(today, sync.lesson_days_after),
            menus: DateWindow::ahead(today, sync.menu_days_after),
            only_unread: sync.unread_discussions_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_builtin_windows() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            FetchOptions::from_config(&SyncConfig::default(), today),
            FetchOptions::defaults(today)
        );
    }

    #[test]
    fn homework_window_spans_a_week_back_and_a_month_ahead() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let window = default_homework_window(today);
        assert_eq!(window.from, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!(window.to, NaiveDate::from_ymd_opt(2026, 11, 18).unwrap());
    }
}
