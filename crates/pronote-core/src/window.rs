//! Calendar date windows for the windowed record families.
//!
//! Windows compare calendar dates only. Upstream date-times are reduced to
//! their date before comparison, so a lesson at 17:00 on the last day is
//! still inside.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// `days_before` days before `today` through `days_after` days after it.
    #[must_use]
    pub fn around(today: NaiveDate, days_before: u32, days_after: u32) -> Self {
        let from = today
            .checked_sub_days(Days::new(u64::from(days_before)))
            .unwrap_or(NaiveDate::MIN);
        let to = today
            .checked_add_days(Days::new(u64::from(days_after)))
            .unwrap_or(NaiveDate::MAX);
        Self { from, to }
    }

    /// Today through `days_after` days ahead.
    #[must_use]
    pub fn ahead(today: NaiveDate, days_after: u32) -> Self {
        Self::around(today, 0, days_after)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    #[must_use]
    pub fn contains_datetime(&self, at: NaiveDateTime) -> bool {
        self.contains(at.date())
    }
}
