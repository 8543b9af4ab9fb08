use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::records::{
    Absence, Discussion, Grade, Homework, Lesson, Menu, StudentInfo, SubjectAverage, Tardy,
};

/// Full normalized export of every record family at one point in time.
///
/// Overwritten wholesale on each successful fetch. Families that failed to
/// load are present as empty lists, never missing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CachedSnapshot {
    #[serde(rename = "export_date")]
    pub exported_at: DateTime<Utc>,
    #[serde(rename = "eleve")]
    pub student: StudentInfo,
    #[serde(rename = "devoirs", default)]
    pub homework: Vec<Homework>,
    #[serde(rename = "notes", default)]
    pub grades: Vec<Grade>,
    #[serde(rename = "moyennes", default)]
    pub subject_averages: Vec<SubjectAverage>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub menus: Vec<Menu>,
    #[serde(default)]
    pub discussions: Vec<Discussion>,
    #[serde(default)]
    pub absences: Vec<Absence>,
    #[serde(rename = "retards", default)]
    pub tardies: Vec<Tardy>,
}

impl CachedSnapshot {
    /// An empty snapshot stamped at `exported_at`.
    #[must_use]
    pub fn empty(exported_at: DateTime<Utc>, student: StudentInfo) -> Self {
        Self {
            exported_at,
            student,
            homework: Vec::new(),
            grades: Vec::new(),
            subject_averages: Vec::new(),
            lessons: Vec::new(),
            menus: Vec::new(),
            discussions: Vec::new(),
            absences: Vec::new(),
            tardies: Vec::new(),
        }
    }

    /// Total number of records across all families.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.homework.len()
            + self.grades.len()
            + self.subject_averages.len()
            + self.lessons.len()
            + self.menus.len()
            + self.discussions.len()
            + self.absences.len()
            + self.tardies.len()
    }
}
