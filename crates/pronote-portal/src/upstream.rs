//! Upstream record shapes as the portal client hands them over.
//!
//! Every field is optional: the portal omits whatever it does not know, and
//! the normalizer decides defaults. Dates stay as the portal's ISO strings
//! (`2026-10-20` or `2026-10-20T08:00:00`) and are parsed during
//! normalization, where a malformed value only costs its own family.

use serde::{Deserialize, Serialize};

/// A value the portal reports either as a number or as text
/// (`15.5`, `"15,5"`, `"Abs"`, `"5h30"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpstreamValue {
    Number(f64),
    Text(String),
}

impl UpstreamValue {
    /// Display form. Whole numbers print without a fractional part.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{n:.0}"),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Numeric form. Text is trimmed and a decimal comma is accepted.
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().replace(',', ".").parse().ok(),
        }
    }

    /// Empty text and zero count as "not reported".
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0.0,
            Self::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<f64> for UpstreamValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for UpstreamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Lesson content: either an object carrying a description or bare text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LessonContent {
    Structured {
        #[serde(default)]
        description: Option<String>,
    },
    Text(String),
}

impl LessonContent {
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Structured { description } => description.as_deref().unwrap_or_default(),
            Self::Text(text) => text,
        }
    }
}

/// Anything the portal identifies only by a display name
/// (attached files, menu dishes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamNamed {
    pub name: Option<String>,
}

impl UpstreamNamed {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamStudent {
    pub name: Option<String>,
    pub establishment: Option<String>,
    pub class_name: Option<String>,
}

/// A grading period with the records scoped to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamPeriod {
    pub name: Option<String>,
    pub grades: Option<Vec<UpstreamGrade>>,
    pub averages: Option<Vec<UpstreamAverage>>,
    pub absences: Option<Vec<UpstreamAbsence>>,
    pub delays: Option<Vec<UpstreamDelay>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamGrade {
    pub subject: Option<String>,
    pub grade: Option<UpstreamValue>,
    pub out_of: Option<UpstreamValue>,
    pub coefficient: Option<UpstreamValue>,
    pub average: Option<UpstreamValue>,
    pub min: Option<UpstreamValue>,
    pub max: Option<UpstreamValue>,
    pub comment: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamAverage {
    pub subject: Option<String>,
    pub student: Option<UpstreamValue>,
    pub class_average: Option<UpstreamValue>,
    pub min: Option<UpstreamValue>,
    pub max: Option<UpstreamValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamHomework {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub done: Option<bool>,
    pub files: Option<Vec<UpstreamNamed>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamLesson {
    pub id: Option<String>,
    pub subject: Option<String>,
    pub teacher_name: Option<String>,
    pub classroom: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub canceled: Option<bool>,
    /// Free-text status such as `"Cours modifié"`; any non-empty status marks
    /// the lesson as modified.
    pub status: Option<String>,
    pub content: Option<LessonContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamMenu {
    pub date: Option<String>,
    pub name: Option<String>,
    pub first_meal: Option<Vec<UpstreamNamed>>,
    pub main_meal: Option<Vec<UpstreamNamed>>,
    pub side_meal: Option<Vec<UpstreamNamed>>,
    pub dessert: Option<Vec<UpstreamNamed>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamMessage {
    pub author: Option<String>,
    pub date: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamDiscussion {
    pub id: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub date: Option<String>,
    pub unread: Option<bool>,
    pub messages: Option<Vec<UpstreamMessage>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamAbsence {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub justified: Option<bool>,
    pub reasons: Option<Vec<String>>,
    pub hours: Option<UpstreamValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamDelay {
    pub date: Option<String>,
    pub justified: Option<bool>,
    pub reasons: Option<Vec<String>>,
    pub minutes: Option<UpstreamValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn value_accepts_number_or_text() {
        let values: Vec<UpstreamValue> = serde_json::from_str(r#"[15.5, "15,5", "Abs"]"#).unwrap();
        assert_eq!(values[0], UpstreamValue::Number(15.5));
        assert_eq!(values[1].to_number(), Some(15.5));
        assert_eq!(values[2].to_number(), None);
        assert_eq!(values[2].to_text(), "Abs");
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(UpstreamValue::Number(20.0).to_text(), "20");
        assert_eq!(UpstreamValue::Number(12.25).to_text(), "12.25");
    }

    #[test]
    fn blank_values() {
        assert!(UpstreamValue::Number(0.0).is_blank());
        assert!(UpstreamValue::from("  ").is_blank());
        assert!(!UpstreamValue::from("2").is_blank());
    }

    #[test]
    fn lesson_content_shapes() {
        let structured: LessonContent =
            serde_json::from_str(r#"{"description": "Chapitre 3", "title": "x"}"#).unwrap();
        assert_eq!(structured.description(), "Chapitre 3");

        let empty: LessonContent = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.description(), "");

        let text: LessonContent = serde_json::from_str(r#""Revisions""#).unwrap();
        assert_eq!(text.description(), "Revisions");
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let lesson: UpstreamLesson = serde_json::from_str(r#"{"subject": "SVT"}"#).unwrap();
        assert_eq!(lesson.subject.as_deref(), Some("SVT"));
        assert!(lesson.start.is_none());
        assert!(lesson.content.is_none());

        let period: UpstreamPeriod = serde_json::from_str(r#"{"name": "Trimestre 1"}"#).unwrap();
        assert!(period.grades.is_none());
    }
}
