use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity block of the connected student.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentInfo {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "etablissement")]
    pub establishment: String,
    #[serde(rename = "classe")]
    pub class_name: String,
    #[serde(rename = "periode_actuelle")]
    pub current_period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Homework {
    #[serde(rename = "matiere")]
    pub subject: String,
    pub description: String,
    /// `YYYY-MM-DD`, empty when the portal gave no due date.
    #[serde(rename = "date_rendu")]
    pub due_date: String,
    #[serde(rename = "fait")]
    pub done: bool,
    #[serde(rename = "fichiers")]
    pub files: Vec<String>,
}

/// One grade of the active grading period. Grade values stay strings because
/// the portal reports marks such as `"Abs"` or `"15,5"`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Grade {
    #[serde(rename = "matiere")]
    pub subject: String,
    #[serde(rename = "note")]
    pub value: String,
    #[serde(rename = "bareme")]
    pub out_of: String,
    pub coefficient: f64,
    #[serde(rename = "moyenne_classe")]
    pub class_average: String,
    #[serde(rename = "note_min")]
    pub min: String,
    #[serde(rename = "note_max")]
    pub max: String,
    #[serde(rename = "commentaire")]
    pub comment: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SubjectAverage {
    #[serde(rename = "matiere")]
    pub subject: String,
    #[serde(rename = "moyenne_eleve")]
    pub student: String,
    #[serde(rename = "moyenne_classe")]
    pub class_average: String,
    #[serde(rename = "moyenne_min")]
    pub min: String,
    #[serde(rename = "moyenne_max")]
    pub max: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Lesson {
    pub id: String,
    #[serde(rename = "matiere")]
    pub subject: String,
    #[serde(rename = "professeur")]
    pub teacher: String,
    #[serde(rename = "salle")]
    pub classroom: String,
    #[serde(rename = "debut")]
    pub start: String,
    #[serde(rename = "fin")]
    pub end: String,
    #[serde(rename = "annule")]
    pub canceled: bool,
    #[serde(rename = "modifie")]
    pub modified: bool,
    #[serde(rename = "contenu")]
    pub content: String,
}

/// Cafeteria menu for one meal. Each course is an independent list of dish names.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Menu {
    pub date: String,
    #[serde(rename = "repas")]
    pub meal: String,
    #[serde(rename = "entrees")]
    pub starters: Vec<String>,
    #[serde(rename = "plats")]
    pub mains: Vec<String>,
    #[serde(rename = "accompagnements")]
    pub sides: Vec<String>,
    pub desserts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Discussion {
    pub id: String,
    #[serde(rename = "sujet")]
    pub subject: String,
    #[serde(rename = "auteur")]
    pub author: String,
    pub date: String,
    #[serde(rename = "lu")]
    pub read: bool,
    pub messages_count: u32,
    #[serde(rename = "dernier_message")]
    pub last_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Absence {
    #[serde(rename = "date_debut")]
    pub from: String,
    #[serde(rename = "date_fin")]
    pub to: String,
    #[serde(rename = "justifie")]
    pub justified: bool,
    #[serde(rename = "motif")]
    pub reason: String,
    /// Missed time in hours (`"5h30"` upstream becomes `5.5`).
    #[serde(rename = "heures")]
    pub hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Tardy {
    pub date: String,
    #[serde(rename = "justifie")]
    pub justified: bool,
    #[serde(rename = "motif")]
    pub reason: String,
    pub minutes: i64,
}
