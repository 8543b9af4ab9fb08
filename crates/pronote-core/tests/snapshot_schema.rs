//! Snapshot serde roundtrip and JSON Schema validation.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use pronote_core::entities::*;
use pronote_core::snapshot_schema;

fn validate_against_schema(instance: &serde_json::Value) -> Vec<String> {
    let schema = snapshot_schema();
    let validator = jsonschema::validator_for(&schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn sample_snapshot() -> CachedSnapshot {
    let mut snapshot = CachedSnapshot::empty(
        Utc.with_ymd_and_hms(2026, 10, 19, 7, 30, 0).unwrap(),
        StudentInfo {
            name: "DUPONT Lea".into(),
            establishment: "College Victor Hugo".into(),
            class_name: "4B".into(),
            current_period: "Trimestre 1".into(),
        },
    );
    snapshot.homework.push(Homework {
        subject: "FRANCAIS".into(),
        description: "Lire le chapitre 3".into(),
        due_date: "2026-10-21".into(),
        done: false,
        files: vec![],
    });
    snapshot.grades.push(Grade {
        subject: "MATHEMATIQUES".into(),
        value: "15,5".into(),
        out_of: "20".into(),
        coefficient: 2.0,
        class_average: "12,1".into(),
        min: "6".into(),
        max: "19".into(),
        comment: "Controle".into(),
        date: "2026-10-10".into(),
    });
    snapshot.absences.push(Absence {
        from: "2026-10-01T08:00:00".into(),
        to: "2026-10-01T13:30:00".into(),
        justified: true,
        reason: "Maladie".into(),
        hours: 5.5,
    });
    snapshot
}

#[test]
fn snapshot_validates_against_generated_schema() {
    let instance = serde_json::to_value(sample_snapshot()).unwrap();
    let errors = validate_against_schema(&instance);
    assert!(errors.is_empty(), "schema validation failed: {errors:?}");
}

#[test]
fn snapshot_roundtrip_keeps_empty_families() {
    let snapshot = sample_snapshot();
    let json = serde_json::to_string_pretty(&snapshot).unwrap();
    let recovered: CachedSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, snapshot);
    assert!(recovered.menus.is_empty());
    assert!(recovered.tardies.is_empty());
}

#[test]
fn snapshot_top_level_keys() {
    let value = serde_json::to_value(sample_snapshot()).unwrap();
    let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "absences",
            "devoirs",
            "discussions",
            "eleve",
            "export_date",
            "lessons",
            "menus",
            "moyennes",
            "notes",
            "retards",
        ]
    );
}

#[test]
fn snapshot_missing_optional_families_default_to_empty() {
    let json = r#"{
        "export_date": "2026-10-19T07:30:00Z",
        "eleve": {"nom": "", "etablissement": "", "classe": "", "periode_actuelle": ""},
        "devoirs": [],
        "notes": [],
        "moyennes": []
    }"#;
    let snapshot: CachedSnapshot = serde_json::from_str(json).unwrap();
    assert_eq!(snapshot.record_count(), 0);
}
