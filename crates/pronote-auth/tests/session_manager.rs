use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use pronote_auth::{CredentialCheck, Session, SessionError, SessionManager};
use pronote_core::{CredentialRecord, SessionState};
use pronote_normalize::FetchOptions;
use pronote_portal::upstream::UpstreamStudent;
use pronote_portal::{MemoryPortal, MemorySession, PortalFixture};
use pronote_store::{DbStore, FileStore, StoreBackend};
use rstest::rstest;

const QR: &str = r#"{"jeton":"A1B2","login":"C3D4","url":"https://demo.index-education.net/pronote/mobile.eleve.html"}"#;

fn options() -> FetchOptions {
    FetchOptions::defaults(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
}

fn saved() -> CredentialRecord {
    CredentialRecord {
        url: "https://demo.index-education.net/pronote/eleve.html?fd=1&bydlg=A6ABB224".into(),
        username: "old-user".into(),
        password: "tok".into(),
        device_uuid: "6f1c1f7e-2d7a-4d53-9b43-0f2f4c3fbb52".into(),
    }
}

fn fixture() -> PortalFixture {
    PortalFixture {
        username: "eleve.demo".into(),
        student: UpstreamStudent {
            name: Some("DUPONT Lea".into()),
            establishment: Some("College Victor Hugo".into()),
            class_name: Some("4B".into()),
        },
        current_period: Some("Trimestre 1".into()),
        ..PortalFixture::default()
    }
}

fn temp_store() -> (tempfile::TempDir, FileStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("pronote"));
    (dir, store)
}

// ── Offline check ──────────────────────────────────────────────────

#[rstest]
#[case::url("url")]
#[case::username("username")]
#[case::password("password")]
#[case::uuid("uuid")]
#[tokio::test]
async fn incomplete_credentials_report_the_missing_field(#[case] field: &str) {
    let (_dir, store) = temp_store();
    let mut record = saved();
    match field {
        "url" => record.url.clear(),
        "username" => record.username.clear(),
        "password" => record.password.clear(),
        _ => record.device_uuid.clear(),
    }
    store.credentials_set(&record).await.unwrap();

    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());
    let check = manager.check_credentials_exist().await.unwrap();

    assert_eq!(check, CredentialCheck::Missing(format!("missing field: {field}")));
    assert_eq!(portal.token_logins() + portal.qr_logins(), 0);
}

#[rstest]
#[case::url("url")]
#[case::username("username")]
#[case::password("password")]
#[case::uuid("uuid")]
#[tokio::test]
async fn null_field_in_credentials_file_is_reported_as_missing(#[case] field: &str) {
    let (_dir, store) = temp_store();
    let mut document = serde_json::to_value(saved()).unwrap();
    document[field] = serde_json::Value::Null;
    std::fs::create_dir_all(store.dir()).unwrap();
    std::fs::write(store.credentials_path(), document.to_string()).unwrap();

    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());
    let check = manager.check_credentials_exist().await.unwrap();

    assert_eq!(check, CredentialCheck::Missing(format!("missing field: {field}")));
    assert_eq!(portal.token_logins() + portal.qr_logins(), 0);
}

#[tokio::test]
async fn check_on_empty_store() {
    let (_dir, store) = temp_store();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());

    assert_eq!(
        manager.check_credentials_exist().await.unwrap(),
        CredentialCheck::Missing("no saved token".into())
    );

    store.credentials_set(&saved()).await.unwrap();
    assert!(manager.check_credentials_exist().await.unwrap().is_present());
    assert_eq!(portal.token_logins(), 0);
}

// ── Token reconnection ─────────────────────────────────────────────

#[tokio::test]
async fn reconnect_rotates_and_persists_the_token() {
    let (_dir, store) = temp_store();
    store.credentials_set(&saved()).await.unwrap();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());

    let mut session: Session<MemorySession> = Session::new();
    let student = manager.reconnect_with_token(&mut session).await.unwrap();
    assert_eq!(student.name, "DUPONT Lea");
    assert_eq!(student.current_period, "Trimestre 1");
    assert_eq!(session.state(), SessionState::Connected);

    let before = saved();
    let after = store.credentials_get().await.unwrap().unwrap();
    assert_ne!(after.username, before.username);
    assert_ne!(after.password, before.password);
    assert_eq!(after.url, before.url);
    assert_eq!(after.device_uuid, before.device_uuid);

    let sent = portal.last_token_login().unwrap();
    assert_eq!(
        sent.url,
        "https://demo.index-education.net/pronote/eleve.html?fd=1&bydlg=A6ABB224&login=true"
    );
}

#[tokio::test]
async fn next_reconnect_presents_the_rotated_token() {
    let (_dir, store) = temp_store();
    store.credentials_set(&saved()).await.unwrap();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());

    manager
        .reconnect_with_token(&mut Session::new())
        .await
        .unwrap();
    manager
        .reconnect_with_token(&mut Session::new())
        .await
        .unwrap();

    assert_eq!(portal.last_token_login().unwrap().password, "tok#1");
    let stored = store.credentials_get().await.unwrap().unwrap();
    assert_eq!(stored.password, "tok#2");
}

#[tokio::test]
async fn rejected_token_is_expired_and_leaves_the_record_alone() {
    let (_dir, store) = temp_store();
    store.credentials_set(&saved()).await.unwrap();
    let portal = MemoryPortal::new(PortalFixture {
        reject_tokens: true,
        ..fixture()
    });
    let manager = SessionManager::new(&portal, &store, options());

    let mut session = Session::new();
    let err = manager.reconnect_with_token(&mut session).await.unwrap_err();
    assert!(err.is_token_expired(), "got {err:?}");
    assert!(!err.is_fatal());
    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(store.credentials_get().await.unwrap(), Some(saved()));
}

#[tokio::test]
async fn reconnect_without_credentials() {
    let (_dir, store) = temp_store();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());

    let mut session = Session::new();
    let err = manager.reconnect_with_token(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::NoCredentials));
    assert_eq!(portal.token_logins(), 0);
    assert!(store.snapshot_get().await.unwrap().is_none());
}

#[tokio::test]
async fn failed_session_cannot_be_reused() {
    let (_dir, store) = temp_store();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());

    let mut session = Session::new();
    let _ = manager.reconnect_with_token(&mut session).await;
    store.credentials_set(&saved()).await.unwrap();

    let err = manager.reconnect_with_token(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidTransition { .. }));
}

#[tokio::test]
async fn reconnect_over_libsql() {
    let store = DbStore::open_local(":memory:").await.unwrap();
    store.credentials_set(&saved()).await.unwrap();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());

    manager
        .reconnect_with_token(&mut Session::new())
        .await
        .unwrap();
    let stored = store.credentials_get().await.unwrap().unwrap();
    assert_eq!(stored.password, "tok#1");
    assert_eq!(store.credential_rows().await.unwrap(), 1);
}

// ── QR pairing ─────────────────────────────────────────────────────

#[tokio::test]
async fn pairing_prefers_the_session_url_and_exports_once() {
    let (_dir, store) = temp_store();
    let portal = MemoryPortal::new(PortalFixture {
        portal_url: Some(
            "https://demo.index-education.net/pronote/eleve.html?fd=1&bydlg=A6ABB224".into(),
        ),
        ..fixture()
    });
    let manager = SessionManager::new(&portal, &store, options());

    let mut session = Session::new();
    let student = manager
        .pair_with_qr_code(&mut session, QR, "1234")
        .await
        .unwrap();
    assert_eq!(student.class_name, "4B");
    assert!(session.is_authenticated());

    let stored = store.credentials_get().await.unwrap().unwrap();
    assert_eq!(
        stored.url,
        "https://demo.index-education.net/pronote/eleve.html?fd=1&bydlg=A6ABB224"
    );
    assert_eq!(stored.username, "eleve.demo");
    assert_eq!(stored.password, "memory-token#1");
    let device = uuid::Uuid::parse_str(&stored.device_uuid).unwrap();
    assert_eq!(device.get_version_num(), 4);

    let snapshot = store.snapshot_get().await.unwrap().unwrap();
    assert_eq!(snapshot.student.name, "DUPONT Lea");
}

#[tokio::test]
async fn pairing_falls_back_to_the_qr_url_and_accepts_encoded_braces() {
    let (_dir, store) = temp_store();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());

    let encoded = QR.replace('{', "%7B").replace('}', "%7D");
    manager
        .pair_with_qr_code(&mut Session::new(), &encoded, "1234")
        .await
        .unwrap();
    let stored = store.credentials_get().await.unwrap().unwrap();
    assert_eq!(
        stored.url,
        "https://demo.index-education.net/pronote/mobile.eleve.html"
    );
}

#[tokio::test]
async fn each_pairing_mints_a_new_device_id() {
    let (_dir, store) = temp_store();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());

    manager
        .pair_with_qr_code(&mut Session::new(), QR, "1234")
        .await
        .unwrap();
    let first = store.credentials_get().await.unwrap().unwrap().device_uuid;
    manager
        .pair_with_qr_code(&mut Session::new(), QR, "1234")
        .await
        .unwrap();
    let second = store.credentials_get().await.unwrap().unwrap().device_uuid;
    assert_ne!(first, second);
}

#[tokio::test]
async fn malformed_qr_json_is_not_a_login_failure() {
    let (_dir, store) = temp_store();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());

    for payload in ["{not json", "[1, 2]"] {
        let err = manager
            .pair_with_qr_code(&mut Session::new(), payload, "1234")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidQrPayload(_)), "{payload}: {err:?}");
    }
    assert_eq!(portal.qr_logins(), 0);
    assert!(store.credentials_get().await.unwrap().is_none());
}

#[tokio::test]
async fn wrong_pin_is_login_rejected() {
    let (_dir, store) = temp_store();
    let portal = MemoryPortal::new(PortalFixture {
        pin: Some("4321".into()),
        ..fixture()
    });
    let manager = SessionManager::new(&portal, &store, options());

    let mut session = Session::new();
    let err = manager
        .pair_with_qr_code(&mut session, QR, "1234")
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::LoginRejected(_)));
    assert_eq!(session.state(), SessionState::Failed);
    assert!(store.credentials_get().await.unwrap().is_none());
}

#[tokio::test]
async fn failed_initial_export_does_not_fail_pairing() {
    let (_dir, store) = temp_store();
    std::fs::create_dir_all(store.snapshot_path()).unwrap();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());

    let student = manager
        .pair_with_qr_code(&mut Session::new(), QR, "1234")
        .await
        .unwrap();
    assert_eq!(student.name, "DUPONT Lea");
    assert!(store.credentials_get().await.unwrap().is_some());
}

// ── Logout ─────────────────────────────────────────────────────────

#[tokio::test]
async fn logout_then_check_reports_not_connected() {
    let (_dir, store) = temp_store();
    store.credentials_set(&saved()).await.unwrap();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());

    let mut session = Session::new();
    manager.reconnect_with_token(&mut session).await.unwrap();
    manager.logout(&mut session).await.unwrap();
    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(!manager.check_credentials_exist().await.unwrap().is_present());

    manager.logout(&mut session).await.unwrap();
    assert!(!manager.check_credentials_exist().await.unwrap().is_present());
}

#[tokio::test]
async fn logout_with_nothing_stored_succeeds() {
    let (_dir, store) = temp_store();
    let portal = MemoryPortal::new(fixture());
    let manager = SessionManager::new(&portal, &store, options());
    manager.logout(&mut Session::new()).await.unwrap();
}
