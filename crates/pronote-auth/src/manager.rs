//! Connection lifecycle: credential check, token reconnection, QR pairing, logout.

use pronote_core::entities::StudentInfo;
use pronote_core::CredentialRecord;
use pronote_normalize::FetchOptions;
use pronote_portal::{Portal, PortalError, PortalSession, QrLogin, TokenLogin};
use pronote_store::StoreBackend;
use serde_json::Value;

use crate::error::SessionError;
use crate::session::Session;
use crate::urls::{login_url, normalize_qr_payload};

/// Result of the offline credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialCheck {
    Present,
    /// Why the stored credentials cannot be used.
    Missing(String),
}

impl CredentialCheck {
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }
}

/// Drives one portal and one store. Both are chosen by the caller and
/// injected here; the manager never selects a backend itself.
pub struct SessionManager<'a, P, B> {
    portal: &'a P,
    store: &'a B,
    fetch: FetchOptions,
}

impl<'a, P: Portal, B: StoreBackend> SessionManager<'a, P, B> {
    #[must_use]
    pub const fn new(portal: &'a P, store: &'a B, fetch: FetchOptions) -> Self {
        Self {
            portal,
            store,
            fetch,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &B {
        self.store
    }

    #[must_use]
    pub const fn fetch_options(&self) -> &FetchOptions {
        &self.fetch
    }

    /// Whether a complete credential record is stored. Reads the store only.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the record cannot be read.
    pub async fn check_credentials_exist(&self) -> Result<CredentialCheck, SessionError> {
        let Some(record) = self.store.credentials_get().await? else {
            return Ok(CredentialCheck::Missing(SessionError::NoCredentials.to_string()));
        };
        Ok(match record.missing_field() {
            Some(field) => CredentialCheck::Missing(format!("missing field: {field}")),
            None => CredentialCheck::Present,
        })
    }

    /// Log in with the saved token and persist the rotated one.
    ///
    /// On success the session is `Connected` and the stored record holds the
    /// portal's new username and token with the original URL and device id.
    /// On failure the stored record is untouched.
    ///
    /// # Errors
    ///
    /// `NoCredentials` when nothing complete is stored, `TokenExpired` when
    /// the portal refuses the token, `Store` when the rotation cannot be
    /// written, `Portal` for anything else the portal reports.
    pub async fn reconnect_with_token(
        &self,
        session: &mut Session<P::Session>,
    ) -> Result<StudentInfo, SessionError> {
        session.begin()?;

        let record = match self.store.credentials_get().await {
            Ok(Some(record)) if record.is_complete() => record,
            Ok(_) => return Err(session.fail(SessionError::NoCredentials)),
            Err(e) => return Err(session.fail(e.into())),
        };
        tracing::debug!(
            url = %record.url_preview(),
            username = %record.username,
            password_len = record.password.len(),
            "credentials loaded"
        );

        let request = TokenLogin {
            url: login_url(&record.url),
            username: record.username.clone(),
            password: record.password.clone(),
            device_uuid: record.device_uuid.clone(),
        };

        let handle = match self.portal.token_login(&request).await {
            Ok(handle) if handle.logged_in() => handle,
            Ok(_) => {
                return Err(session.fail(SessionError::TokenExpired(
                    "portal reported the session as not logged in".into(),
                )));
            }
            Err(PortalError::TokenRejected(message)) => {
                tracing::info!("saved token rejected by the portal");
                return Err(session.fail(SessionError::TokenExpired(message)));
            }
            Err(e) => return Err(session.fail(e.into())),
        };

        let rotated = rotate(&record, &handle);
        if let Err(e) = self.store.credentials_set(&rotated).await {
            return Err(session.fail(e.into()));
        }
        tracing::info!(password_len = rotated.password.len(), "token rotated and saved");

        let handle = session.connect(handle)?;
        Ok(pronote_normalize::student(&mut *handle).await)
    }

    /// First login from a scanned QR code and its PIN.
    ///
    /// Persists the new credentials, then tries one full snapshot export.
    /// The export is best-effort: its failure is logged and pairing still
    /// succeeds.
    ///
    /// # Errors
    ///
    /// `InvalidQrPayload` when the payload is not a JSON object,
    /// `LoginRejected` for a wrong PIN or refused login, `Store` when the
    /// credentials cannot be written, `Portal` for other portal failures.
    pub async fn pair_with_qr_code(
        &self,
        session: &mut Session<P::Session>,
        qr_payload: &str,
        pin: &str,
    ) -> Result<StudentInfo, SessionError> {
        session.begin()?;

        let payload = match parse_qr_payload(qr_payload) {
            Ok(payload) => payload,
            Err(e) => return Err(session.fail(e)),
        };
        let device_uuid = uuid::Uuid::new_v4().to_string();
        tracing::debug!(
            payload_keys = ?payload.as_object().map(|o| o.keys().collect::<Vec<_>>()),
            pin_len = pin.len(),
            %device_uuid,
            "QR payload parsed"
        );

        let request = QrLogin {
            payload,
            pin: pin.to_string(),
            device_uuid,
        };
        let handle = match self.portal.qr_login(&request).await {
            Ok(handle) if handle.logged_in() => handle,
            Ok(_) => {
                return Err(session.fail(SessionError::LoginRejected(
                    "login failed, check the PIN".into(),
                )));
            }
            Err(PortalError::LoginRejected(message)) => {
                return Err(session.fail(SessionError::LoginRejected(message)));
            }
            Err(PortalError::InvalidPayload(message)) => {
                return Err(session.fail(SessionError::InvalidQrPayload(message)));
            }
            Err(e) => return Err(session.fail(e.into())),
        };

        let record = CredentialRecord {
            url: preferred_url(&handle, &request.payload),
            username: handle.username().to_string(),
            password: handle.password().to_string(),
            device_uuid: request.device_uuid,
        };
        if let Err(e) = self.store.credentials_set(&record).await {
            return Err(session.fail(e.into()));
        }
        tracing::info!(url = %record.url_preview(), "paired; credentials saved");

        let handle = session.connect(handle)?;
        if let Err(error) =
            pronote_normalize::export_snapshot(&mut *handle, self.store, &self.fetch).await
        {
            tracing::warn!(%error, "initial data export failed; pairing kept");
        }
        Ok(pronote_normalize::student(&mut *handle).await)
    }

    /// Forget the stored credentials and reset the session.
    ///
    /// Succeeds when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the record cannot be deleted.
    pub async fn logout(&self, session: &mut Session<P::Session>) -> Result<(), SessionError> {
        self.store.credentials_delete().await?;
        session.reset();
        tracing::info!("logged out");
        Ok(())
    }
}

fn parse_qr_payload(raw: &str) -> Result<Value, SessionError> {
    let payload: Value = serde_json::from_str(&normalize_qr_payload(raw))
        .map_err(|e| SessionError::InvalidQrPayload(e.to_string()))?;
    if !payload.is_object() {
        return Err(SessionError::InvalidQrPayload(
            "expected a JSON object".into(),
        ));
    }
    Ok(payload)
}

/// The session's own URL carries the parameters token logins need; the QR
/// URL is the fallback.
fn preferred_url<H: PortalSession>(handle: &H, payload: &Value) -> String {
    handle
        .portal_url()
        .filter(|url| !url.trim().is_empty())
        .or_else(|| payload.get("url").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

/// New credentials after a token login. A field the portal leaves empty
/// keeps its previous value.
fn rotate<H: PortalSession>(record: &CredentialRecord, handle: &H) -> CredentialRecord {
    let pick = |fresh: &str, old: &str| {
        if fresh.is_empty() {
            tracing::warn!("portal returned an empty credential field; keeping the previous one");
            old.to_string()
        } else {
            fresh.to_string()
        }
    };
    record.rotated(
        pick(handle.username(), &record.username),
        pick(handle.password(), &record.password),
    )
}
