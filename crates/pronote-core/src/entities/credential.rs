use serde::{Deserialize, Deserializer, Serialize};

/// The single stored credential set used for token reconnection.
///
/// `password` is the portal's current single-use token. It changes after every
/// successful login, so the stored record must be rewritten each time.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
    #[serde(default, rename = "uuid", deserialize_with = "null_as_empty")]
    pub device_uuid: String,
}

/// A `null` field reads like an absent one, as a NULL column does.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CredentialRecord {
    pub const FIELDS: [&'static str; 4] = ["url", "username", "password", "uuid"];

    /// First empty field in storage order, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        let values = [&self.url, &self.username, &self.password, &self.device_uuid];
        Self::FIELDS
            .iter()
            .zip(values)
            .find(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Same url and device, rotated login pair.
    #[must_use]
    pub fn rotated(&self, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: self.url.clone(),
            username: username.into(),
            password: password.into(),
            device_uuid: self.device_uuid.clone(),
        }
    }

    /// URL shortened for log output.
    #[must_use]
    pub fn url_preview(&self) -> String {
        let mut preview: String = self.url.chars().take(50).collect();
        if self.url.chars().count() > 50 {
            preview.push_str("...");
        }
        preview
    }
}

// Hand-written so the token never reaches a log line.
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("url", &self.url_preview())
            .field("username", &self.username)
            .field("password_len", &self.password.len())
            .field("device_uuid", &self.device_uuid)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> CredentialRecord {
        CredentialRecord {
            url: "https://demo.index-education.net/pronote/eleve.html?fd=1".into(),
            username: "demo".into(),
            password: "tok-1".into(),
            device_uuid: "0d5b6f6e-95c9-4b3e-9a3c-1d8f2f8c4c11".into(),
        }
    }

    #[test]
    fn complete_record_has_no_missing_field() {
        assert!(complete().is_complete());
        assert_eq!(complete().missing_field(), None);
    }

    #[test]
    fn missing_field_reports_first_empty_in_order() {
        let mut record = complete();
        record.password.clear();
        record.device_uuid.clear();
        assert_eq!(record.missing_field(), Some("password"));

        let empty = CredentialRecord::default();
        assert_eq!(empty.missing_field(), Some("url"));
    }

    #[test]
    fn rotated_keeps_url_and_device() {
        let record = complete();
        let next = record.rotated("demo-2", "tok-2");
        assert_eq!(next.url, record.url);
        assert_eq!(next.device_uuid, record.device_uuid);
        assert_eq!(next.username, "demo-2");
        assert_eq!(next.password, "tok-2");
    }

    #[test]
    fn deserializes_legacy_file_with_missing_keys() {
        let record: CredentialRecord =
            serde_json::from_str(r#"{"url":"https://x","username":"u"}"#).unwrap();
        assert_eq!(record.missing_field(), Some("password"));
    }

    #[test]
    fn null_fields_read_as_missing() {
        let record: CredentialRecord = serde_json::from_str(
            r#"{"url":"https://x/eleve.html","username":"u","password":null,"uuid":"d"}"#,
        )
        .unwrap();
        assert_eq!(record.password, "");
        assert_eq!(record.missing_field(), Some("password"));
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", complete());
        assert!(!rendered.contains("tok-1"));
        assert!(rendered.contains("password_len"));
    }
}
