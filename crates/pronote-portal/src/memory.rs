//! Scripted portal for tests and offline runs.
//!
//! A [`PortalFixture`] holds everything the portal would answer. Token logins
//! accept any non-empty token unless `reject_tokens` is set, and every
//! successful login issues a new token derived from the old one
//! (`tok` -> `tok#1` -> `tok#2`), so callers that forget to persist the
//! rotation are easy to spot.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::NaiveDate;
use pronote_core::DateWindow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::PortalError;
use crate::upstream::{
    UpstreamDiscussion, UpstreamHomework, UpstreamLesson, UpstreamMenu, UpstreamPeriod,
    UpstreamStudent,
};
use crate::{LoginOutcome, Portal, PortalSession, QrLogin, TokenLogin};

/// Session accessors that a fixture can make fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalCall {
    Student,
    CurrentPeriod,
    Periods,
    Homework,
    Lessons,
    Menus,
    Discussions,
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read portal fixture {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid portal fixture {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Everything the in-memory portal answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalFixture {
    /// Username issued on login.
    pub username: String,
    /// Token issued by QR pairing.
    pub token_seed: String,
    /// URL reported by the session, if any.
    pub portal_url: Option<String>,
    /// PIN accepted for QR pairing. `None` accepts any non-empty PIN.
    pub pin: Option<String>,
    pub reject_tokens: bool,
    pub failing: Vec<PortalCall>,

    pub student: UpstreamStudent,
    pub current_period: Option<String>,
    pub periods: Vec<UpstreamPeriod>,
    pub homework: Vec<UpstreamHomework>,
    pub lessons: Vec<UpstreamLesson>,
    pub menus: Vec<UpstreamMenu>,
    pub discussions: Vec<UpstreamDiscussion>,
}

impl Default for PortalFixture {
    fn default() -> Self {
        Self {
            username: "eleve.demo".into(),
            token_seed: "memory-token".into(),
            portal_url: None,
            pin: None,
            reject_tokens: false,
            failing: Vec::new(),
            student: UpstreamStudent::default(),
            current_period: None,
            periods: Vec::new(),
            homework: Vec::new(),
            lessons: Vec::new(),
            menus: Vec::new(),
            discussions: Vec::new(),
        }
    }
}

impl PortalFixture {
    /// Load a fixture from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn check(&self, call: PortalCall) -> Result<(), PortalError> {
        if self.failing.contains(&call) {
            return Err(PortalError::Upstream(format!("simulated {call:?} failure")));
        }
        Ok(())
    }
}

/// Next token in the rotation chain: `tok` -> `tok#1`, `tok#3` -> `tok#4`.
fn rotate_token(token: &str) -> String {
    let (base, generation) = match token.rsplit_once('#') {
        Some((base, n)) => match n.parse::<u32>() {
            Ok(n) => (base, n),
            Err(_) => (token, 0),
        },
        None => (token, 0),
    };
    format!("{base}#{}", generation + 1)
}

/// Keep records whose date falls in the window; undated or unparsable ones
/// pass through untouched.
fn in_window(date: Option<&str>, window: DateWindow) -> bool {
    date.and_then(|d| d.get(..10))
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .is_none_or(|d| window.contains(d))
}

/// In-memory [`Portal`] over a [`PortalFixture`].
#[derive(Debug, Default)]
pub struct MemoryPortal {
    fixture: Rc<PortalFixture>,
    token_logins: Cell<u32>,
    qr_logins: Cell<u32>,
    last_token_login: RefCell<Option<TokenLogin>>,
}

impl MemoryPortal {
    #[must_use]
    pub fn new(fixture: PortalFixture) -> Self {
        Self {
            fixture: Rc::new(fixture),
            ..Self::default()
        }
    }

    /// Load the fixture from `path`.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` if the fixture cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        PortalFixture::load(path).map(Self::new)
    }

    /// Number of token login attempts so far.
    #[must_use]
    pub fn token_logins(&self) -> u32 {
        self.token_logins.get()
    }

    #[must_use]
    pub fn qr_logins(&self) -> u32 {
        self.qr_logins.get()
    }

    /// The most recent token login request, as received.
    #[must_use]
    pub fn last_token_login(&self) -> Option<TokenLogin> {
        self.last_token_login.borrow().clone()
    }

    fn session(&self, username: String, password: String) -> MemorySession {
        MemorySession {
            fixture: Rc::clone(&self.fixture),
            login: LoginOutcome {
                logged_in: true,
                username,
                password,
                url: self.fixture.portal_url.clone(),
            },
        }
    }
}

impl Portal for MemoryPortal {
    type Session = MemorySession;

    async fn token_login(&self, request: &TokenLogin) -> Result<MemorySession, PortalError> {
        self.token_logins.set(self.token_logins.get() + 1);
        *self.last_token_login.borrow_mut() = Some(request.clone());

        if self.fixture.reject_tokens {
            return Err(PortalError::TokenRejected(
                "portal answered with an unexpected page".into(),
            ));
        }
        if request.password.is_empty() {
            return Err(PortalError::TokenRejected("empty token".into()));
        }

        let username = if self.fixture.username.is_empty() {
            request.username.clone()
        } else {
            self.fixture.username.clone()
        };
        Ok(self.session(username, rotate_token(&request.password)))
    }

    async fn qr_login(&self, request: &QrLogin) -> Result<MemorySession, PortalError> {
        self.qr_logins.set(self.qr_logins.get() + 1);

        if request
            .payload
            .get("url")
            .and_then(serde_json::Value::as_str)
            .is_none()
        {
            return Err(PortalError::InvalidPayload("QR payload has no url".into()));
        }

        let pin_ok = match &self.fixture.pin {
            Some(expected) => *expected == request.pin,
            None => !request.pin.is_empty(),
        };
        if !pin_ok {
            return Err(PortalError::LoginRejected("invalid PIN".into()));
        }

        Ok(self.session(
            self.fixture.username.clone(),
            rotate_token(&self.fixture.token_seed),
        ))
    }
}

/// Session served from a shared fixture.
#[derive(Debug)]
pub struct MemorySession {
    fixture: Rc<PortalFixture>,
    login: LoginOutcome,
}

impl PortalSession for MemorySession {
    fn logged_in(&self) -> bool {
        self.login.logged_in
    }

    fn username(&self) -> &str {
        &self.login.username
    }

    fn password(&self) -> &str {
        &self.login.password
    }

    fn portal_url(&self) -> Option<&str> {
        self.login.url.as_deref()
    }

    async fn student(&mut self) -> Result<UpstreamStudent, PortalError> {
        self.fixture.check(PortalCall::Student)?;
        Ok(self.fixture.student.clone())
    }

    async fn current_period(&mut self) -> Result<Option<String>, PortalError> {
        self.fixture.check(PortalCall::CurrentPeriod)?;
        Ok(self.fixture.current_period.clone())
    }

    async fn periods(&mut self) -> Result<Vec<UpstreamPeriod>, PortalError> {
        self.fixture.check(PortalCall::Periods)?;
        Ok(self.fixture.periods.clone())
    }

    async fn homework(&mut self, window: DateWindow) -> Result<Vec<UpstreamHomework>, PortalError> {
        self.fixture.check(PortalCall::Homework)?;
        Ok(self
            .fixture
            .homework
            .iter()
            .filter(|h| in_window(h.date.as_deref(), window))
            .cloned()
            .collect())
    }

    async fn lessons(&mut self, window: DateWindow) -> Result<Vec<UpstreamLesson>, PortalError> {
        self.fixture.check(PortalCall::Lessons)?;
        Ok(self
            .fixture
            .lessons
            .iter()
            .filter(|l| in_window(l.start.as_deref(), window))
            .cloned()
            .collect())
    }

    async fn menus(&mut self, window: DateWindow) -> Result<Vec<UpstreamMenu>, PortalError> {
        self.fixture.check(PortalCall::Menus)?;
        Ok(self
            .fixture
            .menus
            .iter()
            .filter(|m| in_window(m.date.as_deref(), window))
            .cloned()
            .collect())
    }

    async fn discussions(
        &mut self,
        only_unread: bool,
    ) -> Result<Vec<UpstreamDiscussion>, PortalError> {
        self.fixture.check(PortalCall::Discussions)?;
        Ok(self
            .fixture
            .discussions
            .iter()
            .filter(|d| !only_unread || d.unread.unwrap_or(false))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_chain() {
        assert_eq!(rotate_token("tok"), "tok#1");
        assert_eq!(rotate_token("tok#1"), "tok#2");
        assert_eq!(rotate_token("a#b"), "a#b#1");
    }

    #[test]
    fn window_filter_keeps_undated_records() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let window = DateWindow::ahead(day, 7);
        assert!(in_window(None, window));
        assert!(in_window(Some("garbage"), window));
        assert!(in_window(Some("2026-10-20T08:00:00"), window));
        assert!(!in_window(Some("2026-11-20"), window));
    }
}
