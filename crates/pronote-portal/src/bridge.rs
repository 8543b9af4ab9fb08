//! Portal client backed by a helper process.
//!
//! Each login spawns the configured helper and keeps it for the life of the
//! session. Requests and responses are single JSON lines:
//!
//! ```text
//! -> {"id":1,"method":"token_login","params":{...}}
//! <- {"id":1,"ok":true,"result":{...}}
//! <- {"id":1,"ok":false,"error":{"kind":"token_rejected","message":"..."}}
//! ```
//!
//! The helper writes its own diagnostics to stderr, which is inherited.

use std::process::Stdio;

use pronote_core::DateWindow;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use crate::error::{PortalError, PortalErrorKind};
use crate::upstream::{
    UpstreamDiscussion, UpstreamHomework, UpstreamLesson, UpstreamMenu, UpstreamPeriod,
    UpstreamStudent,
};
use crate::{LoginOutcome, Portal, PortalSession, QrLogin, TokenLogin};

#[derive(Debug, Serialize)]
struct BridgeRequest<'a> {
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct BridgeResponse {
    id: u64,
    ok: bool,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<BridgeFailure>,
}

#[derive(Debug, Deserialize)]
struct BridgeFailure {
    kind: PortalErrorKind,
    #[serde(default)]
    message: String,
}

/// Spawns `command args...` once per login.
#[derive(Debug, Clone)]
pub struct BridgePortal {
    command: String,
    args: Vec<String>,
}

impl BridgePortal {
    #[must_use]
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    fn spawn(&self) -> Result<BridgeSession, PortalError> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PortalError::Bridge(format!("spawn {}: {e}", self.command)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PortalError::Bridge("helper stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| PortalError::Bridge("helper stdout unavailable".into()))?;

        tracing::debug!(command = %self.command, "portal helper spawned");
        Ok(BridgeSession {
            _child: child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            next_id: 0,
            login: LoginOutcome::default(),
        })
    }

    async fn login(&self, method: &str, params: Value) -> Result<BridgeSession, PortalError> {
        let mut session = self.spawn()?;
        session.login = session.call(method, params).await?;
        Ok(session)
    }
}

impl Portal for BridgePortal {
    type Session = BridgeSession;

    async fn token_login(&self, request: &TokenLogin) -> Result<BridgeSession, PortalError> {
        let params = serde_json::to_value(request)
            .map_err(|e| PortalError::Bridge(format!("encode token_login: {e}")))?;
        self.login("token_login", params).await
    }

    async fn qr_login(&self, request: &QrLogin) -> Result<BridgeSession, PortalError> {
        let params = serde_json::to_value(request)
            .map_err(|e| PortalError::Bridge(format!("encode qr_login: {e}")))?;
        self.login("qr_login", params).await
    }
}

/// A live helper process holding one authenticated portal session.
///
/// Dropping the session kills the helper.
pub struct BridgeSession {
    _child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    next_id: u64,
    login: LoginOutcome,
}

impl BridgeSession {
    async fn call<T: DeserializeOwned>(
        &mut self,
        method: &str,
        params: Value,
    ) -> Result<T, PortalError> {
        self.next_id += 1;
        let id = self.next_id;

        let mut line = serde_json::to_string(&BridgeRequest { id, method, params })
            .map_err(|e| PortalError::Bridge(format!("encode {method}: {e}")))?;
        line.push('\n');
        self.stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|e| PortalError::Bridge(format!("write {method}: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| PortalError::Bridge(format!("flush {method}: {e}")))?;

        let response = self.read_reply(method, id).await?;

        if !response.ok {
            let failure = response.error.unwrap_or(BridgeFailure {
                kind: PortalErrorKind::Upstream,
                message: format!("{method} failed without detail"),
            });
            tracing::debug!(method, kind = ?failure.kind, "helper reported failure");
            return Err(PortalError::from_kind(failure.kind, failure.message));
        }

        serde_json::from_value(response.result)
            .map_err(|e| PortalError::Bridge(format!("unexpected result for {method}: {e}")))
    }

    /// Next reply carrying `id`. Non-protocol lines and stale replies are
    /// skipped so one stray print does not shift every later call.
    async fn read_reply(&mut self, method: &str, id: u64) -> Result<BridgeResponse, PortalError> {
        loop {
            let line = self
                .stdout
                .next_line()
                .await
                .map_err(|e| PortalError::Bridge(format!("read {method}: {e}")))?
                .ok_or_else(|| PortalError::Bridge(format!("helper exited during {method}")))?;

            let Ok(response) = serde_json::from_str::<BridgeResponse>(&line) else {
                tracing::debug!(method, len = line.len(), "skipping non-protocol helper output");
                continue;
            };
            if response.id < id {
                tracing::debug!(method, stale = response.id, expected = id, "skipping stale reply");
                continue;
            }
            if response.id > id {
                return Err(PortalError::Bridge(format!(
                    "reply id {} does not match request {id}",
                    response.id
                )));
            }
            return Ok(response);
        }
    }
}

fn window_params(window: DateWindow) -> Value {
    json!({ "from": window.from, "to": window.to })
}

impl PortalSession for BridgeSession {
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
        self.call("student", Value::Null).await
    }

    async fn current_period(&mut self) -> Result<Option<String>, PortalError> {
        self.call("current_period", Value::Null).await
    }

    async fn periods(&mut self) -> Result<Vec<UpstreamPeriod>, PortalError> {
        self.call("periods", Value::Null).await
    }

    async fn homework(&mut self, window: DateWindow) -> Result<Vec<UpstreamHomework>, PortalError> {
        self.call("homework", window_params(window)).await
    }

    async fn lessons(&mut self, window: DateWindow) -> Result<Vec<UpstreamLesson>, PortalError> {
        self.call("lessons", window_params(window)).await
    }

    async fn menus(&mut self, window: DateWindow) -> Result<Vec<UpstreamMenu>, PortalError> {
        self.call("menus", window_params(window)).await
    }

    async fn discussions(
        &mut self,
        only_unread: bool,
    ) -> Result<Vec<UpstreamDiscussion>, PortalError> {
        self.call("discussions", json!({ "only_unread": only_unread }))
            .await
    }
}
