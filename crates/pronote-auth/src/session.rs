//! The in-memory session value.
//!
//! A `Session` lives for one command. It carries the state machine and, once
//! connected, the portal handle. Nothing here is persisted.

use pronote_core::SessionState;

use crate::error::SessionError;

#[derive(Debug)]
pub struct Session<H> {
    state: SessionState,
    handle: Option<H>,
}

impl<H> Default for Session<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Session<H> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SessionState::Disconnected,
            handle: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Connected && self.handle.is_some()
    }

    /// The live portal handle, only while connected.
    pub fn handle_mut(&mut self) -> Option<&mut H> {
        if self.state == SessionState::Connected {
            self.handle.as_mut()
        } else {
            None
        }
    }

    pub(crate) fn transition(&mut self, next: SessionState) -> Result<(), SessionError> {
        if !self.state.can_transition_to(next) {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!(from = %self.state, to = %next, "session transition");
        self.state = next;
        Ok(())
    }

    pub(crate) fn begin(&mut self) -> Result<(), SessionError> {
        self.transition(SessionState::Connecting)
    }

    pub(crate) fn connect(&mut self, handle: H) -> Result<&mut H, SessionError> {
        self.transition(SessionState::Connected)?;
        Ok(self.handle.insert(handle))
    }

    /// Mark the attempt failed and pass `error` through.
    pub(crate) fn fail(&mut self, error: SessionError) -> SessionError {
        if self.state.can_transition_to(SessionState::Failed) {
            self.state = SessionState::Failed;
        }
        self.handle = None;
        error
    }

    /// Back to `Disconnected` from any state, dropping the handle.
    pub(crate) fn reset(&mut self) {
        self.state = SessionState::Disconnected;
        self.handle = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_and_reset() {
        let mut session: Session<u8> = Session::new();
        session.begin().unwrap();
        assert_eq!(*session.connect(7).unwrap(), 7);
        assert!(session.is_authenticated());
        assert_eq!(session.handle_mut(), Some(&mut 7));

        session.reset();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(session.handle_mut().is_none());
    }

    #[test]
    fn failed_is_terminal() {
        let mut session: Session<u8> = Session::new();
        session.begin().unwrap();
        let _ = session.fail(SessionError::NoCredentials);
        assert_eq!(session.state(), SessionState::Failed);
        assert!(matches!(
            session.begin(),
            Err(SessionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn cannot_connect_without_connecting() {
        let mut session: Session<u8> = Session::new();
        assert!(session.connect(1).is_err());
        assert!(!session.is_authenticated());
    }
}
