//! The portal chosen from configuration, behind one concrete type.

use pronote_core::DateWindow;
use pronote_portal::upstream::{
    UpstreamDiscussion, UpstreamHomework, UpstreamLesson, UpstreamMenu, UpstreamPeriod,
    UpstreamStudent,
};
use pronote_portal::{
    BridgePortal, BridgeSession, MemoryPortal, MemorySession, Portal, PortalError, PortalSession,
    QrLogin, TokenLogin,
};

pub enum AnyPortal {
    Bridge(BridgePortal),
    Memory(MemoryPortal),
    /// No portal configured. Commands that stay offline still run; logins fail.
    Unconfigured,
}

pub enum AnySession {
    Bridge(BridgeSession),
    Memory(MemorySession),
}

const UNCONFIGURED: &str =
    "no portal configured; set PRONOTE_PORTAL__BRIDGE_COMMAND or PRONOTE_PORTAL__FIXTURE_PATH";

impl Portal for AnyPortal {
    type Session = AnySession;

    async fn token_login(&self, request: &TokenLogin) -> Result<AnySession, PortalError> {
        match self {
            Self::Bridge(p) => p.token_login(request).await.map(AnySession::Bridge),
            Self::Memory(p) => p.token_login(request).await.map(AnySession::Memory),
            Self::Unconfigured => Err(PortalError::Bridge(UNCONFIGURED.into())),
        }
    }

    async fn qr_login(&self, request: &QrLogin) -> Result<AnySession, PortalError> {
        match self {
            Self::Bridge(p) => p.qr_login(request).await.map(AnySession::Bridge),
            Self::Memory(p) => p.qr_login(request).await.map(AnySession::Memory),
            Self::Unconfigured => Err(PortalError::Bridge(UNCONFIGURED.into())),
        }
    }
}

macro_rules! delegate {
    ($self:ident, $s:ident => $call:expr) => {
        match $self {
            AnySession::Bridge($s) => $call,
            AnySession::Memory($s) => $call,
        }
    };
}

impl PortalSession for AnySession {
    fn logged_in(&self) -> bool {
        delegate!(self, s => s.logged_in())
    }

    fn username(&self) -> &str {
        delegate!(self, s => s.username())
    }

    fn password(&self) -> &str {
        delegate!(self, s => s.password())
    }

    fn portal_url(&self) -> Option<&str> {
        delegate!(self, s => s.portal_url())
    }

    async fn student(&mut self) -> Result<UpstreamStudent, PortalError> {
        delegate!(self, s => s.student().await)
    }

    async fn current_period(&mut self) -> Result<Option<String>, PortalError> {
        delegate!(self, s => s.current_period().await)
    }

    async fn periods(&mut self) -> Result<Vec<UpstreamPeriod>, PortalError> {
        delegate!(self, s => s.periods().await)
    }

    async fn homework(&mut self, window: DateWindow) -> Result<Vec<UpstreamHomework>, PortalError> {
        delegate!(self, s => s.homework(window).await)
    }

    async fn lessons(&mut self, window: DateWindow) -> Result<Vec<UpstreamLesson>, PortalError> {
        delegate!(self, s => s.lessons(window).await)
    }

    async fn menus(&mut self, window: DateWindow) -> Result<Vec<UpstreamMenu>, PortalError> {
        delegate!(self, s => s.menus(window).await)
    }

    async fn discussions(
        &mut self,
        only_unread: bool,
    ) -> Result<Vec<UpstreamDiscussion>, PortalError> {
        delegate!(self, s => s.discussions(only_unread).await)
    }
}
