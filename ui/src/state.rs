use yewdux::prelude::*;

use crate::session::{self, Session};

#[derive(Clone, PartialEq, Default)]
pub enum AuthState {
    /// Startup, before the stored session has been checked.
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn(Session),
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    pub auth_state: AuthState,
}

impl State {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_state, AuthState::LoggedIn(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.auth_state {
            AuthState::LoggedIn(session) => Some(session),
            AuthState::Unknown | AuthState::LoggedOut => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.token.as_str())
    }

    pub fn login(&mut self, session: Session) {
        if let Err(e) = session::persist(&session) {
            tracing::warn!("Could not persist session: {e:#}");
        }
        self.auth_state = AuthState::LoggedIn(session);
    }

    pub fn logout(&mut self) {
        if let Err(e) = session::clear() {
            tracing::warn!("Could not clear stored session: {e:#}");
        }
        self.auth_state = AuthState::LoggedOut;
    }
}
