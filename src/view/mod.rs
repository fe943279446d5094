pub mod login;
pub mod upcoming;

use crate::store::SessionStore;

/// Top-level screen choice derived from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Session not rehydrated yet; no decision can be made.
    Splash,
    Login,
    Tasks,
}

impl Route {
    pub fn resolve(session: &SessionStore) -> Self {
        if !session.is_hydrated() {
            Self::Splash
        } else if session.is_logged_in() {
            Self::Tasks
        } else {
            Self::Login
        }
    }
}
