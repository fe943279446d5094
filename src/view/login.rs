use crate::api::{ApiError, AuthSource, LOGIN_FALLBACK_MESSAGE};
use crate::core::user::{Credentials, User};
use crate::store::SessionStore;

/// Login form state.
#[derive(Debug, Clone, Default)]
pub struct LoginModel {
    pub username: String,
    pub password: String,
    pub show_password: bool,
    submitting: bool,
    error: Option<String>,
}

impl LoginModel {
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Credentials to send, or `None` while a submission is already in flight.
    pub fn submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.error = None;
        log::info!("Logging in as {}", self.username.trim());
        Some(Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }

    /// Apply the login response. On success the user is stored in the
    /// session; on failure the server's message (or a fallback) is kept for display.
    pub fn finish(&mut self, result: Result<User, String>, session: &SessionStore) -> bool {
        self.submitting = false;
        match result {
            Ok(user) => {
                session.set_user(Some(user));
                self.password.clear();
                self.error = None;
                true
            }
            Err(message) => {
                log::error!("Login failed: {}", message);
                self.error = Some(message);
                false
            }
        }
    }

    /// Submit and wait for `auth` in one step.
    pub async fn login(&mut self, auth: &dyn AuthSource, session: &SessionStore) -> bool {
        let Some(credentials) = self.submit() else {
            return false;
        };
        let result = auth
            .login(credentials)
            .await
            .map_err(|e: ApiError| e.user_message(LOGIN_FALLBACK_MESSAGE));
        self.finish(result, session)
    }
}
