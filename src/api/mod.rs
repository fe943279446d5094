use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::DaybookConfig;
use crate::core::task::{TodoPage, TodoRecord};
use crate::core::user::{Credentials, User};

pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed";
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch todos";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("unexpected response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ApiError {
    /// The server's own message when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status {
                message: Some(m), ..
            } if !m.trim().is_empty() => m.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Error payload shape used by the demo API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Where the upcoming screen gets its todos from.
pub trait TaskSource: Send + Sync {
    fn fetch_todos(&self) -> BoxFuture<'_, Result<Vec<TodoRecord>, ApiError>>;
}

/// Where the login screen checks credentials.
pub trait AuthSource: Send + Sync {
    fn login(&self, credentials: Credentials) -> BoxFuture<'_, Result<User, ApiError>>;
}

/// HTTP client for the demo API (todos + auth).
#[derive(Debug, Clone)]
pub struct ApiClient {
    todos_url: String,
    login_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(config: &DaybookConfig) -> Result<Self, ApiError> {
        let http = Client::builder().build()?;
        Ok(Self {
            todos_url: config.todos_url(),
            login_url: config.login_url(),
            http,
        })
    }

    /// GET the todo list. No auth header or query parameters are sent.
    pub async fn get_todos(&self) -> Result<Vec<TodoRecord>, ApiError> {
        log::debug!("GET {}", self.todos_url);
        let resp = self.http.get(&self.todos_url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let page: TodoPage = serde_json::from_str(&body)?;
        log::info!("Fetched {} todos", page.todos.len());
        Ok(page.todos)
    }

    /// POST credentials; the success body is the user record.
    pub async fn post_login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        log::debug!("POST {} as {}", self.login_url, credentials.username);
        let resp = self
            .http
            .post(&self.login_url)
            .json(credentials)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message);
    ApiError::Status { status, message }
}

impl TaskSource for ApiClient {
    fn fetch_todos(&self) -> BoxFuture<'_, Result<Vec<TodoRecord>, ApiError>> {
        Box::pin(self.get_todos())
    }
}

impl AuthSource for ApiClient {
    fn login(&self, credentials: Credentials) -> BoxFuture<'_, Result<User, ApiError>> {
        Box::pin(async move { self.post_login(&credentials).await })
    }
}
