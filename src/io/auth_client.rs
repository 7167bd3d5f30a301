use std::time::Duration;

use serde::Deserialize;

use crate::model::config::ApiConfig;
use crate::model::record::ValidationError;
use crate::model::session::{AuthUser, LoginCredentials, RegisterData};

/// Error type for login and registration
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("could not store session: {0}")]
    Storage(#[from] crate::io::storage::StorageError),
}

/// The two calls the auth screens make against the external service
pub trait AuthBackend {
    fn login(&self, credentials: &LoginCredentials) -> Result<AuthUser, AuthError>;
    fn register(&self, data: &RegisterData) -> Result<AuthUser, AuthError>;
}

/// Talks to `{base_url}/auth/login` and `{base_url}/auth/register` over HTTP
pub struct HttpAuthBackend {
    base_url: String,
    agent: ureq::Agent,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpAuthBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        HttpAuthBackend {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(api.base_url.clone(), Duration::from_secs(api.timeout_secs))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<AuthUser, AuthError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "auth request");
        match self.agent.post(&url).send_json(body) {
            Ok(resp) => {
                let text = resp
                    .into_string()
                    .map_err(|e| AuthError::Network(e.to_string()))?;
                serde_json::from_str(&text).map_err(|e| AuthError::Decode(e.to_string()))
            }
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                let message = serde_json::from_str::<ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.message)
                    .unwrap_or_else(|| format!("Request failed with status code {}", status));
                tracing::warn!(%url, status, "auth request rejected");
                Err(AuthError::Rejected { status, message })
            }
            Err(ureq::Error::Transport(t)) => {
                tracing::warn!(%url, error = %t, "auth request failed");
                Err(AuthError::Network(t.to_string()))
            }
        }
    }
}

impl AuthBackend for HttpAuthBackend {
    fn login(&self, credentials: &LoginCredentials) -> Result<AuthUser, AuthError> {
        self.post("auth/login", credentials)
    }

    fn register(&self, data: &RegisterData) -> Result<AuthUser, AuthError> {
        self.post("auth/register", data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let backend = HttpAuthBackend::new("http://localhost:3000/api/", Duration::from_secs(1));
        assert_eq!(
            backend.endpoint("auth/login"),
            "http://localhost:3000/api/auth/login"
        );
    }

    #[test]
    fn unreachable_server_is_a_network_error() {
        // Port 9 (discard) on loopback is closed on test machines.
        let backend = HttpAuthBackend::new("http://127.0.0.1:9/api", Duration::from_secs(1));
        let err = backend
            .login(&LoginCredentials {
                email: "a@b.c".into(),
                password: "pw".into(),
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::Network(_)), "{err:?}");
    }

    #[test]
    fn validation_error_message_passes_through() {
        let err = AuthError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.to_string(), "Passwords do not match");
    }
}
