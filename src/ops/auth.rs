use crate::io::auth_client::{AuthBackend, AuthError};
use crate::io::session_io::{clear_session, load_session, save_session};
use crate::io::storage::LocalStorage;
use crate::model::session::{AuthUser, LoginCredentials, RegisterForm};

const LOGIN_FALLBACK: &str = "An error occurred during login";
const REGISTER_FALLBACK: &str = "An error occurred during registration";

/// Holds the signed-in user and the last auth error.
///
/// Owned by whoever needs it (the TUI app, or a single CLI command) and
/// passed around explicitly.
pub struct AuthService {
    backend: Box<dyn AuthBackend>,
    storage: LocalStorage,
    user: Option<AuthUser>,
    error: Option<String>,
}

impl AuthService {
    /// Build the service and restore any stored session
    pub fn new(backend: Box<dyn AuthBackend>, storage: LocalStorage) -> Self {
        let user = load_session(&storage);
        if let Some(u) = &user {
            tracing::debug!(email = %u.email, "restored session");
        }
        AuthService {
            backend,
            storage,
            user,
            error: None,
        }
    }

    pub fn current_user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Message from the last failed login or registration
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn login(&mut self, credentials: &LoginCredentials) -> Result<&AuthUser, AuthError> {
        self.error = None;
        let result = credentials
            .validate()
            .map_err(AuthError::from)
            .and_then(|_| self.backend.login(credentials));
        self.finish(result, LOGIN_FALLBACK)
    }

    /// Validates the form locally first; a failed check never reaches the backend
    pub fn register(&mut self, form: RegisterForm) -> Result<&AuthUser, AuthError> {
        self.error = None;
        let result = form
            .into_register_data()
            .map_err(AuthError::from)
            .and_then(|data| self.backend.register(&data));
        self.finish(result, REGISTER_FALLBACK)
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        clear_session(&self.storage)?;
        if let Some(u) = self.user.take() {
            tracing::info!(email = %u.email, "signed out");
        }
        Ok(())
    }

    fn finish(
        &mut self,
        result: Result<AuthUser, AuthError>,
        fallback: &str,
    ) -> Result<&AuthUser, AuthError> {
        let user = match result.and_then(|user| {
            save_session(&self.storage, &user)?;
            Ok(user)
        }) {
            Ok(user) => user,
            Err(e) => {
                let message = e.to_string();
                self.error = Some(if message.trim().is_empty() {
                    fallback.to_string()
                } else {
                    message
                });
                tracing::warn!(error = %e, "authentication failed");
                return Err(e);
            }
        };
        tracing::info!(email = %user.email, "signed in");
        Ok(self.user.insert(user))
    }
}
