//! Auth Context
//!
//! Owns the logged-in session and is the only writer of client storage.
//! Components receive the context explicitly instead of reading storage
//! on their own.

use crate::api::dto::{LoginResponse, MessageResponse, Role, SessionUser};
use crate::api::error::{ClientError, ClientResult};

use super::storage::{SessionStorage, TOKEN_KEY, USER_KEY};

/// An authenticated session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}

/// Authentication state
#[derive(Debug, Clone, PartialEq)]
pub enum AuthStatus {
    Anonymous,
    Loading,
    Authenticated(Session),
}

/// Result of a login or registration attempt, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
}

impl AuthOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Outcome of a registration call. Registration never creates a session.
    pub fn from_register(result: ClientResult<MessageResponse>) -> Self {
        match result {
            Ok(resp) if resp.message.is_empty() => Self::ok("Registration successful"),
            Ok(resp) => Self::ok(resp.message),
            Err(e) => Self::failed(failure_message(&e, "Registration failed")),
        }
    }
}

/// User-facing text for a failed auth call
fn failure_message(err: &ClientError, fallback: &str) -> String {
    match err {
        ClientError::Api { message, .. } => message.clone(),
        ClientError::Unauthorized => "Invalid username or password".to_string(),
        ClientError::Network(_) | ClientError::Timeout => {
            "Unable to reach the server. Please try again.".to_string()
        }
        _ => fallback.to_string(),
    }
}

/// Session holder backed by client storage
pub struct AuthContext<S> {
    storage: S,
    status: AuthStatus,
    before_login: Option<AuthStatus>,
}

impl<S: SessionStorage> AuthContext<S> {
    /// Anonymous context; storage is not read
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            status: AuthStatus::Anonymous,
            before_login: None,
        }
    }

    /// Context rebuilt from whatever session storage holds.
    ///
    /// A token without a readable user record is treated as a corrupt
    /// session: storage is cleared and the context starts anonymous.
    pub fn restore(storage: S) -> Self {
        let mut context = Self::new(storage);

        let token = context.storage.get(TOKEN_KEY);
        let user = context.storage.get(USER_KEY);

        match (token, user) {
            (Some(token), Some(user)) => match serde_json::from_str::<SessionUser>(&user) {
                Ok(user) => {
                    tracing::debug!(username = %user.username, "Restored session");
                    context.status = AuthStatus::Authenticated(Session { token, user });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Stored user is malformed, logging out");
                    context.logout();
                }
            },
            (None, None) => {}
            _ => {
                tracing::warn!("Incomplete stored session, logging out");
                context.logout();
            }
        }

        context
    }

    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.status {
            AuthStatus::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Loading
    }

    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.token.as_str())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Enter the loading state while a login call is in flight
    pub fn begin_login(&mut self) {
        if self.is_loading() {
            return;
        }
        let previous = std::mem::replace(&mut self.status, AuthStatus::Loading);
        self.before_login = Some(previous);
    }

    /// Apply the result of a login call.
    ///
    /// On failure nothing is written and the state from before
    /// [`begin_login`](Self::begin_login) comes back.
    pub fn complete_login(&mut self, result: ClientResult<LoginResponse>) -> AuthOutcome {
        let previous = self.before_login.take().unwrap_or(AuthStatus::Anonymous);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::info!(error = %e, "Login failed");
                self.status = previous;
                return AuthOutcome::failed(failure_message(&e, "Login failed"));
            }
        };

        if let Err(e) = self.persist(&response) {
            tracing::warn!(error = %e, "Could not persist session");
            self.storage.remove(TOKEN_KEY);
            self.storage.remove(USER_KEY);
            self.status = previous;
            return AuthOutcome::failed("Could not save the session");
        }

        tracing::info!(username = %response.user.username, role = %response.user.role, "Logged in");
        self.status = AuthStatus::Authenticated(Session {
            token: response.token,
            user: response.user,
        });
        AuthOutcome::ok("Login successful")
    }

    fn persist(&self, response: &LoginResponse) -> ClientResult<()> {
        let user = serde_json::to_string(&response.user)?;
        self.storage.set(TOKEN_KEY, &response.token)?;
        self.storage.set(USER_KEY, &user)
    }

    /// Clear storage and drop the session
    pub fn logout(&mut self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        if self.is_authenticated() {
            tracing::info!("Logged out");
        }
        self.status = AuthStatus::Anonymous;
        self.before_login = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStorage;

    fn login_response() -> LoginResponse {
        LoginResponse {
            token: "tok".to_string(),
            user: SessionUser {
                id: 5,
                username: "alex".to_string(),
                email: "alex@shop.test".to_string(),
                role: Role::Customer,
            },
        }
    }

    #[test]
    fn test_login_success_persists() {
        let mut ctx = AuthContext::new(MemoryStorage::new());
        ctx.begin_login();
        assert!(ctx.is_loading());

        let outcome = ctx.complete_login(Ok(login_response()));
        assert!(outcome.success);
        assert_eq!(ctx.token(), Some("tok"));
        assert_eq!(ctx.storage().get(TOKEN_KEY).as_deref(), Some("tok"));

        let stored: SessionUser =
            serde_json::from_str(&ctx.storage().get(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored.role, Role::Customer);
    }

    #[test]
    fn test_login_failure_writes_nothing() {
        let mut ctx = AuthContext::new(MemoryStorage::new());
        ctx.begin_login();

        let outcome = ctx.complete_login(Err(ClientError::Api {
            status: 401,
            message: "Bad credentials".to_string(),
        }));

        assert_eq!(
            outcome,
            AuthOutcome {
                success: false,
                message: "Bad credentials".to_string()
            }
        );
        assert_eq!(ctx.status(), &AuthStatus::Anonymous);
        assert!(ctx.storage().is_empty());
    }

    #[test]
    fn test_failed_relogin_keeps_session() {
        let mut ctx = AuthContext::new(MemoryStorage::new());
        ctx.begin_login();
        ctx.complete_login(Ok(login_response()));

        ctx.begin_login();
        let outcome = ctx.complete_login(Err(ClientError::Timeout));
        assert!(!outcome.success);
        assert!(ctx.is_authenticated());
    }

    #[test]
    fn test_restore_round_trip() {
        let mut ctx = AuthContext::new(MemoryStorage::new());
        ctx.complete_login(Ok(login_response()));

        let restored = AuthContext::restore(ctx.storage);
        assert_eq!(restored.session().map(|s| s.user_id()), Some(5));
    }

    #[test]
    fn test_restore_malformed_user_logs_out() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();

        let ctx = AuthContext::restore(storage);
        assert_eq!(ctx.status(), &AuthStatus::Anonymous);
        assert!(ctx.storage().is_empty());
    }

    #[test]
    fn test_logout_clears_storage() {
        let mut ctx = AuthContext::new(MemoryStorage::new());
        ctx.complete_login(Ok(login_response()));
        ctx.logout();
        assert!(!ctx.is_authenticated());
        assert!(ctx.storage().is_empty());
    }

    #[test]
    fn test_register_outcome() {
        let ok = AuthOutcome::from_register(Ok(MessageResponse {
            message: String::new(),
        }));
        assert!(ok.success);
        assert_eq!(ok.message, "Registration successful");

        let failed = AuthOutcome::from_register(Err(ClientError::Network("refused".into())));
        assert!(!failed.success);
        assert_eq!(failed.message, "Unable to reach the server. Please try again.");
    }
}
