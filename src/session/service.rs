//! Auth Service
//!
//! Drives an [`AuthContext`] with real API calls.

use crate::api::dto::RegisterRequest;
use crate::api::{ApiClient, ClientError, ClientResult};

use super::context::{AuthContext, AuthOutcome, Session};
use super::storage::SessionStorage;

/// Login, logout and registration against the API
pub struct AuthService<S> {
    client: ApiClient,
    context: AuthContext<S>,
}

impl<S: SessionStorage> AuthService<S> {
    /// Build a service around a context restored from `storage`
    pub fn restore(client: ApiClient, storage: S) -> Self {
        Self {
            client,
            context: AuthContext::restore(storage),
        }
    }

    pub fn context(&self) -> &AuthContext<S> {
        &self.context
    }

    pub fn session(&self) -> Option<&Session> {
        self.context.session()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> AuthOutcome {
        self.context.begin_login();
        let result = self.client.login(username, password).await;
        self.context.complete_login(result)
    }

    pub async fn register(&self, request: &RegisterRequest) -> AuthOutcome {
        AuthOutcome::from_register(self.client.register(request).await)
    }

    pub fn logout(&mut self) {
        self.context.logout();
    }

    /// A client carrying the session's bearer token
    pub fn authorized_client(&self) -> ClientResult<ApiClient> {
        let token = self.context.token().ok_or(ClientError::Unauthorized)?;
        Ok(self.client.clone().with_token(token))
    }
}
