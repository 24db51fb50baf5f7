//! Session Provider
//!
//! Wraps the shared [`AuthContext`] over `localStorage` and hands it to
//! components through context. [`SessionState::login`] and
//! [`SessionState::logout`] are the only writers of the stored session.

use leptos::*;

use servicebay::api::dto::{RegisterRequest, Role};
use servicebay::session::{AuthContext, AuthOutcome, AuthStatus, Session, SessionStorage};
use servicebay::{ClientError, ClientResult};

use crate::api::Api;

/// Browser `localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> ClientResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| ClientError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| ClientError::Storage("localStorage is unavailable".to_string()))
    }
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) {
        if let Ok(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Reactive handle to the auth context
#[derive(Clone, Copy)]
pub struct SessionState {
    context: StoredValue<AuthContext<LocalStorage>>,
    status: RwSignal<AuthStatus>,
}

/// Restore the stored session and provide it to the component tree
pub fn provide_session() {
    let context = AuthContext::restore(LocalStorage);
    let status = create_rw_signal(context.status().clone());

    provide_context(SessionState {
        context: store_value(context),
        status,
    });
}

pub fn use_session() -> SessionState {
    use_context::<SessionState>().expect("SessionState not found")
}

impl SessionState {
    /// Current session; tracked
    pub fn session(&self) -> Option<Session> {
        self.status.with(|status| match status {
            AuthStatus::Authenticated(session) => Some(session.clone()),
            _ => None,
        })
    }

    pub fn is_loading(&self) -> bool {
        self.status.with(|status| matches!(status, AuthStatus::Loading))
    }

    pub fn role(&self) -> Option<Role> {
        self.session().map(|s| s.role())
    }

    pub fn token(&self) -> Option<String> {
        self.session().map(|s| s.token)
    }

    /// API handle carrying the current token; untracked
    pub fn api(&self) -> Api {
        let token = self.status.with_untracked(|status| match status {
            AuthStatus::Authenticated(session) => Some(session.token.clone()),
            _ => None,
        });
        Api::new(token)
    }

    pub fn user_id_untracked(&self) -> Option<i64> {
        self.status.with_untracked(|status| match status {
            AuthStatus::Authenticated(session) => Some(session.user_id()),
            _ => None,
        })
    }

    fn sync(&self) {
        if let Some(status) = self.context.try_with_value(|c| c.status().clone()) {
            self.status.try_set(status);
        }
    }

    pub async fn login(self, username: String, password: String) -> AuthOutcome {
        self.context.update_value(|c| c.begin_login());
        self.sync();

        let result = Api::new(None).login(&username, &password).await;

        let outcome = self
            .context
            .try_update_value(|c| c.complete_login(result))
            .unwrap_or_else(|| AuthOutcome {
                success: false,
                message: "Login was interrupted".to_string(),
            });
        self.sync();

        if outcome.success {
            web_sys::console::log_1(&format!("Logged in as {}", username).into());
        }
        outcome
    }

    pub async fn register(self, request: RegisterRequest) -> AuthOutcome {
        AuthOutcome::from_register(Api::new(None).register(&request).await)
    }

    pub fn logout(&self) {
        self.context.update_value(|c| c.logout());
        self.sync();
    }
}
