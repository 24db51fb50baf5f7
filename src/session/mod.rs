//! Session Handling
//!
//! - **storage**: persistent client storage (`token`, `user` keys)
//! - **context**: the auth state machine and sole storage writer
//! - **service**: API-backed login/logout/register (native only)

mod context;
#[cfg(feature = "native")]
mod service;
mod storage;

pub use context::{AuthContext, AuthOutcome, AuthStatus, Session};
#[cfg(feature = "native")]
pub use service::AuthService;
pub use storage::{MemoryStorage, SessionStorage, TOKEN_KEY, USER_KEY};

#[cfg(feature = "native")]
pub use storage::FileStorage;
