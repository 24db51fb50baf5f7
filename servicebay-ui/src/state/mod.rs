//! State Management
//!
//! Toasts, the session provider and the notification bell's polling.

pub mod global;
pub mod notifications;
pub mod session;

pub use global::{provide_global_state, use_global_state, GlobalState};
pub use session::{provide_session, use_session, SessionState};
