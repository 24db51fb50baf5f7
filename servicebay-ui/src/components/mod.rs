//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod chat_widget;
pub mod guard;
pub mod loading;
pub mod nav;
pub mod notification_bell;
pub mod table;
pub mod toast;

pub use chat_widget::ChatWidget;
pub use guard::RequireRole;
pub use loading::{ErrorBanner, Loading};
pub use nav::Nav;
pub use notification_bell::NotificationBell;
pub use toast::Toast;
