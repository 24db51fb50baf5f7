//! Notifications
//!
//! The bell: a per-role unread list and badge count kept fresh by polling.
//! [`NotificationCenter`] is plain state shared with the browser front end;
//! [`NotificationPoller`] drives it from tokio.

mod center;
#[cfg(feature = "native")]
mod poller;

pub use center::NotificationCenter;
#[cfg(feature = "native")]
pub use poller::{NotificationPoller, DEFAULT_POLL_INTERVAL};

/// Poll interval used by front ends without their own configuration
pub const POLL_INTERVAL_MS: u32 = 30_000;
