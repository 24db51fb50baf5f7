//! # ServiceBay
//!
//! Client for a vehicle service booking platform: session handling with
//! role-based route guarding, a polled notification bell, a booking
//! assistant chat, and sortable, filterable, paginated record lists.
//!
//! ## Modules
//!
//! - [`api`]: wire types, endpoint paths, error taxonomy and the HTTP client
//! - [`session`]: persisted session and the auth state machine
//! - [`guard`]: token decoding and role-based access decisions
//! - [`notifications`]: unread list, badge count and the poller
//! - [`chat`]: booking assistant conversation and slot cards
//! - [`listing`]: filter, sort and paginate fetched records
//! - [`config`]: TOML configuration with environment overrides
//!
//! Everything except the HTTP client, the poller, file storage and the
//! configuration loader builds without the default `native` feature, so the
//! browser front end shares the same state logic.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use servicebay::{ApiClient, AuthService, ClientConfig, MemoryStorage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default())?;
//!     let mut auth = AuthService::restore(client, MemoryStorage::new());
//!
//!     let outcome = auth.login("alice", "secret").await;
//!     println!("{}", outcome.message);
//!
//!     let vehicles = auth.authorized_client()?.vehicles().await?;
//!     println!("{} vehicles", vehicles.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chat;
#[cfg(feature = "native")]
pub mod config;
pub mod guard;
pub mod listing;
pub mod notifications;
pub mod session;

pub use api::{ClientError, ClientResult, Role};

#[cfg(feature = "native")]
pub use api::{ApiClient, ClientConfig};

pub use session::{AuthContext, AuthOutcome, AuthStatus, MemoryStorage, Session, SessionStorage};

#[cfg(feature = "native")]
pub use session::{AuthService, FileStorage};

pub use guard::{check_access, check_access_now, GuardDecision};

pub use notifications::NotificationCenter;

#[cfg(feature = "native")]
pub use notifications::NotificationPoller;

pub use chat::{ChatMessage, ChatSession};

#[cfg(feature = "native")]
pub use chat::ChatService;

pub use listing::{ListView, Listable, SortDirection, SortState};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
