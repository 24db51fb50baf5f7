//! API Layer
//!
//! Wire types, endpoint paths and error taxonomy for the booking platform
//! API. The `reqwest` client and its typed endpoint methods are only built
//! with the `native` feature; the browser front end brings its own transport
//! and reuses everything else.

pub mod dto;
pub mod error;
pub mod paths;

#[cfg(feature = "native")]
mod client;
#[cfg(feature = "native")]
mod endpoints;

pub use dto::*;
pub use error::{ClientError, ClientResult};

#[cfg(feature = "native")]
pub use client::{ApiClient, ClientConfig};
