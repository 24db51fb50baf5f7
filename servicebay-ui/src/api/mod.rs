//! API Module
//!
//! HTTP transport for the booking platform API.

pub mod client;

pub use client::*;
