//! ServiceBay Web
//!
//! Browser front end for the vehicle service booking platform, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - Role-guarded dashboards for admins, employees and customers
//! - Notification bell polled every 30 seconds
//! - Booking assistant chat with clickable slot cards
//! - Sortable, searchable, paginated record tables
//!
//! # Architecture
//!
//! Client-side rendered Leptos app. Session, guard, notification, chat and
//! listing state come from the `servicebay` crate built without its native
//! feature; this crate adds the gloo-net transport and the views.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
