//! Notification Polling
//!
//! Drives a shared [`NotificationCenter`] from the browser. The count is
//! re-fetched every [`POLL_INTERVAL_MS`]; the timer is dropped with the
//! component that mounted it, and replies landing after that are ignored
//! because the signal is gone.

use gloo_timers::callback::Interval;
use leptos::*;

use servicebay::api::dto::Role;
use servicebay::notifications::{NotificationCenter, POLL_INTERVAL_MS};

use crate::api::Api;

fn warn(context: &str, error: impl std::fmt::Display) {
    web_sys::console::warn_1(&format!("{}: {}", context, error).into());
}

/// Create the bell state, fetch list and count, and start polling
pub fn mount_notifications(role: Role, api: Api) -> RwSignal<NotificationCenter> {
    let center = create_rw_signal(NotificationCenter::new(role));

    refresh_unread(center, api.clone());
    refresh_count(center, api.clone());

    let interval = Interval::new(POLL_INTERVAL_MS, move || refresh_count(center, api.clone()));
    on_cleanup(move || drop(interval));

    center
}

pub fn refresh_count(center: RwSignal<NotificationCenter>, api: Api) {
    let Some(role) = center.try_with_untracked(|c| c.role()) else {
        return;
    };

    spawn_local(async move {
        match api.unread_count(role).await {
            Ok(count) => {
                center.try_update(|c| c.apply_count(count));
            }
            Err(e) => warn("Unread count poll failed", e),
        }
    });
}

pub fn refresh_unread(center: RwSignal<NotificationCenter>, api: Api) {
    let Some(role) = center.try_with_untracked(|c| c.role()) else {
        return;
    };

    spawn_local(async move {
        match api.unread_notifications(role).await {
            Ok(list) => {
                center.try_update(|c| c.apply_unread(list));
            }
            Err(e) => warn("Failed to fetch notifications", e),
        }
    });
}

/// Remove locally first, then tell the server
pub fn mark_read(center: RwSignal<NotificationCenter>, api: Api, id: i64) {
    center.update(|c| {
        c.mark_read(id);
    });

    spawn_local(async move {
        if let Err(e) = api.mark_notification_read(id).await {
            warn("Failed to mark notification read", e);
            center.try_update(|c| c.restore_dismissed(id));
        }
    });
}

/// Clear locally first, then tell the server
pub fn mark_all_read(center: RwSignal<NotificationCenter>, api: Api) {
    let role = center.with_untracked(|c| c.role());
    let ids = center.try_update(|c| c.mark_all_read()).unwrap_or_default();

    spawn_local(async move {
        if let Err(e) = api.mark_all_notifications_read(role).await {
            warn("Failed to mark all notifications read", e);
            center.try_update(|c| ids.iter().for_each(|&id| c.restore_dismissed(id)));
        }
    });
}
