//! Notification Bell
//!
//! Badge with the unread count and a dropdown of unread notifications.
//! Clicking anywhere outside the bell closes the dropdown.

use leptos::*;
use wasm_bindgen::JsCast;

use servicebay::api::dto::{Notification, NotificationType, Role};

use crate::state::notifications::{mark_all_read, mark_read, mount_notifications, refresh_unread};
use crate::state::use_session;

fn type_color(kind: NotificationType) -> &'static str {
    match kind {
        NotificationType::Success => "border-green-500",
        NotificationType::Warning => "border-yellow-500",
        NotificationType::Error => "border-red-500",
        NotificationType::Info => "border-blue-500",
    }
}

#[component]
pub fn NotificationBell(role: Role) -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let center = mount_notifications(role, api.clone());
    let container = create_node_ref::<html::Div>();

    let outside_click = window_event_listener(ev::click, move |ev| {
        let Some(el) = container.get_untracked() else {
            return;
        };
        let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        if !el.contains(target.as_ref()) {
            center.try_update(|c| c.close());
        }
    });
    on_cleanup(move || outside_click.remove());

    let api_for_toggle = api.clone();
    let toggle = move |_| {
        let opened = center.try_update(|c| c.toggle()).unwrap_or(false);
        if opened {
            refresh_unread(center, api_for_toggle.clone());
        }
    };

    let api_for_all = api.clone();

    view! {
        <div class="relative" node_ref=container>
            <button
                on:click=toggle
                class="relative p-2 rounded-lg hover:bg-gray-700 transition-colors"
                aria-label="Notifications"
            >
                <span class="text-xl">"🔔"</span>
                {move || center.with(|c| c.badge()).map(|badge| view! {
                    <span class="absolute -top-1 -right-1 bg-red-600 text-white text-xs rounded-full px-1.5">
                        {badge}
                    </span>
                })}
            </button>

            <Show when=move || center.with(|c| c.is_open())>
                <div class="absolute right-0 mt-2 w-80 bg-gray-800 border border-gray-700 rounded-xl shadow-xl z-40">
                    <div class="flex items-center justify-between px-4 py-3 border-b border-gray-700">
                        <span class="font-semibold">"Notifications"</span>
                        <button
                            on:click={
                                let api = api_for_all.clone();
                                move |_| mark_all_read(center, api.clone())
                            }
                            class="text-xs text-primary-400 hover:text-primary-300"
                        >
                            "Mark all read"
                        </button>
                    </div>

                    <div class="max-h-96 overflow-y-auto">
                        {
                            let api = api.clone();
                            move || {
                                let unread = center.with(|c| c.unread().to_vec());
                                if unread.is_empty() {
                                    view! {
                                        <p class="px-4 py-6 text-center text-sm text-gray-400">
                                            "No new notifications"
                                        </p>
                                    }.into_view()
                                } else {
                                    unread
                                        .into_iter()
                                        .map(|n| notification_item(n, center, api.clone()))
                                        .collect_view()
                                }
                            }
                        }
                    </div>
                </div>
            </Show>
        </div>
    }
}

fn notification_item(
    notification: Notification,
    center: RwSignal<servicebay::notifications::NotificationCenter>,
    api: crate::api::Api,
) -> View {
    let id = notification.id;

    view! {
        <div class=format!("px-4 py-3 border-l-4 {} hover:bg-gray-700/50", type_color(notification.kind))>
            <div class="flex items-start justify-between">
                <div>
                    <p class="text-sm font-medium">{notification.title}</p>
                    <p class="text-xs text-gray-400 mt-1">{notification.message}</p>
                    <p class="text-xs text-gray-500 mt-1">
                        {notification.created_at.format("%b %d, %H:%M").to_string()}
                    </p>
                </div>
                <button
                    on:click=move |_| mark_read(center, api.clone(), id)
                    class="text-xs text-gray-400 hover:text-white ml-2"
                    title="Mark as read"
                >
                    "✓"
                </button>
            </div>
        </div>
    }
    .into_view()
}
