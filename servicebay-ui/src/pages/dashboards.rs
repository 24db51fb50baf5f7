//! Dashboard Pages
//!
//! Landing pages for each role after sign-in.

use leptos::*;
use leptos_router::*;

use servicebay::api::dto::{LeaveStatus, NewNotification, NotificationType, Role};
use servicebay::ClientResult;

use super::leaves::ApplyLeaveForm;
use crate::components::table::load_list;
use crate::components::{ChatWidget, Loading};
use crate::state::global::use_global_state;
use crate::state::use_session;

// ============ Shared ============

/// Count card; shows "-" when the fetch failed
#[component]
fn StatCard(
    label: &'static str,
    icon: &'static str,
    #[prop(into)] value: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-5">
            <div class="flex items-center justify-between">
                <span class="text-sm text-gray-400">{label}</span>
                <span class="text-xl">{icon}</span>
            </div>
            <div class="text-3xl font-bold mt-2">
                {move || value.get().unwrap_or_else(|| "…".to_string())}
            </div>
        </div>
    }
}

/// Fetch a list and keep only its length
fn count_of<T, F>(fetch: F) -> RwSignal<Option<String>>
where
    T: 'static,
    F: std::future::Future<Output = ClientResult<Vec<T>>> + 'static,
{
    let count = create_rw_signal(None);
    spawn_local(async move {
        let shown = match fetch.await {
            Ok(items) => items.len().to_string(),
            Err(e) => {
                web_sys::console::warn_1(&format!("Dashboard count failed: {}", e).into());
                "-".to_string()
            }
        };
        count.try_set(Some(shown));
    });
    count
}

fn welcome(title: &'static str) -> impl IntoView {
    let session = use_session();
    view! {
        <div>
            <h1 class="text-3xl font-bold">{title}</h1>
            <p class="text-gray-400 mt-1">
                {move || session.session().map(|s| format!("Welcome back, {}", s.user.username))}
            </p>
        </div>
    }
}

// ============ Admin ============

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let session = use_session();

    let customers = {
        let api = session.api();
        count_of(async move { api.customers().await })
    };
    let employees = {
        let api = session.api();
        count_of(async move { api.employees().await })
    };
    let vehicles = {
        let api = session.api();
        count_of(async move { api.vehicles().await })
    };
    let pending = {
        let api = session.api();
        count_of(async move {
            api.leaves()
                .await
                .map(|l| l.into_iter().filter(|l| l.status == LeaveStatus::Pending).collect::<Vec<_>>())
        })
    };

    view! {
        <div class="space-y-8">
            {welcome("Admin Dashboard")}

            <section class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <StatCard label="Customers" icon="👥" value=customers />
                <StatCard label="Employees" icon="🧑‍🔧" value=employees />
                <StatCard label="Vehicles" icon="🚗" value=vehicles />
                <A href="/leaves">
                    <StatCard label="Pending leave" icon="🗓️" value=pending />
                </A>
            </section>

            <BroadcastForm />
        </div>
    }
}

/// Create a notification for every account of one role
#[component]
fn BroadcastForm() -> impl IntoView {
    let session = use_session();
    let state = use_global_state();

    let title = create_rw_signal(String::new());
    let message = create_rw_signal(String::new());
    let kind = create_rw_signal(NotificationType::Info);
    let target = create_rw_signal(Role::Customer);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let notification = NewNotification {
            title: title.get_untracked().trim().to_string(),
            message: message.get_untracked().trim().to_string(),
            kind: kind.get_untracked(),
            target_role: target.get_untracked(),
        };
        if notification.title.is_empty() || notification.message.is_empty() {
            state.show_error("Title and message are required");
            return;
        }

        let api = session.api();
        spawn_local(async move {
            match api.create_notification(&notification).await {
                Ok(_) => {
                    title.try_set(String::new());
                    message.try_set(String::new());
                    state.show_success(&format!("Notification sent to {}", notification.target_role));
                }
                Err(e) => state.show_error(&e.to_string()),
            }
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Send Notification"</h2>
            <form on:submit=submit class="space-y-4">
                <div class="grid md:grid-cols-3 gap-4">
                    <input
                        type="text"
                        placeholder="Title"
                        class="md:col-span-1 bg-gray-700 border border-gray-600 rounded-lg px-4 py-2"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <select
                        class="bg-gray-700 border border-gray-600 rounded-lg px-4 py-2"
                        on:change=move |ev| {
                            if let Ok(k) = event_target_value(&ev).parse() {
                                kind.set(k);
                            }
                        }
                    >
                        {[NotificationType::Info, NotificationType::Success, NotificationType::Warning, NotificationType::Error]
                            .into_iter()
                            .map(|k| view! {
                                <option value=k.as_str() selected=move || kind.get() == k>{k.as_str()}</option>
                            })
                            .collect_view()}
                    </select>
                    <select
                        class="bg-gray-700 border border-gray-600 rounded-lg px-4 py-2"
                        on:change=move |ev| {
                            if let Ok(r) = event_target_value(&ev).parse() {
                                target.set(r);
                            }
                        }
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|r| view! {
                                <option value=r.as_str() selected=move || target.get() == r>{r.as_str()}</option>
                            })
                            .collect_view()}
                    </select>
                </div>
                <textarea
                    rows="3"
                    placeholder="Message"
                    class="w-full bg-gray-700 border border-gray-600 rounded-lg px-4 py-2"
                    prop:value=move || message.get()
                    on:input=move |ev| message.set(event_target_value(&ev))
                />
                <button type="submit" class="px-6 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium">
                    "Send"
                </button>
            </form>
        </section>
    }
}

// ============ Employee ============

#[component]
pub fn EmployeeDashboard() -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let leaves = load_list(async move { api.leaves().await }, "Failed to load leave requests");

    let count = move |status: LeaveStatus| {
        Signal::derive(move || {
            (!leaves.loading.get())
                .then(|| leaves.list.with(|l| l.items().iter().filter(|x| x.status == status).count().to_string()))
        })
    };

    view! {
        <div class="space-y-8">
            {welcome("Employee Dashboard")}

            <section class="grid grid-cols-3 gap-4">
                <StatCard label="Pending" icon="⏳" value=count(LeaveStatus::Pending) />
                <StatCard label="Approved" icon="✅" value=count(LeaveStatus::Approved) />
                <StatCard label="Rejected" icon="❌" value=count(LeaveStatus::Rejected) />
            </section>

            <section class="space-y-3">
                <div class="flex items-center justify-between">
                    <h2 class="text-xl font-semibold">"Request Leave"</h2>
                    <A href="/leaves" class="text-sm text-primary-400 hover:text-primary-300">"All requests →"</A>
                </div>
                <ApplyLeaveForm resource=leaves />
            </section>
        </div>
    }
}

// ============ Customer ============

#[component]
pub fn CustomerDashboard() -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let vehicles = load_list(async move { api.vehicles().await }, "Failed to load vehicles");

    view! {
        <div class="space-y-8">
            {welcome("My Dashboard")}

            <section class="bg-gray-800 rounded-xl p-6">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-semibold">"My Vehicles"</h2>
                    <A href="/vehicles" class="text-sm text-primary-400 hover:text-primary-300">"Manage →"</A>
                </div>
                {move || {
                    if vehicles.loading.get() {
                        return view! { <Loading /> }.into_view();
                    }
                    let items = vehicles.list.with(|l| l.items().to_vec());
                    if items.is_empty() {
                        return view! {
                            <p class="text-gray-400">"No vehicles yet. Add one to start booking."</p>
                        }
                        .into_view();
                    }
                    items
                        .into_iter()
                        .map(|v| view! {
                            <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                <span>{format!("{} {} ({})", v.make, v.model, v.year)}</span>
                                <span class="text-sm text-gray-400">{v.license_plate}</span>
                            </div>
                        })
                        .collect_view()
                }}
            </section>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold">"Book a Service"</h2>
                <p class="text-gray-400 mt-1">
                    "Open the assistant and ask for a date. Pick a slot to fill in the request."
                </p>
                <A href="/services" class="inline-block mt-4 text-sm text-primary-400 hover:text-primary-300">
                    "Browse services →"
                </A>
            </section>

            <ChatWidget />
        </div>
    }
}
