//! Leaves Page
//!
//! Leave requests. Admins approve or reject pending requests; employees
//! see their own and apply for new ones.

use chrono::NaiveDate;
use leptos::*;

use servicebay::api::dto::{Leave, LeaveStatus, NewLeave, Role};

use crate::components::table::{cell, data_table, load_list, opt, search_box, ListResource};
use crate::state::global::use_global_state;
use crate::state::use_session;

fn status_badge(status: LeaveStatus) -> impl IntoView {
    let color = match status {
        LeaveStatus::Pending => "bg-yellow-600",
        LeaveStatus::Approved => "bg-green-600",
        LeaveStatus::Rejected => "bg-red-600",
    };
    view! {
        <span class=format!("{} text-xs px-2 py-0.5 rounded-full text-white", color)>
            {status.as_str()}
        </span>
    }
}

#[component]
pub fn Leaves() -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let resource = load_list(async move { api.leaves().await }, "Failed to load leave requests");
    let is_admin = move || session.role() == Some(Role::Admin);

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Leave Requests"</h1>
                    <p class="text-gray-400 mt-1">
                        {move || if is_admin() { "Review staff leave" } else { "Your leave requests" }}
                    </p>
                </div>
                {search_box(resource.list, "Search employee, type, status...")}
            </div>

            <Show when=move || session.role() == Some(Role::Employee)>
                <ApplyLeaveForm resource=resource />
            </Show>

            {data_table(resource, Some("Actions"), move |l: Leave| leave_row(l, resource))}
        </div>
    }
}

fn leave_row(leave: Leave, resource: ListResource<Leave>) -> View {
    let session = use_session();
    let state = use_global_state();
    let id = leave.id;
    let actionable = leave.status == LeaveStatus::Pending;

    let decide = move |approve: bool| {
        let api = session.api();
        spawn_local(async move {
            let (result, status, verb) = if approve {
                (api.approve_leave(id).await, LeaveStatus::Approved, "approved")
            } else {
                (api.reject_leave(id).await, LeaveStatus::Rejected, "rejected")
            };

            match result {
                Ok(()) => {
                    resource
                        .list
                        .try_update(|l| l.update_where(|x| x.id == id, |x| x.status = status));
                    state.show_success(&format!("Leave request {}", verb));
                }
                Err(e) => state.show_error(&e.to_string()),
            }
        });
    };

    view! {
        <tr class="hover:bg-gray-700/40">
            {cell(leave.id)}
            {cell(opt(leave.employee_name))}
            {cell(leave.leave_type)}
            {cell(leave.start_date.to_string())}
            {cell(leave.end_date.to_string())}
            <td class="px-4 py-3">{status_badge(leave.status)}</td>
            {cell(opt(leave.created_at.map(|d| d.format("%Y-%m-%d"))))}
            <td class="px-4 py-3 space-x-2">
                <Show when=move || actionable && session.role() == Some(Role::Admin)>
                    <button on:click=move |_| decide(true) class="text-xs text-green-400 hover:text-green-300">
                        "Approve"
                    </button>
                    <button on:click=move |_| decide(false) class="text-xs text-red-400 hover:text-red-300">
                        "Reject"
                    </button>
                </Show>
            </td>
        </tr>
    }
    .into_view()
}

/// Leave application form; new requests are added to `resource`
#[component]
pub fn ApplyLeaveForm(resource: ListResource<Leave>) -> impl IntoView {
    let session = use_session();
    let state = use_global_state();

    let leave_type = create_rw_signal("ANNUAL".to_string());
    let start = create_rw_signal(String::new());
    let end = create_rw_signal(String::new());
    let reason = create_rw_signal(String::new());

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let parse = |s: String| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok();
        let (Some(start_date), Some(end_date)) = (parse(start.get_untracked()), parse(end.get_untracked())) else {
            state.show_error("Pick a start and end date");
            return;
        };
        if end_date < start_date {
            state.show_error("Leave cannot end before it starts");
            return;
        }

        let leave = NewLeave {
            leave_type: leave_type.get_untracked(),
            start_date,
            end_date,
            reason: Some(reason.get_untracked()).filter(|r| !r.trim().is_empty()),
        };

        let api = session.api();
        spawn_local(async move {
            match api.apply_leave(&leave).await {
                Ok(created) => {
                    resource.list.try_update(|l| {
                        let mut items = l.items().to_vec();
                        items.push(created);
                        l.set_items(items);
                    });
                    reason.try_set(String::new());
                    state.show_success("Leave request submitted");
                }
                Err(e) => state.show_error(&e.to_string()),
            }
        });
    };

    view! {
        <form on:submit=submit class="bg-gray-800 rounded-xl p-4 grid md:grid-cols-5 gap-3 items-end">
            <label class="text-sm">
                <span class="block text-gray-400 mb-1">"Type"</span>
                <select
                    class="w-full bg-gray-700 rounded-lg px-3 py-2"
                    on:change=move |ev| leave_type.set(event_target_value(&ev))
                >
                    <option value="ANNUAL" selected=true>"Annual"</option>
                    <option value="SICK">"Sick"</option>
                    <option value="PERSONAL">"Personal"</option>
                </select>
            </label>
            <label class="text-sm">
                <span class="block text-gray-400 mb-1">"From"</span>
                <input
                    type="date"
                    class="w-full bg-gray-700 rounded-lg px-3 py-2"
                    on:input=move |ev| start.set(event_target_value(&ev))
                />
            </label>
            <label class="text-sm">
                <span class="block text-gray-400 mb-1">"To"</span>
                <input
                    type="date"
                    class="w-full bg-gray-700 rounded-lg px-3 py-2"
                    on:input=move |ev| end.set(event_target_value(&ev))
                />
            </label>
            <label class="text-sm">
                <span class="block text-gray-400 mb-1">"Reason"</span>
                <input
                    type="text"
                    class="w-full bg-gray-700 rounded-lg px-3 py-2"
                    prop:value=move || reason.get()
                    on:input=move |ev| reason.set(event_target_value(&ev))
                />
            </label>
            <button type="submit" class="py-2 bg-primary-600 hover:bg-primary-700 rounded-lg text-sm font-medium">
                "Apply"
            </button>
        </form>
    }
}
