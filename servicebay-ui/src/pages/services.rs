//! Services Page
//!
//! The service catalogue, open to everyone.

use leptos::*;

use servicebay::api::dto::ServiceOffering;

use crate::components::table::{cell, data_table, load_list, opt, search_box};
use crate::state::use_session;

#[component]
pub fn Services() -> impl IntoView {
    let api = use_session().api();
    let resource = load_list(async move { api.services().await }, "Failed to load services");

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Services"</h1>
                    <p class="text-gray-400 mt-1">"What the workshop offers"</p>
                </div>
                {search_box(resource.list, "Search services...")}
            </div>

            {data_table(resource, None, |s: ServiceOffering| {
                let muted = if s.active { "" } else { "opacity-50" };
                view! {
                    <tr class=format!("hover:bg-gray-700/40 {}", muted)>
                        {cell(s.id)}
                        <td class="px-4 py-3">
                            <div class="font-medium">{s.name}</div>
                            <div class="text-xs text-gray-400">{s.description.unwrap_or_default()}</div>
                        </td>
                        {cell(format!("${:.2}", s.price))}
                        {cell(opt(s.duration_minutes.map(|m| format!("{} min", m))))}
                    </tr>
                }
                .into_view()
            })}
        </div>
    }
}
