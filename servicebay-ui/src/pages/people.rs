//! Customers and Employees Pages

use leptos::*;

use servicebay::api::dto::{Customer, Employee};

use crate::components::table::{cell, data_table, load_list, opt, search_box};
use crate::state::use_session;

fn date(value: Option<chrono::NaiveDateTime>) -> String {
    opt(value.map(|d| d.format("%Y-%m-%d")))
}

#[component]
pub fn Customers() -> impl IntoView {
    let api = use_session().api();
    let resource = load_list(async move { api.customers().await }, "Failed to load customers");

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Customers"</h1>
                    <p class="text-gray-400 mt-1">"Everyone with a customer account"</p>
                </div>
                {search_box(resource.list, "Search name, email, phone...")}
            </div>

            {data_table(resource, None, |c: Customer| {
                let name = c.full_name();
                view! {
                    <tr class="hover:bg-gray-700/40">
                        {cell(c.id)}
                        {cell(c.username)}
                        {cell(opt(name))}
                        {cell(c.email)}
                        {cell(opt(c.phone_number))}
                        {cell(date(c.created_at))}
                    </tr>
                }
                .into_view()
            })}
        </div>
    }
}

#[component]
pub fn Employees() -> impl IntoView {
    let api = use_session().api();
    let resource = load_list(async move { api.employees().await }, "Failed to load employees");

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Employees"</h1>
                    <p class="text-gray-400 mt-1">"Workshop staff"</p>
                </div>
                {search_box(resource.list, "Search name, email, specialization...")}
            </div>

            {data_table(resource, None, |e: Employee| {
                let name = e.full_name();
                view! {
                    <tr class="hover:bg-gray-700/40">
                        {cell(e.id)}
                        {cell(e.username)}
                        {cell(opt(name))}
                        {cell(e.email)}
                        {cell(opt(e.specialization))}
                        {cell(date(e.created_at))}
                    </tr>
                }
                .into_view()
            })}
        </div>
    }
}
