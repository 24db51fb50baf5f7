//! Vehicles Page
//!
//! Vehicle list with search, sorting and paging. Customers see their own
//! vehicles and can register new ones; staff see every vehicle.

use leptos::*;

use servicebay::api::dto::{NewVehicle, Role, Vehicle};

use crate::components::table::{cell, data_table, load_list, opt, search_box, ListResource};
use crate::state::global::use_global_state;
use crate::state::use_session;

#[component]
pub fn Vehicles() -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let resource = load_list(async move { api.vehicles().await }, "Failed to load vehicles");
    let (show_add, set_show_add) = create_signal(false);

    let title = move || match session.role() {
        Some(Role::Customer) => "My Vehicles",
        _ => "Vehicles",
    };

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">{title}</h1>
                    <p class="text-gray-400 mt-1">"Registered vehicles"</p>
                </div>
                <div class="flex items-center gap-3">
                    {search_box(resource.list, "Search make, model, plate...")}
                    <button
                        on:click=move |_| set_show_add.update(|v| *v = !*v)
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium"
                    >
                        "+ Add Vehicle"
                    </button>
                </div>
            </div>

            <Show when=move || show_add.get()>
                <AddVehicleForm resource=resource on_done=move || set_show_add.set(false) />
            </Show>

            {data_table(resource, Some(""), move |v: Vehicle| vehicle_row(v, resource))}
        </div>
    }
}

fn vehicle_row(vehicle: Vehicle, resource: ListResource<Vehicle>) -> View {
    let session = use_session();
    let state = use_global_state();
    let id = vehicle.id;

    let remove = move |_| {
        let api = session.api();
        spawn_local(async move {
            match api.delete_vehicle(id).await {
                Ok(()) => {
                    resource.list.try_update(|l| l.remove_where(|v| v.id == id));
                    state.show_success("Vehicle removed");
                }
                Err(e) => state.show_error(&e.to_string()),
            }
        });
    };

    view! {
        <tr class="hover:bg-gray-700/40">
            {cell(vehicle.id)}
            {cell(vehicle.make)}
            {cell(vehicle.model)}
            {cell(vehicle.year)}
            {cell(vehicle.license_plate)}
            {cell(opt(vehicle.customer_name))}
            {cell(opt(vehicle.created_at.map(|d| d.format("%Y-%m-%d"))))}
            <td class="px-4 py-3 text-right">
                <button on:click=remove class="text-xs text-red-400 hover:text-red-300">"Remove"</button>
            </td>
        </tr>
    }
    .into_view()
}

#[component]
fn AddVehicleForm<F>(resource: ListResource<Vehicle>, on_done: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let session = use_session();
    let state = use_global_state();

    let make = create_rw_signal(String::new());
    let model = create_rw_signal(String::new());
    let year = create_rw_signal(String::new());
    let plate = create_rw_signal(String::new());
    let color = create_rw_signal(String::new());

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let Ok(year_value) = year.get_untracked().trim().parse::<i32>() else {
            state.show_error("Year must be a number");
            return;
        };
        let vehicle = NewVehicle {
            make: make.get_untracked(),
            model: model.get_untracked(),
            year: year_value,
            license_plate: plate.get_untracked(),
            vin: None,
            color: Some(color.get_untracked()).filter(|c| !c.trim().is_empty()),
            customer_id: session.user_id_untracked().filter(|_| session.role() == Some(Role::Customer)),
        };

        let api = session.api();
        spawn_local(async move {
            match api.create_vehicle(&vehicle).await {
                Ok(created) => {
                    resource.list.try_update(|l| {
                        let mut items = l.items().to_vec();
                        items.push(created);
                        l.set_items(items);
                    });
                    state.show_success("Vehicle registered");
                    on_done();
                }
                Err(e) => state.show_error(&e.to_string()),
            }
        });
    };

    let input = move |label: &'static str, value: RwSignal<String>| {
        view! {
            <input
                type="text"
                placeholder=label
                class="bg-gray-700 border border-gray-600 rounded-lg px-3 py-2 text-sm"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <form on:submit=submit class="bg-gray-800 rounded-xl p-4 grid md:grid-cols-6 gap-3">
            {input("Make", make)}
            {input("Model", model)}
            {input("Year", year)}
            {input("License plate", plate)}
            {input("Color", color)}
            <button type="submit" class="bg-primary-600 hover:bg-primary-700 rounded-lg text-sm font-medium">
                "Save"
            </button>
        </form>
    }
}
