//! Profile Page

use leptos::*;

use servicebay::api::dto::{Profile, ProfileUpdate};

use crate::components::{ErrorBanner, Loading};
use crate::state::global::use_global_state;
use crate::state::use_session;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let profile = create_rw_signal(None::<Profile>);
    let (error, set_error) = create_signal(None::<String>);

    if let Some(user_id) = session.user_id_untracked() {
        let api = session.api();
        spawn_local(async move {
            match api.profile(user_id).await {
                Ok(p) => {
                    profile.try_set(Some(p));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to load profile: {}", e).into());
                    set_error.try_set(Some("Failed to load profile".to_string()));
                }
            }
        });
    }

    view! {
        <div class="max-w-2xl space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Profile"</h1>
                <p class="text-gray-400 mt-1">"Your account details"</p>
            </div>

            {move || match (profile.get(), error.get()) {
                (_, Some(message)) => view! { <ErrorBanner message=message /> }.into_view(),
                (None, None) => view! { <Loading /> }.into_view(),
                (Some(p), None) => view! { <ProfileForm profile=p on_saved=move |p: Profile| profile.set(Some(p)) /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn ProfileForm<F>(profile: Profile, on_saved: F) -> impl IntoView
where
    F: Fn(Profile) + Copy + 'static,
{
    let session = use_session();
    let state = use_global_state();
    let user_id = profile.id;

    let email = create_rw_signal(profile.email.clone());
    let first = create_rw_signal(profile.first_name.clone().unwrap_or_default());
    let last = create_rw_signal(profile.last_name.clone().unwrap_or_default());
    let phone = create_rw_signal(profile.phone_number.clone().unwrap_or_default());
    let (saving, set_saving) = create_signal(false);

    let original = store_value(profile.clone());

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let changed = |value: String, current: Option<&str>| {
            let value = value.trim().to_string();
            (Some(value.as_str()) != current && !value.is_empty()).then_some(value)
        };

        let update = original.with_value(|p| ProfileUpdate {
            email: changed(email.get_untracked(), Some(p.email.as_str())),
            first_name: changed(first.get_untracked(), p.first_name.as_deref()),
            last_name: changed(last.get_untracked(), p.last_name.as_deref()),
            phone_number: changed(phone.get_untracked(), p.phone_number.as_deref()),
        });

        if update.is_empty() {
            state.show_success("Nothing to update");
            return;
        }

        set_saving.set(true);
        let api = session.api();
        spawn_local(async move {
            match api.update_profile(user_id, &update).await {
                Ok(saved) => {
                    original.set_value(saved.clone());
                    state.show_success("Profile updated");
                    on_saved(saved);
                }
                Err(e) => state.show_error(&e.to_string()),
            }
            set_saving.try_set(false);
        });
    };

    let field = move |label: &'static str, value: RwSignal<String>| {
        view! {
            <label class="block">
                <span class="block text-sm text-gray-400 mb-1">{label}</span>
                <input
                    type="text"
                    class="w-full bg-gray-700 border border-gray-600 rounded-lg px-4 py-2 focus:border-primary-500 focus:outline-none"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <form on:submit=submit class="bg-gray-800 rounded-xl p-6 space-y-4">
            <div class="flex items-center justify-between text-sm">
                <span class="text-gray-400">"Username"</span>
                <span class="font-medium">{profile.username}</span>
            </div>
            <div class="flex items-center justify-between text-sm">
                <span class="text-gray-400">"Role"</span>
                <span class="font-medium">{profile.role.map(|r| r.as_str()).unwrap_or("-")}</span>
            </div>

            {field("Email", email)}
            <div class="grid grid-cols-2 gap-4">
                {field("First name", first)}
                {field("Last name", last)}
            </div>
            {field("Phone", phone)}

            <button
                type="submit"
                disabled=move || saving.get()
                class="w-full py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg font-medium"
            >
                {move || if saving.get() { "Saving..." } else { "Save changes" }}
            </button>
        </form>
    }
}
