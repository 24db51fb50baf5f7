//! Login and Registration Pages

use leptos::*;
use leptos_router::*;

use servicebay::api::dto::{RegisterRequest, Role};

use crate::state::global::use_global_state;
use crate::state::use_session;

const INPUT_CLASS: &str =
    "w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2 focus:outline-none focus:border-primary-500";

#[component]
pub fn Login() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    // Signed in, now or already: go to the role's dashboard
    create_effect(move |_| {
        if let Some(role) = session.role() {
            navigate(role.landing_path(), Default::default());
        }
    });

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        spawn_local(async move {
            let outcome = session
                .login(username.get_untracked(), password.get_untracked())
                .await;

            if !outcome.success {
                set_error.try_set(Some(outcome.message));
            }
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8 mt-12">
            <h1 class="text-2xl font-bold mb-6">"Log in"</h1>

            <form on:submit=submit class="space-y-4">
                <input
                    type="text"
                    placeholder="Username"
                    class=INPUT_CLASS
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    class=INPUT_CLASS
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                {move || error.get().map(|msg| view! {
                    <p class="text-sm text-red-400">{msg}</p>
                })}

                <button
                    type="submit"
                    disabled=move || session.is_loading()
                    class="w-full py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium disabled:opacity-50"
                >
                    {move || if session.is_loading() { "Logging in..." } else { "Log in" }}
                </button>
            </form>

            <p class="text-sm text-gray-400 mt-6">
                "No account yet? "
                <A href="/register" class="text-primary-400 hover:underline">"Register"</A>
            </p>
        </div>
    }
}

#[component]
pub fn Register() -> impl IntoView {
    let session = use_session();
    let state = use_global_state();
    let navigate = use_navigate();

    let username = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let first_name = create_rw_signal(String::new());
    let last_name = create_rw_signal(String::new());
    let phone = create_rw_signal(String::new());
    let role = create_rw_signal(Role::Customer);
    let (submitting, set_submitting) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_submitting.set(true);

        let phone_number = Some(phone.get_untracked()).filter(|p| !p.trim().is_empty());
        let request = RegisterRequest {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            phone_number,
            role: role.get_untracked(),
        };

        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = session.register(request).await;
            set_submitting.try_set(false);

            if outcome.success {
                state.show_success(&outcome.message);
                navigate("/login", Default::default());
            } else {
                set_error.try_set(Some(outcome.message));
            }
        });
    };

    let field = move |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <input
                type=kind
                placeholder=label
                class=INPUT_CLASS
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8 mt-12">
            <h1 class="text-2xl font-bold mb-6">"Create an account"</h1>

            <form on:submit=submit class="space-y-4">
                {field("Username", "text", username)}
                {field("Email", "email", email)}
                {field("Password", "password", password)}
                <div class="grid grid-cols-2 gap-3">
                    {field("First name", "text", first_name)}
                    {field("Last name", "text", last_name)}
                </div>
                {field("Phone (optional)", "tel", phone)}

                <select
                    class=INPUT_CLASS
                    on:change=move |ev| {
                        if let Ok(r) = event_target_value(&ev).parse::<Role>() {
                            role.set(r);
                        }
                    }
                >
                    <option value="CUSTOMER" selected=true>"Customer"</option>
                    <option value="EMPLOYEE">"Employee"</option>
                </select>

                {move || error.get().map(|msg| view! {
                    <p class="text-sm text-red-400">{msg}</p>
                })}

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium disabled:opacity-50"
                >
                    {move || if submitting.get() { "Registering..." } else { "Register" }}
                </button>
            </form>

            <p class="text-sm text-gray-400 mt-6">
                "Already registered? "
                <A href="/login" class="text-primary-400 hover:underline">"Log in"</A>
            </p>
        </div>
    }
}
