//! Home Page
//!
//! Public landing page with the booking assistant.

use leptos::*;
use leptos_router::*;

use crate::components::ChatWidget;
use crate::state::use_session;

#[component]
pub fn Home() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="space-y-12">
            <section class="text-center py-16">
                <h1 class="text-5xl font-bold">"Vehicle service, booked in minutes"</h1>
                <p class="text-gray-400 mt-4 text-lg">
                    "Ask the assistant for a free slot, or sign in to manage your vehicles."
                </p>
                <div class="mt-8 flex justify-center gap-4">
                    {move || match session.role() {
                        Some(role) => view! {
                            <A href=role.landing_path() class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium">
                                "Go to dashboard"
                            </A>
                        }.into_view(),
                        None => view! {
                            <A href="/login" class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium">
                                "Log in"
                            </A>
                            <A href="/register" class="px-6 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium">
                                "Create account"
                            </A>
                        }.into_view(),
                    }}
                </div>
            </section>

            <section class="grid md:grid-cols-3 gap-6">
                <Feature icon="🗓️" title="Instant slots" text="The assistant lists open slots for the day you ask about." />
                <Feature icon="🚗" title="Your garage" text="Keep every vehicle and its service history in one place." />
                <Feature icon="🔔" title="Stay informed" text="Get notified when a booking or request changes." />
            </section>

            <ChatWidget />
        </div>
    }
}

#[component]
fn Feature(icon: &'static str, title: &'static str, text: &'static str) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <div class="text-3xl">{icon}</div>
            <h3 class="text-lg font-semibold mt-3">{title}</h3>
            <p class="text-gray-400 mt-1 text-sm">{text}</p>
        </div>
    }
}
