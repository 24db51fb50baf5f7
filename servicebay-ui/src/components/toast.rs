//! Toast Notification Component
//!
//! Shows success and error messages.

use leptos::*;

use crate::state::global::use_global_state;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div class="fixed bottom-6 right-4 z-50 space-y-2">
            {move || {
                state.success.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Success />
                })
            }}

            {move || {
                state.error.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Error />
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy)]
enum ToastVariant {
    Success,
    Error,
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    variant: ToastVariant,
) -> impl IntoView {
    let (icon, bg_class) = match variant {
        ToastVariant::Success => ("✓", "bg-green-600"),
        ToastVariant::Error => ("✕", "bg-red-600"),
    };

    view! {
        <div class=format!(
            "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg animate-slide-in",
            bg_class
        )>
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}
