//! Loading Component
//!
//! Spinners and the static error banner shown when a page fetch fails.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}

#[component]
pub fn ErrorBanner(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-red-900/40 border border-red-700 text-red-200 rounded-lg px-4 py-3">
            {message}
        </div>
    }
}
