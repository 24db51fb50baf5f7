//! Route Guard Component
//!
//! Renders its children only when the stored token carries one of the
//! allowed roles; otherwise redirects the way the shared guard decides.

use leptos::*;
use leptos_router::*;

use servicebay::api::dto::Role;
use servicebay::guard::{check_access_now, GuardDecision};

use crate::state::use_session;

#[component]
pub fn RequireRole(allowed: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let decision = create_memo(move |_| check_access_now(session.token().as_deref(), allowed));

    // Expired or undecodable tokens end the session outside of rendering
    create_effect(move |_| {
        if let GuardDecision::Redirect { logout: true, .. } = decision.get() {
            session.logout();
        }
    });

    move || match decision.get() {
        GuardDecision::Allow(_) => children().into_view(),
        GuardDecision::Redirect { path, .. } => view! { <Redirect path=path /> }.into_view(),
    }
}
