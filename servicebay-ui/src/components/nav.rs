//! Navigation Component
//!
//! Header bar: role-specific links, the notification bell and the account
//! menu.

use leptos::*;
use leptos_router::*;

use servicebay::api::dto::Role;

use super::NotificationBell;
use crate::state::use_session;

/// Links shown for a role, or for a signed-out visitor
pub fn nav_links(role: Option<Role>) -> Vec<(&'static str, &'static str)> {
    match role {
        None => vec![("/home", "Home"), ("/services", "Services")],
        Some(Role::Admin) => vec![
            ("/admin/dashboard", "Dashboard"),
            ("/customers", "Customers"),
            ("/employees", "Employees"),
            ("/vehicles", "Vehicles"),
            ("/leaves", "Leaves"),
            ("/services", "Services"),
        ],
        Some(Role::Employee) => vec![
            ("/employee/dashboard", "Dashboard"),
            ("/customers", "Customers"),
            ("/vehicles", "Vehicles"),
            ("/leaves", "Leaves"),
            ("/services", "Services"),
        ],
        Some(Role::Customer) => vec![
            ("/customer/dashboard", "Dashboard"),
            ("/vehicles", "My Vehicles"),
            ("/services", "Services"),
        ],
    }
}

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let logout = move |_| {
        session.logout();
        navigate("/login", Default::default());
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/home" class="flex items-center space-x-3">
                        <span class="text-2xl">"🔧"</span>
                        <span class="text-xl font-bold text-white">"ServiceBay"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        {move || {
                            nav_links(session.role())
                                .into_iter()
                                .map(|(href, label)| view! { <NavLink href=href label=label /> })
                                .collect_view()
                        }}
                    </div>

                    <div class="flex items-center space-x-3">
                        {move || match session.session() {
                            Some(current) => view! {
                                <NotificationBell role=current.role() />
                                <A href="/profile" class="text-sm text-gray-300 hover:text-white">
                                    {current.user.username.clone()}
                                </A>
                                <button
                                    on:click=logout.clone()
                                    class="px-3 py-1.5 text-sm rounded-lg bg-gray-700 hover:bg-gray-600"
                                >
                                    "Log out"
                                </button>
                            }.into_view(),
                            None => view! {
                                <NavLink href="/login" label="Log in" />
                                <NavLink href="/register" label="Register" />
                            }.into_view(),
                        }}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
