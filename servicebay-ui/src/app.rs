//! App Root Component
//!
//! Providers, navigation and the route table. Private routes are wrapped
//! in [`RequireRole`].

use leptos::*;
use leptos_router::*;

use servicebay::guard::{ADMIN_ONLY, ANY_ROLE, CUSTOMER_ONLY, EMPLOYEE_ONLY, STAFF};

use crate::api;
use crate::components::{Nav, RequireRole, Toast};
use crate::pages::{
    AdminDashboard, CustomerDashboard, Customers, EmployeeDashboard, Employees, Home, Leaves, Login,
    ProfilePage, Register, Services, Settings, Vehicles,
};
use crate::state::{provide_global_state, provide_session};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    provide_session();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=|| view! { <Redirect path="/home" /> } />
                        <Route path="/home" view=Home />
                        <Route path="/login" view=Login />
                        <Route path="/register" view=Register />
                        <Route path="/services" view=Services />
                        <Route path="/settings" view=Settings />

                        <Route
                            path="/admin/dashboard"
                            view=|| view! { <RequireRole allowed=ADMIN_ONLY><AdminDashboard /></RequireRole> }
                        />
                        <Route
                            path="/employee/dashboard"
                            view=|| view! { <RequireRole allowed=EMPLOYEE_ONLY><EmployeeDashboard /></RequireRole> }
                        />
                        <Route
                            path="/customer/dashboard"
                            view=|| view! { <RequireRole allowed=CUSTOMER_ONLY><CustomerDashboard /></RequireRole> }
                        />
                        <Route
                            path="/customers"
                            view=|| view! { <RequireRole allowed=STAFF><Customers /></RequireRole> }
                        />
                        <Route
                            path="/employees"
                            view=|| view! { <RequireRole allowed=ADMIN_ONLY><Employees /></RequireRole> }
                        />
                        <Route
                            path="/leaves"
                            view=|| view! { <RequireRole allowed=STAFF><Leaves /></RequireRole> }
                        />
                        <Route
                            path="/vehicles"
                            view=|| view! { <RequireRole allowed=ANY_ROLE><Vehicles /></RequireRole> }
                        />
                        <Route
                            path="/profile"
                            view=|| view! { <RequireRole allowed=ANY_ROLE><ProfilePage /></RequireRole> }
                        />

                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />
                <Toast />
            </div>
        </Router>
    }
}

/// Footer showing which backend this browser talks to
#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm text-gray-400">
                <span>{format!("Backend: {}", api::get_api_base())}</span>
                <A href="/settings" class="hover:text-white">"Settings"</A>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/home"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}
