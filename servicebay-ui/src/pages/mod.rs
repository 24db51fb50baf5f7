//! Pages
//!
//! Top-level page components for each route.

pub mod auth;
pub mod dashboards;
pub mod home;
pub mod leaves;
pub mod people;
pub mod profile;
pub mod services;
pub mod settings;
pub mod vehicles;

pub use auth::{Login, Register};
pub use dashboards::{AdminDashboard, CustomerDashboard, EmployeeDashboard};
pub use home::Home;
pub use leaves::Leaves;
pub use people::{Customers, Employees};
pub use profile::ProfilePage;
pub use services::Services;
pub use settings::Settings;
pub use vehicles::Vehicles;
