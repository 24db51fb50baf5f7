//! Endpoint paths, shared by the native client and the browser front end.

use super::dto::Role;

pub const LOGIN: &str = "/api/auth/login";
pub const REGISTER: &str = "/api/auth/register";
pub const NOTIFICATIONS: &str = "/api/notifications";
pub const CHAT: &str = "/api/chatbot/chat";
pub const CHAT_HEALTH: &str = "/api/chatbot/health";
pub const VEHICLES: &str = "/api/vehicles";
pub const CUSTOMERS: &str = "/api/users/customers";
pub const EMPLOYEES: &str = "/api/users/employees";
pub const LEAVES: &str = "/api/leaves";
pub const SERVICES: &str = "/api/services";

pub fn profile(user_id: i64) -> String {
    format!("/api/v1/profile/{}", user_id)
}

pub fn notifications_for(role: Role) -> String {
    format!("{}/role/{}", NOTIFICATIONS, role)
}

pub fn unread_for(role: Role) -> String {
    format!("{}/role/{}/unread", NOTIFICATIONS, role)
}

pub fn unread_count_for(role: Role) -> String {
    format!("{}/role/{}/unread/count", NOTIFICATIONS, role)
}

pub fn mark_read(id: i64) -> String {
    format!("{}/{}/read", NOTIFICATIONS, id)
}

pub fn mark_all_read(role: Role) -> String {
    format!("{}/role/{}/read-all", NOTIFICATIONS, role)
}

pub fn notification(id: i64) -> String {
    format!("{}/{}", NOTIFICATIONS, id)
}

pub fn vehicle(id: i64) -> String {
    format!("{}/{}", VEHICLES, id)
}

pub fn approve_leave(id: i64) -> String {
    format!("{}/{}/approve", LEAVES, id)
}

pub fn reject_leave(id: i64) -> String {
    format!("{}/{}/reject", LEAVES, id)
}
