//! Data Transfer Objects
//!
//! Request and response types for the booking platform API.
//! Shapes are validated at the boundary: a response that does not match
//! these types fails to decode instead of rendering missing values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================
// ROLES
// ============================================

/// Account role; gates route access and notification scoping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Employee,
    Customer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Employee, Role::Customer];

    /// Wire name, as used in paths and stored sessions
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Employee => "EMPLOYEE",
            Role::Customer => "CUSTOMER",
        }
    }

    /// Landing page for this role
    pub fn landing_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Employee => "/employee/dashboard",
            Role::Customer => "/customer/dashboard",
        }
    }

    /// Parse a token role claim. Accepts any case and a `ROLE_` prefix.
    pub fn from_claim(claim: &str) -> Option<Role> {
        let claim = claim.trim();
        let upper = claim.to_ascii_uppercase();
        let bare = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        match bare {
            "ADMIN" => Some(Role::Admin),
            "EMPLOYEE" => Some(Role::Employee),
            "CUSTOMER" => Some(Role::Customer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_claim(s).ok_or_else(|| format!("Unknown role: {}", s))
    }
}

// ============================================
// AUTH DTOs
// ============================================

/// Login request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token
    pub token: String,
    pub user: SessionUser,
}

/// The user half of a session, persisted under the `user` storage key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub role: Role,
}

/// Generic `{message}` response body
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// User profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone_number.is_none()
    }
}

// ============================================
// NOTIFICATION DTOs
// ============================================

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationType {
    Success,
    Warning,
    Error,
    Info,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Success => "SUCCESS",
            NotificationType::Warning => "WARNING",
            NotificationType::Error => "ERROR",
            NotificationType::Info => "INFO",
        }
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(NotificationType::Success),
            "WARNING" => Ok(NotificationType::Warning),
            "ERROR" => Ok(NotificationType::Error),
            "INFO" => Ok(NotificationType::Info),
            other => Err(format!("Unknown notification type: {}", other)),
        }
    }
}

/// A server-owned notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub created_at: NaiveDateTime,
    #[serde(default, alias = "isRead")]
    pub read: bool,
    #[serde(default)]
    pub target_role: Option<Role>,
}

/// Admin request to create a notification for a role
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub target_role: Role,
}

// ============================================
// CHAT DTOs
// ============================================

/// Chat request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    /// Serialized as `null` for anonymous visitors
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

/// Chat response body
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub data: Option<SlotData>,
}

/// Structured availability payload attached to a bot reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotData {
    #[serde(default)]
    pub available_slots: Vec<Slot>,
    #[serde(default)]
    pub total_slots: u32,
    #[serde(default)]
    pub date: Option<String>,
}

/// A bookable time interval with employee availability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// "HH:MM", 24-hour
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub available_employees: u32,
    #[serde(default)]
    pub required_employees: u32,
}

impl Slot {
    /// Whether enough employees are free to staff this slot
    pub fn is_available(&self) -> bool {
        self.available_employees >= self.required_employees
    }
}

// ============================================
// RECORD DTOs
// ============================================

/// Customer vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Vehicle registration request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
}

/// Customer account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Employee account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Leave request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
        }
    }
}

/// Employee leave request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    pub id: i64,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: LeaveStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Leave application
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLeave {
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Entry in the service catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_claim() {
        assert_eq!(Role::from_claim("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_claim("ROLE_EMPLOYEE"), Some(Role::Employee));
        assert_eq!(Role::from_claim("customer"), Some(Role::Customer));
        assert_eq!(Role::from_claim("MECHANIC"), None);
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&Role::Employee).unwrap();
        assert_eq!(json, "\"EMPLOYEE\"");
        let role: Role = serde_json::from_str("\"CUSTOMER\"").unwrap();
        assert_eq!(role, Role::Customer);
    }

    #[test]
    fn test_chat_request_null_user() {
        let req = ChatRequest {
            message: "hi".to_string(),
            user_id: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"message": "hi", "userId": null}));
    }

    #[test]
    fn test_chat_response_with_slots() {
        let body = r#"{
            "response": "Here are the slots",
            "data": {
                "available_slots": [
                    {"start": "09:00", "end": "10:00", "available_employees": 2, "required_employees": 1}
                ],
                "total_slots": 1,
                "date": "2024-06-01"
            }
        }"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data.total_slots, 1);
        assert_eq!(data.available_slots[0].start.as_deref(), Some("09:00"));
        assert!(data.available_slots[0].is_available());
    }

    #[test]
    fn test_notification_decode() {
        let body = r#"{
            "id": 7,
            "title": "Leave approved",
            "message": "Your leave was approved",
            "type": "SUCCESS",
            "createdAt": "2024-06-01T10:15:30.123",
            "isRead": false
        }"#;
        let n: Notification = serde_json::from_str(body).unwrap();
        assert_eq!(n.kind, NotificationType::Success);
        assert!(!n.read);
        assert_eq!(n.target_role, None);
    }

    #[test]
    fn test_notification_rejects_unknown_type() {
        let body = r#"{"id":1,"title":"t","message":"m","type":"LOUD","createdAt":"2024-06-01T10:00:00"}"#;
        assert!(serde_json::from_str::<Notification>(body).is_err());
    }

    #[test]
    fn test_leave_decode() {
        let body = r#"{
            "id": 3,
            "employeeName": "Sam Reyes",
            "leaveType": "SICK",
            "startDate": "2024-06-03",
            "endDate": "2024-06-04",
            "status": "PENDING"
        }"#;
        let leave: Leave = serde_json::from_str(body).unwrap();
        assert_eq!(leave.status, LeaveStatus::Pending);
        assert_eq!(leave.employee_id, None);
    }
}
