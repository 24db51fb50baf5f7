//! In-process mock of the booking platform backend.

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use servicebay::api::dto::{Notification, NotificationType, Role};
use servicebay::{ApiClient, ClientConfig};

pub const PASSWORD: &str = "secret";

#[derive(Debug, Default)]
pub struct MockState {
    pub unread: Vec<Notification>,
    pub marked_read: Vec<i64>,
    pub read_all_roles: Vec<String>,
    pub count_requests: usize,
    pub last_authorization: Option<String>,
    pub chat_user_ids: Vec<Value>,
    pub created: Vec<Value>,
    pub deleted: Vec<i64>,
    pub leave_decisions: Vec<(i64, String)>,
    pub profile_updates: Vec<Value>,
    /// Reject mark-read and read-all with 500
    pub reject_marks: bool,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockServer {
    pub base_url: String,
    pub state: Shared,
}

impl MockServer {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    pub fn push_unread(&self, id: i64, title: &str) {
        self.state.lock().unwrap().unread.push(notification(id, title));
    }
}

pub fn notification(id: i64, title: &str) -> Notification {
    Notification {
        id,
        title: title.to_string(),
        message: format!("{} details", title),
        kind: NotificationType::Info,
        created_at: NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, id as u32 % 24, 0)
            .unwrap(),
        read: false,
        target_role: Some(Role::Customer),
    }
}

/// Unsigned token with the given role claim and expiry
pub fn token(role: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "sub": "alice", "role": role, "exp": exp }).to_string());
    format!("{}.{}.sig", header, payload)
}

pub fn valid_token() -> String {
    token("ROLE_CUSTOMER", chrono::Utc::now().timestamp() + 3600)
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/notifications/role/:role/unread", get(unread))
        .route("/api/notifications/role/:role/unread/count", get(unread_count))
        .route("/api/notifications/role/:role/read-all", put(read_all))
        .route("/api/notifications/:id/read", put(mark_read))
        .route("/api/notifications", post(create_notification))
        .route("/api/notifications/:id", delete(delete_notification))
        .route("/api/chatbot/chat", post(chat))
        .route("/api/chatbot/health", get(|| async { "Chatbot service is running" }))
        .route("/api/vehicles", get(vehicles))
        .route("/api/users/customers", get(|| async { StatusCode::FORBIDDEN }))
        .route("/api/leaves", get(leaves).post(apply_leave))
        .route("/api/leaves/:id/:decision", put(decide_leave))
        .route("/api/v1/profile/:id", get(profile).put(update_profile))
        .with_state(state)
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Bad credentials" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "token": valid_token(),
            "user": {
                "id": 7,
                "username": body["username"],
                "email": "alice@example.com",
                "role": "CUSTOMER"
            }
        })),
    )
}

async fn register(Json(body): Json<Value>) -> impl IntoResponse {
    if body["username"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Username is already taken" })),
        );
    }
    (StatusCode::OK, Json(json!({ "message": "User registered successfully" })))
}

async fn unread(State(state): State<Shared>, Path(_role): Path<String>) -> Json<Vec<Notification>> {
    let state = state.lock().unwrap();
    Json(state.unread.iter().filter(|n| !n.read).cloned().collect())
}

async fn unread_count(State(state): State<Shared>, Path(_role): Path<String>) -> Json<usize> {
    let mut state = state.lock().unwrap();
    state.count_requests += 1;
    Json(state.unread.iter().filter(|n| !n.read).count())
}

async fn mark_read(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut state = state.lock().unwrap();
    if state.reject_marks {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    state.marked_read.push(id);
    for n in state.unread.iter_mut().filter(|n| n.id == id) {
        n.read = true;
    }
    StatusCode::OK
}

async fn read_all(State(state): State<Shared>, Path(role): Path<String>) -> StatusCode {
    let mut state = state.lock().unwrap();
    if state.reject_marks {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    state.read_all_roles.push(role);
    state.unread.iter_mut().for_each(|n| n.read = true);
    StatusCode::OK
}

async fn chat(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    state.lock().unwrap().chat_user_ids.push(body["userId"].clone());

    Json(json!({
        "response": "Here are the available slots for tomorrow",
        "data": {
            "available_slots": [
                { "start": "14:00", "end": "15:00", "available_employees": 2, "required_employees": 1 }
            ],
            "total_slots": 1,
            "date": "2024-06-02"
        }
    }))
}

async fn vehicles(State(state): State<Shared>, headers: HeaderMap) -> Json<Value> {
    state.lock().unwrap().last_authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Json(json!([
        { "id": 1, "make": "Toyota", "model": "Corolla", "year": 2019, "licensePlate": "ABC-123" },
        { "id": 2, "make": "Honda", "model": "Civic", "year": 2021, "licensePlate": "XYZ-987", "customerName": "Alice" }
    ]))
}

async fn leaves() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Database unavailable" })),
    )
}

async fn create_notification(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    state.lock().unwrap().created.push(body.clone());
    Json(json!({
        "id": 99,
        "title": body["title"],
        "message": body["message"],
        "type": body["type"],
        "createdAt": "2024-06-01T10:00:00",
        "read": false,
        "targetRole": body["targetRole"]
    }))
}

async fn delete_notification(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    state.lock().unwrap().deleted.push(id);
    StatusCode::NO_CONTENT
}

async fn apply_leave(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": 12,
        "employeeId": 7,
        "employeeName": "Sam Reyes",
        "leaveType": body["leaveType"],
        "startDate": body["startDate"],
        "endDate": body["endDate"],
        "reason": body["reason"],
        "status": "PENDING"
    }))
}

async fn decide_leave(
    State(state): State<Shared>,
    Path((id, decision)): Path<(i64, String)>,
) -> StatusCode {
    if decision != "approve" && decision != "reject" {
        return StatusCode::NOT_FOUND;
    }
    state.lock().unwrap().leave_decisions.push((id, decision));
    StatusCode::OK
}

async fn profile(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({
        "id": id,
        "username": "alice",
        "email": "alice@example.com",
        "firstName": "Alice",
        "role": "CUSTOMER"
    }))
}

async fn update_profile(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.lock().unwrap().profile_updates.push(body.clone());
    Json(json!({
        "id": id,
        "username": "alice",
        "email": body.get("email").cloned().unwrap_or_else(|| json!("alice@example.com")),
        "firstName": "Alice",
        "phoneNumber": body["phoneNumber"],
        "role": "CUSTOMER"
    }))
}
