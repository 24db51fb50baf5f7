//! HTTP API Client
//!
//! gloo-net transport for the booking platform. Paths, wire types and the
//! error taxonomy come from the shared crate; this module only moves bytes.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use servicebay::api::dto::*;
use servicebay::api::paths;
use servicebay::{ClientError, ClientResult};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

const API_URL_KEY: &str = "servicebay_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(API_URL_KEY, url.trim());
    }
}

fn network(e: gloo_net::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

/// Handle for API calls: base URL plus the session's bearer token
#[derive(Debug, Clone, PartialEq)]
pub struct Api {
    base: String,
    token: Option<String>,
}

impl Api {
    pub fn new(token: Option<String>) -> Self {
        Self {
            base: get_api_base(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn execute(&self, request: Result<Request, gloo_net::Error>) -> ClientResult<Response> {
        let response = request.map_err(network)?.send().await.map_err(network)?;
        if response.ok() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_response(response.status(), &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let body = response.text().await.map_err(network)?;
        serde_json::from_str(&body).map_err(ClientError::from)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(Request::get(&self.url(path))).build();
        Self::decode(self.execute(request).await?).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let request = self.authorize(Request::post(&self.url(path))).json(body);
        Self::decode(self.execute(request).await?).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let request = self.authorize(Request::put(&self.url(path))).json(body);
        Self::decode(self.execute(request).await?).await
    }

    async fn put_empty(&self, path: &str) -> ClientResult<()> {
        let request = self.authorize(Request::put(&self.url(path))).build();
        self.execute(request).await.map(|_| ())
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.authorize(Request::delete(&self.url(path))).build();
        self.execute(request).await.map(|_| ())
    }

    // ============ Auth ============

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post(paths::LOGIN, &body).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<MessageResponse> {
        self.post(paths::REGISTER, request).await
    }

    pub async fn profile(&self, user_id: i64) -> ClientResult<Profile> {
        self.get(&paths::profile(user_id)).await
    }

    pub async fn update_profile(&self, user_id: i64, update: &ProfileUpdate) -> ClientResult<Profile> {
        self.put(&paths::profile(user_id), update).await
    }

    // ============ Notifications ============

    pub async fn unread_notifications(&self, role: Role) -> ClientResult<Vec<Notification>> {
        self.get(&paths::unread_for(role)).await
    }

    pub async fn unread_count(&self, role: Role) -> ClientResult<u64> {
        self.get(&paths::unread_count_for(role)).await
    }

    pub async fn mark_notification_read(&self, id: i64) -> ClientResult<()> {
        self.put_empty(&paths::mark_read(id)).await
    }

    pub async fn mark_all_notifications_read(&self, role: Role) -> ClientResult<()> {
        self.put_empty(&paths::mark_all_read(role)).await
    }

    pub async fn create_notification(&self, notification: &NewNotification) -> ClientResult<Notification> {
        self.post(paths::NOTIFICATIONS, notification).await
    }

    // ============ Chat ============

    pub async fn chat(&self, request: &ChatRequest) -> ClientResult<ChatResponse> {
        self.post(paths::CHAT, request).await
    }

    pub async fn chat_health(&self) -> ClientResult<String> {
        let request = self.authorize(Request::get(&self.url(paths::CHAT_HEALTH))).build();
        self.execute(request).await?.text().await.map_err(network)
    }

    // ============ Records ============

    pub async fn vehicles(&self) -> ClientResult<Vec<Vehicle>> {
        self.get(paths::VEHICLES).await
    }

    pub async fn create_vehicle(&self, vehicle: &NewVehicle) -> ClientResult<Vehicle> {
        self.post(paths::VEHICLES, vehicle).await
    }

    pub async fn delete_vehicle(&self, id: i64) -> ClientResult<()> {
        self.delete(&paths::vehicle(id)).await
    }

    pub async fn customers(&self) -> ClientResult<Vec<Customer>> {
        self.get(paths::CUSTOMERS).await
    }

    pub async fn employees(&self) -> ClientResult<Vec<Employee>> {
        self.get(paths::EMPLOYEES).await
    }

    pub async fn services(&self) -> ClientResult<Vec<ServiceOffering>> {
        self.get(paths::SERVICES).await
    }

    pub async fn leaves(&self) -> ClientResult<Vec<Leave>> {
        self.get(paths::LEAVES).await
    }

    pub async fn apply_leave(&self, leave: &NewLeave) -> ClientResult<Leave> {
        self.post(paths::LEAVES, leave).await
    }

    pub async fn approve_leave(&self, id: i64) -> ClientResult<()> {
        self.put_empty(&paths::approve_leave(id)).await
    }

    pub async fn reject_leave(&self, id: i64) -> ClientResult<()> {
        self.put_empty(&paths::reject_leave(id)).await
    }
}
