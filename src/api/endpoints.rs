//! Typed endpoint calls on [`ApiClient`].

use super::client::ApiClient;
use super::dto::*;
use super::error::ClientResult;
use super::paths;

impl ApiClient {
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

    pub async fn notifications_for(&self, role: Role) -> ClientResult<Vec<Notification>> {
        self.get(&paths::notifications_for(role)).await
    }

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

    pub async fn delete_notification(&self, id: i64) -> ClientResult<()> {
        self.delete(&paths::notification(id)).await
    }

    // ============ Chat ============

    pub async fn chat(&self, request: &ChatRequest) -> ClientResult<ChatResponse> {
        self.post(paths::CHAT, request).await
    }

    pub async fn chat_health(&self) -> ClientResult<String> {
        self.get_text(paths::CHAT_HEALTH).await
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
