#![cfg(feature = "native")]

mod common;

use chrono::NaiveDate;
use common::MockServer;
use servicebay::api::dto::{
    LeaveStatus, NewLeave, NewNotification, NotificationType, ProfileUpdate, Role,
};
use servicebay::listing::{ListView, SortDirection, SortState, VehicleColumn};
use servicebay::ClientError;

#[tokio::test]
async fn test_bearer_token_sent() {
    let server = MockServer::start().await;
    let client = server.client().with_token("tok-123");

    let vehicles = client.vehicles().await.unwrap();
    assert_eq!(vehicles.len(), 2);
    assert_eq!(
        server.state.lock().unwrap().last_authorization.as_deref(),
        Some("Bearer tok-123")
    );
}

#[tokio::test]
async fn test_no_token_no_header() {
    let server = MockServer::start().await;
    server.client().vehicles().await.unwrap();
    assert!(server.state.lock().unwrap().last_authorization.is_none());
}

#[tokio::test]
async fn test_error_field_becomes_message() {
    let server = MockServer::start().await;
    let err = server.client().leaves().await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Api {
            status: 500,
            message: "Database unavailable".to_string()
        }
    );
    assert_eq!(err.to_string(), "Database unavailable");
}

#[tokio::test]
async fn test_forbidden_without_body_is_unauthorized() {
    let server = MockServer::start().await;
    let err = server.client().customers().await.unwrap_err();
    assert_eq!(err, ClientError::Unauthorized);
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_unknown_route_is_api_error() {
    let server = MockServer::start().await;
    let err = server.client().services().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let client = servicebay::ApiClient::new(servicebay::ClientConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: 2,
    })
    .unwrap();

    let err = client.vehicles().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_) | ClientError::Timeout));
}

#[tokio::test]
async fn test_health_is_plain_text() {
    let server = MockServer::start().await;
    let body = server.client().chat_health().await.unwrap();
    assert_eq!(body, "Chatbot service is running");
}

#[tokio::test]
async fn test_fetched_vehicles_sort_missing_owner_last() {
    let server = MockServer::start().await;
    let vehicles = server.client().vehicles().await.unwrap();

    let mut view = ListView::new(vehicles);
    view.set_sort(SortState::by(VehicleColumn::Owner, SortDirection::Ascending));
    let ids: Vec<i64> = view.visible().iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![2, 1]);

    view.set_sort(SortState::by(VehicleColumn::Owner, SortDirection::Descending));
    let ids: Vec<i64> = view.visible().iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_apply_and_decide_leave() {
    let server = MockServer::start().await;
    let client = server.client().with_token("tok");

    let leave = client
        .apply_leave(&NewLeave {
            leave_type: "ANNUAL".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 7, 5).unwrap(),
            reason: None,
        })
        .await
        .unwrap();
    assert_eq!(leave.status, LeaveStatus::Pending);
    assert_eq!(leave.start_date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());

    client.approve_leave(12).await.unwrap();
    client.reject_leave(13).await.unwrap();
    assert_eq!(
        server.state.lock().unwrap().leave_decisions,
        vec![(12, "approve".to_string()), (13, "reject".to_string())]
    );
}

#[tokio::test]
async fn test_create_and_delete_notification() {
    let server = MockServer::start().await;
    let client = server.client().with_token("tok");

    let created = client
        .create_notification(&NewNotification {
            title: "Closed Monday".to_string(),
            message: "The workshop is closed for the holiday".to_string(),
            kind: NotificationType::Warning,
            target_role: Role::Customer,
        })
        .await
        .unwrap();
    assert_eq!(created.kind, NotificationType::Warning);
    assert_eq!(created.target_role, Some(Role::Customer));

    let sent = server.state.lock().unwrap().created[0].clone();
    assert_eq!(sent["type"], "WARNING");
    assert_eq!(sent["targetRole"], "CUSTOMER");

    client.delete_notification(created.id).await.unwrap();
    assert_eq!(server.state.lock().unwrap().deleted, vec![99]);
}

#[tokio::test]
async fn test_profile_update_sends_only_changed_fields() {
    let server = MockServer::start().await;
    let client = server.client().with_token("tok");

    let profile = client.profile(7).await.unwrap();
    assert_eq!(profile.first_name.as_deref(), Some("Alice"));
    assert_eq!(profile.phone_number, None);

    let update = ProfileUpdate {
        phone_number: Some("555-0100".to_string()),
        ..Default::default()
    };
    let saved = client.update_profile(7, &update).await.unwrap();
    assert_eq!(saved.phone_number.as_deref(), Some("555-0100"));

    let body = server.state.lock().unwrap().profile_updates[0].clone();
    assert_eq!(body, serde_json::json!({ "phoneNumber": "555-0100" }));
}
