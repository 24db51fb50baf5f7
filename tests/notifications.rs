#![cfg(feature = "native")]

mod common;

use std::time::Duration;

use common::MockServer;
use servicebay::api::dto::Role;
use servicebay::NotificationPoller;

const FAST: Duration = Duration::from_millis(50);

async fn settle() {
    tokio::time::sleep(Duration::from_millis(250)).await;
}

#[tokio::test]
async fn test_mount_fetches_list_and_count() {
    let server = MockServer::start().await;
    server.push_unread(1, "Booking confirmed");
    server.push_unread(2, "Invoice ready");

    let mut poller = NotificationPoller::new(server.client(), Role::Customer, FAST);
    poller.mount().await;
    assert!(poller.is_running());

    let state = poller.snapshot().await;
    assert_eq!(state.unread().len(), 2);
    assert_eq!(state.unread_count(), 2);
    assert_eq!(state.badge().as_deref(), Some("2"));

    poller.stop().await;
}

#[tokio::test]
async fn test_poll_picks_up_new_count() {
    let server = MockServer::start().await;
    let mut poller = NotificationPoller::new(server.client(), Role::Customer, FAST);
    poller.mount().await;
    assert_eq!(poller.snapshot().await.unread_count(), 0);

    server.push_unread(3, "Vehicle ready");
    settle().await;

    assert_eq!(poller.snapshot().await.unread_count(), 1);
    assert!(server.state.lock().unwrap().count_requests >= 2);

    poller.stop().await;
}

#[tokio::test]
async fn test_mark_read_is_local_then_remote() {
    let server = MockServer::start().await;
    server.push_unread(1, "Booking confirmed");
    server.push_unread(2, "Invoice ready");

    let mut poller = NotificationPoller::new(server.client(), Role::Customer, Duration::from_secs(60));
    poller.mount().await;

    poller.mark_read(1).await;
    let state = poller.snapshot().await;
    assert_eq!(state.unread_count(), 1);
    assert!(state.unread().iter().all(|n| n.id != 1));
    assert_eq!(server.state.lock().unwrap().marked_read, vec![1]);

    poller.mark_all_read().await;
    assert_eq!(poller.snapshot().await.unread_count(), 0);
    assert_eq!(server.state.lock().unwrap().read_all_roles, vec!["CUSTOMER".to_string()]);

    poller.stop().await;
}

#[tokio::test]
async fn test_dropdown_refreshes_list() {
    let server = MockServer::start().await;
    let mut poller = NotificationPoller::new(server.client(), Role::Customer, Duration::from_secs(60));
    poller.mount().await;

    server.push_unread(5, "Leave approved");
    poller.toggle_dropdown().await;

    let state = poller.snapshot().await;
    assert!(state.is_open());
    assert_eq!(state.unread().len(), 1);

    poller.toggle_dropdown().await;
    assert!(!poller.snapshot().await.is_open());

    poller.stop().await;
}

#[tokio::test]
async fn test_no_updates_after_stop() {
    let server = MockServer::start().await;
    let mut poller = NotificationPoller::new(server.client(), Role::Customer, FAST);
    poller.mount().await;
    poller.stop().await;
    assert!(!poller.is_running());

    let polls = server.state.lock().unwrap().count_requests;
    server.push_unread(9, "Late arrival");
    settle().await;

    assert_eq!(poller.snapshot().await.unread_count(), 0);
    assert_eq!(server.state.lock().unwrap().count_requests, polls);
}

#[tokio::test]
async fn test_rejected_mark_read_comes_back() {
    let server = MockServer::start().await;
    server.push_unread(1, "Booking confirmed");
    server.push_unread(2, "Invoice ready");
    server.state.lock().unwrap().reject_marks = true;

    let mut poller = NotificationPoller::new(server.client(), Role::Customer, Duration::from_secs(60));
    poller.mount().await;

    poller.mark_read(1).await;
    assert!(server.state.lock().unwrap().marked_read.is_empty());

    poller.refresh_unread().await;
    let state = poller.snapshot().await;
    assert_eq!(state.unread().len(), 2);
    assert_eq!(state.unread_count(), 2);

    poller.mark_all_read().await;
    assert_eq!(poller.snapshot().await.unread_count(), 0);

    poller.refresh_unread().await;
    let state = poller.snapshot().await;
    assert_eq!(state.unread().len(), 2);
    assert_eq!(state.unread_count(), 2);

    poller.stop().await;
}
