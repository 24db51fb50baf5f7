#![cfg(feature = "native")]

mod common;

use common::MockServer;
use servicebay::chat::{ChatService, Sender};
use serde_json::Value;

#[tokio::test]
async fn test_availability_reply_has_slot_card() {
    let server = MockServer::start().await;
    let mut chat = ChatService::new(server.client(), Some(7));

    let reply = chat.send_message("availability tomorrow").await.unwrap();
    assert_eq!(reply.sender, Sender::Bot);

    let cards = reply.slot_cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].status_label, "Available");
    assert_eq!(cards[0].start_label, "2:00 PM");
    assert_eq!(cards[0].end_label, "to 3:00 PM");

    assert_eq!(chat.session().messages().len(), 3);
    assert_eq!(server.state.lock().unwrap().chat_user_ids, vec![Value::from(7)]);
}

#[tokio::test]
async fn test_anonymous_sends_null_user_id() {
    let server = MockServer::start().await;
    let mut chat = ChatService::new(server.client(), None);

    chat.send_message("hello").await.unwrap();
    assert_eq!(server.state.lock().unwrap().chat_user_ids, vec![Value::Null]);
}

#[tokio::test]
async fn test_selected_slot_is_sent_as_next_message() {
    let server = MockServer::start().await;
    let mut chat = ChatService::new(server.client(), Some(7));
    chat.send_message("availability tomorrow").await.unwrap();

    let data = chat.session().messages().last().unwrap().slots.clone().unwrap();
    chat.session_mut()
        .select_slot(&data.available_slots[0], data.date.as_deref());

    let text = chat.session().input().to_string();
    assert_eq!(text, "I'd like to book the slot on 2024-06-02 from 14:00 to 15:00");

    chat.send_message(&text).await.unwrap();
    assert_eq!(chat.session().messages().len(), 5);
    assert!(chat.session().input().is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_gives_apology() {
    let client = servicebay::ApiClient::new(servicebay::ClientConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: 2,
    })
    .unwrap();
    let mut chat = ChatService::new(client, None);

    let reply = chat.send_message("hello").await.unwrap();
    assert_eq!(reply.text, servicebay::chat::FAILURE_REPLY);
}
