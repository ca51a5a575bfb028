//! Single-flight behaviour of the conversation manager

mod common;

use common::{fixture_store, FailingClient, GatedClient, PanickingClient};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_pending, assert_ready};
use tooleval_core::{ChatMessage, ConversationManager, SessionState, FALLBACK_REPLY};

async fn wait_until_idle(manager: &ConversationManager) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while manager.is_sending() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("Exchange did not finish");
}

#[tokio::test]
async fn test_message_while_pending_is_dropped() {
    let client = Arc::new(GatedClient::new("Clueso turns recordings into videos."));
    let manager = Arc::new(ConversationManager::new(&fixture_store(), client.clone()).unwrap());

    let first = tokio::spawn({
        let manager = Arc::clone(&manager);
        async move { manager.send("a").await }
    });
    client.started.notified().await;
    assert_eq!(manager.state(), SessionState::Sending);

    let mut second = tokio_test::task::spawn(manager.send("b"));
    assert_ready!(second.poll());
    drop(second);

    client.release.notify_one();
    first.await.unwrap();

    assert_eq!(client.calls(), 1);
    assert_eq!(
        manager.history(),
        vec![
            ChatMessage::user("a"),
            ChatMessage::assistant("Clueso turns recordings into videos."),
        ]
    );
    assert_eq!(manager.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_dropped_send_still_records_reply() {
    let client = Arc::new(GatedClient::new("late answer"));
    let manager = ConversationManager::new(&fixture_store(), client.clone()).unwrap();

    let mut send = tokio_test::task::spawn(manager.send("question"));
    assert_pending!(send.poll());
    drop(send);

    assert!(manager.is_sending());
    assert_eq!(manager.history(), vec![ChatMessage::user("question")]);

    client.started.notified().await;
    client.release.notify_one();
    wait_until_idle(&manager).await;

    assert_eq!(
        manager.history(),
        vec![
            ChatMessage::user("question"),
            ChatMessage::assistant("late answer"),
        ]
    );
}

#[tokio::test]
async fn test_failure_records_fallback_and_returns_to_idle() {
    let manager = ConversationManager::new(&fixture_store(), Arc::new(FailingClient)).unwrap();

    manager.send("x").await;

    assert_eq!(
        manager.history(),
        vec![ChatMessage::user("x"), ChatMessage::assistant(FALLBACK_REPLY)]
    );
    assert!(!manager.is_sending());
}

#[tokio::test]
async fn test_panicking_client_records_fallback() {
    let manager = ConversationManager::new(&fixture_store(), Arc::new(PanickingClient)).unwrap();

    manager.send("x").await;
    manager.send("y").await;

    let history = manager.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[1], ChatMessage::assistant(FALLBACK_REPLY));
    assert_eq!(history[2], ChatMessage::user("y"));
    assert_eq!(history[3], ChatMessage::assistant(FALLBACK_REPLY));
    assert_eq!(manager.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_context_covers_whole_dataset() {
    let manager = ConversationManager::new(&fixture_store(), Arc::new(FailingClient)).unwrap();
    let context: serde_json::Value = serde_json::from_str(manager.context()).unwrap();

    let names: Vec<&str> = context
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["toolName"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Clueso",
            "Synthesia",
            "HeyGen",
            "Suno",
            "BlurMantis Companion",
            "Cursor"
        ]
    );
    assert!(context[0].get("evaluationDate").is_none());
    assert!(context[0].get("detailedScores").is_none());
}
