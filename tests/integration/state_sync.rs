//! Integration tests for the command/event bridge and state reconciliation.
//!
//! Drives [`spawn_api`] against an in-process server and checks that the
//! resulting events, applied through [`App::apply_event`], keep the local
//! mirror in sync with the server — and that failed requests leave it
//! untouched.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use taskdeck::api::ApiClient;
use taskdeck::net::{ApiCommand, ApiEvent, spawn_api};
use taskdeck::state::App;
use taskdeck_server::api::{AppState, start_server_with_state};
use taskdeck_server::store::TaskStore;

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Starts an in-memory server and the API bridge against it.
async fn start_bridge() -> (mpsc::Sender<ApiCommand>, mpsc::Receiver<ApiEvent>) {
    let state = Arc::new(AppState::new(TaskStore::in_memory()));
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("server should start");
    let client = ApiClient::new(&format!("http://{addr}")).expect("bound addr is a valid URL");
    spawn_api(client, 16)
}

/// Receives the next event or panics after a timeout.
async fn next_event(rx: &mut mpsc::Receiver<ApiEvent>) -> ApiEvent {
    timeout(EVENT_TIMEOUT, rx.recv())
        .await
        .expect("event should arrive in time")
        .expect("event channel should stay open")
}

// ---------------------------------------------------------------------------
// Command -> event -> state round trips
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_then_refresh_populates_the_mirror() {
    let (tx, mut rx) = start_bridge().await;
    let mut app = App::new();
    app.draft_text = "learn ratatui".to_string();

    tx.send(ApiCommand::Add {
        text: app.draft_text.clone(),
    })
    .await
    .unwrap();
    let event = next_event(&mut rx).await;
    assert!(matches!(event, ApiEvent::Created(_)));
    app.apply_event(event);

    assert_eq!(app.tasks.len(), 1);
    assert_eq!(app.tasks[0].text, "learn ratatui");
    assert!(app.draft_text.is_empty());

    // A refresh reproduces the same list from the server.
    tx.send(ApiCommand::Refresh).await.unwrap();
    let event = next_event(&mut rx).await;
    app.apply_event(event);
    assert_eq!(app.tasks.len(), 1);
    assert_eq!(app.tasks[0].text, "learn ratatui");
}

#[tokio::test]
async fn toggle_round_trip_updates_the_record() {
    let (tx, mut rx) = start_bridge().await;
    let mut app = App::new();

    tx.send(ApiCommand::Add {
        text: "toggle me".to_string(),
    })
    .await
    .unwrap();
    app.apply_event(next_event(&mut rx).await);
    let id = app.tasks[0].id;

    tx.send(ApiCommand::Toggle {
        id,
        completed: true,
    })
    .await
    .unwrap();
    let event = next_event(&mut rx).await;
    assert!(matches!(event, ApiEvent::Updated(_)));
    app.apply_event(event);

    assert!(app.tasks[0].completed);
}

#[tokio::test]
async fn save_text_round_trip_applies_the_sent_text() {
    let (tx, mut rx) = start_bridge().await;
    let mut app = App::new();

    tx.send(ApiCommand::Add {
        text: "draft wording".to_string(),
    })
    .await
    .unwrap();
    app.apply_event(next_event(&mut rx).await);
    let id = app.tasks[0].id;

    app.editing_id = Some(id);
    app.editing_text = "final wording".to_string();
    tx.send(ApiCommand::SaveText {
        id,
        text: "final wording".to_string(),
    })
    .await
    .unwrap();
    let event = next_event(&mut rx).await;
    assert!(matches!(event, ApiEvent::TextSaved { .. }));
    app.apply_event(event);

    assert_eq!(app.tasks[0].text, "final wording");
    assert!(app.editing_id.is_none());
}

#[tokio::test]
async fn delete_round_trip_removes_the_record() {
    let (tx, mut rx) = start_bridge().await;
    let mut app = App::new();

    tx.send(ApiCommand::Add {
        text: "short-lived".to_string(),
    })
    .await
    .unwrap();
    app.apply_event(next_event(&mut rx).await);
    let id = app.tasks[0].id;

    tx.send(ApiCommand::Delete { id }).await.unwrap();
    let event = next_event(&mut rx).await;
    assert!(matches!(event, ApiEvent::Deleted(_)));
    app.apply_event(event);

    assert!(app.tasks.is_empty());
}

// ---------------------------------------------------------------------------
// Failure behavior
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_request_emits_no_event_and_state_is_retained() {
    // Bind and immediately drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{dead_addr}")).unwrap();
    let (tx, mut rx) = spawn_api(client, 16);

    let mut app = App::new();
    app.draft_text = "never sent".to_string();

    tx.send(ApiCommand::Add {
        text: app.draft_text.clone(),
    })
    .await
    .unwrap();

    // No event arrives; the draft and the (empty) list are untouched.
    let result = timeout(Duration::from_millis(500), rx.recv()).await;
    assert!(result.is_err(), "failure must not produce an event");
    assert_eq!(app.draft_text, "never sent");
    assert!(app.tasks.is_empty());
}

#[tokio::test]
async fn rejected_request_emits_no_event() {
    let (tx, mut rx) = start_bridge().await;

    // Blank text is rejected by the server with a 400.
    tx.send(ApiCommand::Add {
        text: "   ".to_string(),
    })
    .await
    .unwrap();

    let result = timeout(Duration::from_millis(500), rx.recv()).await;
    assert!(result.is_err(), "rejection must not produce an event");
}

#[tokio::test]
async fn shutdown_closes_the_event_channel() {
    let (tx, mut rx) = start_bridge().await;

    tx.send(ApiCommand::Shutdown).await.unwrap();

    let received = timeout(EVENT_TIMEOUT, rx.recv())
        .await
        .expect("channel should close in time");
    assert!(received.is_none());
}
