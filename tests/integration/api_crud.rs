//! Integration tests for the API client against an in-process server.
//!
//! Each test binds a real server to an OS-assigned port with an
//! in-memory store and drives it through [`ApiClient`] over HTTP.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use taskdeck::api::{ApiClient, ApiError};
use taskdeck_proto::api::UpdateTaskRequest;
use taskdeck_server::api::start_server;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Starts an in-memory server on an OS-assigned port and returns a client
/// pointed at it.
async fn start_client() -> ApiClient {
    let (addr, _handle) = start_server("127.0.0.1:0")
        .await
        .expect("server should start");
    ApiClient::new(&format!("http://{addr}")).expect("bound addr is a valid URL")
}

// ---------------------------------------------------------------------------
// CRUD scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_crud_scenario() {
    let client = start_client().await;

    assert!(client.list().await.unwrap().is_empty());

    let created = client.create("write the report").await.unwrap();
    assert_eq!(created.text, "write the report");
    assert!(!created.completed);

    // Toggle completion.
    let toggled = client
        .update(created.id, &UpdateTaskRequest::completed(true))
        .await
        .unwrap();
    assert!(toggled.completed);
    assert_eq!(toggled.text, "write the report");

    // Replace the text.
    let renamed = client
        .update(created.id, &UpdateTaskRequest::text("file the report".to_string()))
        .await
        .unwrap();
    assert_eq!(renamed.text, "file the report");
    assert!(renamed.completed); // flag untouched by a text-only update

    let listed = client.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].text, "file the report");

    client.delete(created.id).await.unwrap();
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_trims_surrounding_whitespace() {
    let client = start_client().await;
    let created = client.create("  padded  ").await.unwrap();
    assert_eq!(created.text, "padded");
}

#[tokio::test]
async fn blank_create_is_rejected_and_list_unchanged() {
    let client = start_client().await;

    let err = client.create("   ").await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 400, .. }));

    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_unknown_id_is_rejected_with_404() {
    let client = start_client().await;

    let err = client
        .update(
            taskdeck_proto::task::TaskId::new(),
            &UpdateTaskRequest::completed(true),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 404, .. }));
}

#[tokio::test]
async fn update_to_blank_text_is_rejected_with_400() {
    let client = start_client().await;
    let created = client.create("keep me").await.unwrap();

    let err = client
        .update(created.id, &UpdateTaskRequest::text("  ".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 400, .. }));

    // Original text survives the rejected update.
    let listed = client.list().await.unwrap();
    assert_eq!(listed[0].text, "keep me");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let client = start_client().await;
    let created = client.create("fleeting").await.unwrap();

    let first = client.delete(created.id).await.unwrap();
    let second = client.delete(created.id).await.unwrap();
    assert_eq!(first.message, second.message);
}

#[tokio::test]
async fn list_returns_newest_first() {
    let client = start_client().await;

    for text in ["first", "second", "third"] {
        client.create(text).await.unwrap();
        // Separate creation timestamps across millisecond boundaries.
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let listed = client.list().await.unwrap();
    let texts: Vec<&str> = listed.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["third", "second", "first"]);
}
