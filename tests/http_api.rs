//! End-to-end tests over a real TCP listener with the in-memory backend.

use notes_api::notes::handlers::router;
use notes_api::notes::types::Note;
use notes_api::storage::memory::MemoryNoteStore;
use std::net::SocketAddr;
use std::sync::Arc;

async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::new(MemoryNoteStore::new()));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn test_greeting_over_http() {
    let addr = spawn_server().await;

    let resp = reqwest::get(format!("http://{}/", addr)).await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "Hello world");
}

#[tokio::test]
async fn test_post_and_list_notes_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/note", addr);

    let listed: Vec<Note> = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert!(listed.is_empty());

    let resp = client
        .post(&url)
        .json(&serde_json::json!({ "body": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let ack: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(ack, serde_json::json!({ "message": "ok" }));

    let listed: Vec<Note> = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].body, "hello");
    assert!(!listed[0].id.is_nil());
    let age = chrono::Utc::now() - listed[0].created_at;
    assert!(age.num_seconds() < 60);
}

#[tokio::test]
async fn test_missing_body_field_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/note", addr);

    let resp = client
        .post(&url)
        .json(&serde_json::json!({ "content": "hello" }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());

    let listed: Vec<Note> = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert!(listed.is_empty());
}
