use corkboard_backend::api;
use corkboard_backend::bootstrap;
use corkboard_backend::config::{CorkboardConfig, CorkboardPaths};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tokio::time::{sleep, Duration};

struct TestServer {
    _dir: TempDir,
    server: tokio::task::JoinHandle<()>,
    base_url: String,
}

impl TestServer {
    async fn shutdown(self) {
        self.server.abort();
        let _ = self.server.await;
    }
}

fn next_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind ephemeral port")
        .local_addr()
        .unwrap()
        .port()
}

async fn wait_for_health(base_url: &str) {
    let client = reqwest::Client::new();
    for _ in 0..50 {
        if let Ok(resp) = client.get(format!("{base_url}/health")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        sleep(Duration::from_millis(100)).await;
    }
    panic!("server did not become healthy in time");
}

async fn spawn_server() -> TestServer {
    let dir = tempdir().expect("tempdir");
    let port = next_port();
    let config = CorkboardConfig::new(port, CorkboardPaths::from_base_dir(dir.path()));
    let database = bootstrap::initialize(&config).expect("bootstrap");

    let server = tokio::spawn(async move {
        let _ = api::serve_http(config, database).await;
    });

    let base_url = format!("http://127.0.0.1:{port}");
    wait_for_health(&base_url).await;

    TestServer {
        _dir: dir,
        server,
        base_url,
    }
}

async fn create_post(client: &reqwest::Client, base_url: &str, payload: Value) -> Value {
    client
        .post(format!("{base_url}/posts"))
        .json(&payload)
        .send()
        .await
        .expect("create response")
        .error_for_status()
        .expect("create status")
        .json()
        .await
        .expect("create json")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rest_roundtrip() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let alice = create_post(
        &client,
        &server.base_url,
        json!({ "posterName": "Alice", "content": "Hello" }),
    )
    .await;
    let alice_id = alice["id"].as_str().expect("post id").to_string();
    assert_eq!(alice["posterName"], "Alice");
    assert_eq!(alice["content"], "Hello");
    assert_eq!(alice["replies"], json!([]));
    assert!(alice.get("replyToId").is_none());

    let fetched: Value = client
        .get(format!("{}/posts/{alice_id}", server.base_url))
        .send()
        .await
        .expect("get response")
        .error_for_status()
        .expect("get status")
        .json()
        .await
        .expect("get json");
    assert_eq!(fetched["posterName"], "Alice");
    assert_eq!(fetched["content"], "Hello");

    let bob = create_post(
        &client,
        &server.base_url,
        json!({ "posterName": "Bob", "content": "Hi Alice", "replyToId": alice_id }),
    )
    .await;
    let bob_id = bob["id"].as_str().expect("reply id").to_string();
    assert_eq!(bob["replyTo"]["id"], json!(alice_id.clone()));

    let replies: Value = client
        .get(format!("{}/posts/{alice_id}/replies", server.base_url))
        .send()
        .await
        .expect("replies response")
        .error_for_status()
        .expect("replies status")
        .json()
        .await
        .expect("replies json");
    let replies = replies.as_array().expect("replies array");
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["id"], json!(bob_id.clone()));

    // the reply never shows up top-level, only nested under its parent
    let posts: Value = client
        .get(format!("{}/posts", server.base_url))
        .send()
        .await
        .expect("list response")
        .error_for_status()
        .expect("list status")
        .json()
        .await
        .expect("list json");
    let posts = posts.as_array().expect("posts array");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["id"], json!(alice_id.clone()));
    assert_eq!(posts[0]["replies"][0]["id"], json!(bob_id.clone()));

    let updated: Value = client
        .put(format!("{}/posts/{alice_id}", server.base_url))
        .json(&json!({ "content": "Hello, edited" }))
        .send()
        .await
        .expect("update response")
        .error_for_status()
        .expect("update status")
        .json()
        .await
        .expect("update json");
    assert_eq!(updated["content"], "Hello, edited");
    assert_eq!(updated["posterName"], "Alice");

    let resp = client
        .delete(format!("{}/posts/{bob_id}", server.base_url))
        .send()
        .await
        .expect("delete response");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/posts/{bob_id}", server.base_url))
        .send()
        .await
        .expect("get deleted response");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reply_to_unknown_parent_is_rejected() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/posts", server.base_url))
        .json(&json!({ "posterName": "Bob", "content": "orphan", "replyToId": "no-such-post" }))
        .send()
        .await
        .expect("create response");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("error json");
    assert!(body["message"]
        .as_str()
        .expect("error message")
        .contains("no-such-post"));

    // the failed create left nothing behind
    let posts: Value = client
        .get(format!("{}/posts", server.base_url))
        .send()
        .await
        .expect("list response")
        .json()
        .await
        .expect("list json");
    assert_eq!(posts, json!([]));

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn delete_of_unknown_post_references_the_id() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{}/posts/unknown-id", server.base_url))
        .send()
        .await
        .expect("delete response");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("error json");
    assert!(body["message"]
        .as_str()
        .expect("error message")
        .contains("unknown-id"));

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn blank_fields_are_rejected_as_bad_request() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/posts", server.base_url))
        .json(&json!({ "posterName": "  ", "content": "Hello" }))
        .send()
        .await
        .expect("create response");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    server.shutdown().await;
}
