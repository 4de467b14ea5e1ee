//! End-to-end tests for the webhook endpoint, driving the router with a
//! stub GitHub API.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use nyan_review::github::{types::PullRequest, GithubError, PrFile, PullRequestApi};
use nyan_review::webhook::{router, AppState};

const SECRET: &str = "hunter2";

/// Records posted comments instead of calling GitHub.
struct StubApi {
    additions: usize,
    deletions: usize,
    files: Vec<PrFile>,
    posted: Mutex<Vec<String>>,
}

impl StubApi {
    fn small_typescript_pr() -> Self {
        Self {
            additions: 20,
            deletions: 10,
            files: vec![stub_file("src/a.ts", 12, 6), stub_file("src/b.ts", 8, 4)],
            posted: Mutex::new(Vec::new()),
        }
    }
}

fn stub_file(filename: &str, additions: usize, deletions: usize) -> PrFile {
    PrFile {
        filename: filename.to_string(),
        status: "modified".to_string(),
        additions,
        deletions,
        changes: additions + deletions,
        patch: None,
    }
}

#[async_trait]
impl PullRequestApi for StubApi {
    async fn get_pull_request(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> Result<PullRequest, GithubError> {
        Ok(PullRequest {
            number,
            title: "Add feature".to_string(),
            additions: self.additions,
            deletions: self.deletions,
            changed_files: self.files.len(),
        })
    }

    async fn list_pull_request_files(
        &self,
        _owner: &str,
        _repo: &str,
        _number: u64,
    ) -> Result<Vec<PrFile>, GithubError> {
        Ok(self.files.clone())
    }

    async fn post_comment(
        &self,
        _owner: &str,
        _repo: &str,
        _number: u64,
        body: &str,
    ) -> Result<(), GithubError> {
        self.posted.lock().unwrap().push(body.to_string());
        Ok(())
    }
}

fn sign(payload: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
    mac.update(payload);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

fn app(api: Arc<StubApi>) -> axum::Router {
    let api: Arc<dyn PullRequestApi> = api;
    router(Arc::new(AppState {
        api,
        webhook_secret: Some(SECRET.to_string()),
    }))
}

fn pull_request_payload(action: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "action": action,
        "pull_request": { "number": 7 },
        "repository": { "full_name": "octo/kitten" },
        "installation": { "id": 1 },
    }))
    .unwrap()
}

fn delivery(event: &str, payload: &[u8], signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("x-github-event", event)
        .header("content-type", "application/json");
    if let Some(sig) = signature {
        builder = builder.header("x-hub-signature-256", sig);
    }
    builder.body(Body::from(payload.to_vec())).unwrap()
}

#[tokio::test]
async fn unsigned_delivery_is_rejected() {
    let api = Arc::new(StubApi::small_typescript_pr());
    let payload = pull_request_payload("opened");

    let response = app(api.clone())
        .oneshot(delivery("pull_request", &payload, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(api.posted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn badly_signed_delivery_is_rejected() {
    let api = Arc::new(StubApi::small_typescript_pr());
    let payload = pull_request_payload("opened");

    let response = app(api.clone())
        .oneshot(delivery(
            "pull_request",
            &payload,
            Some("sha256=deadbeefdeadbeef"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(api.posted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_pull_request_event_is_ignored() {
    let api = Arc::new(StubApi::small_typescript_pr());
    let payload = pull_request_payload("opened");
    let signature = sign(&payload);

    let response = app(api.clone())
        .oneshot(delivery("issues", &payload, Some(&signature)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(api.posted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn uninteresting_action_is_ignored() {
    let api = Arc::new(StubApi::small_typescript_pr());
    let payload = pull_request_payload("closed");
    let signature = sign(&payload);

    let response = app(api.clone())
        .oneshot(delivery("pull_request", &payload, Some(&signature)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(api.posted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_pull_request_data_is_a_bad_request() {
    let api = Arc::new(StubApi::small_typescript_pr());
    let payload = serde_json::to_vec(&serde_json::json!({
        "action": "opened",
        "repository": { "full_name": "octo/kitten" },
    }))
    .unwrap();
    let signature = sign(&payload);

    let response = app(api.clone())
        .oneshot(delivery("pull_request", &payload, Some(&signature)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn opened_pr_gets_a_review_comment() {
    let api = Arc::new(StubApi::small_typescript_pr());
    let payload = pull_request_payload("opened");
    let signature = sign(&payload);

    let response = app(api.clone())
        .oneshot(delivery("pull_request", &payload, Some(&signature)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let posted = api.posted.lock().unwrap();
    assert_eq!(posted.len(), 1);
    let comment = &posted[0];

    // 20 additions, 10 deletions, 2 files, one extension:
    // score = 20 + 5 + 20 = 45 => medium priority, small size.
    assert!(comment.contains("NyanCode Review"));
    assert!(comment.contains("- 📝 Added lines: 20"));
    assert!(comment.contains("- 🗑️ Deleted lines: 10"));
    assert!(comment.contains("- 📂 Changed files: 2"));
    assert!(comment.contains("- 🔄 File type diversity: 0%"));
    assert!(comment.contains("- 🧠 Complexity score: 45"));
    assert!(comment.contains("😼😼 (Medium Priority)"));
    assert!(comment.contains("### Review Tips"));
}

#[tokio::test]
async fn synchronize_action_also_triggers_analysis() {
    let api = Arc::new(StubApi::small_typescript_pr());
    let payload = pull_request_payload("synchronize");
    let signature = sign(&payload);

    let response = app(api.clone())
        .oneshot(delivery("pull_request", &payload, Some(&signature)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(api.posted.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn health_endpoint_answers() {
    let api = Arc::new(StubApi::small_typescript_pr());
    let response = app(api)
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
