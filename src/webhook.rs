//! GitHub webhook endpoint: signature check, event filtering, and the
//! fetch → analyze → comment pipeline.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::analysis::{self, ReviewPriority};
use crate::comment;
use crate::github::{GithubError, PullRequestApi, WebhookEvent};

type HmacSha256 = Hmac<Sha256>;

/// Shared handler state.
pub struct AppState {
    pub api: Arc<dyn PullRequestApi>,
    pub webhook_secret: Option<String>,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhook", post(receive).get(webhook_info))
        .route("/healthz", get(health))
        .with_state(state)
}

pub async fn health() -> &'static str {
    "ok"
}

/// GET /webhook — lets an operator confirm the endpoint is reachable.
pub async fn webhook_info() -> Json<Value> {
    Json(json!({ "message": "nyan-review webhook endpoint is active" }))
}

/// POST /webhook — one GitHub delivery.
///
/// The signature is verified over the raw body before anything is
/// parsed. Uninteresting events and actions are acknowledged with 200
/// so GitHub does not mark the delivery as failed.
pub async fn receive(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let signature = headers
        .get("x-hub-signature-256")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !verify_signature(state.webhook_secret.as_deref(), &body, signature) {
        warn!("rejected delivery with invalid signature");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid signature" })),
        );
    }

    let event_type = headers
        .get("x-github-event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if event_type != "pull_request" {
        debug!(event_type, "ignoring event type");
        return (StatusCode::OK, Json(json!({ "message": "ignored event type" })));
    }

    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "malformed webhook payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "malformed payload" })),
            );
        }
    };

    if event.action != "opened" && event.action != "synchronize" {
        debug!(action = %event.action, "ignoring action");
        return (StatusCode::OK, Json(json!({ "message": "ignored action type" })));
    }

    let Some(pull_request) = event.pull_request else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "no pull request data" })),
        );
    };

    if let Some(installation) = &event.installation {
        debug!(installation = installation.id, "delivery from app installation");
    }

    let repo_full_name = &event.repository.full_name;
    let Some((owner, repo)) = repo_full_name.split_once('/') else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid repository name" })),
        );
    };

    match handle_pull_request(
        state.api.as_ref(),
        owner,
        repo,
        pull_request.number,
        repo_full_name,
    )
    .await
    {
        Ok(priority) => {
            info!(
                repo = %repo_full_name,
                pr = pull_request.number,
                priority = %priority,
                "PR analyzed and comment posted"
            );
            (
                StatusCode::OK,
                Json(json!({ "message": "PR analyzed and comment posted" })),
            )
        }
        Err(err) => {
            error!(error = %err, repo = %repo_full_name, pr = pull_request.number, "failed to process pull request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal server error" })),
            )
        }
    }
}

/// Fetch PR data, run the analysis, and post the rendered comment.
async fn handle_pull_request(
    api: &dyn PullRequestApi,
    owner: &str,
    repo: &str,
    number: u64,
    repo_full_name: &str,
) -> Result<ReviewPriority, GithubError> {
    let details = api.get_pull_request(owner, repo, number).await?;
    let files = api.list_pull_request_files(owner, repo, number).await?;

    let analysis = analysis::analyze_pr(
        number,
        repo_full_name,
        details.additions,
        details.deletions,
        &files,
        &mut rand::rng(),
    );
    info!(
        size = %analysis.size_category,
        priority = %analysis.review_priority,
        score = analysis.complexity_score,
        diversity = analysis.file_type_diversity,
        "analysis complete"
    );

    let body = comment::render_comment(&analysis);
    api.post_comment(owner, repo, number, &body).await?;
    Ok(analysis.review_priority)
}

/// Verify a `sha256=<hex>` signature header against the raw payload.
///
/// Rejects everything when no secret is configured. The comparison goes
/// through hmac's verify_slice, which is constant-time.
pub fn verify_signature(secret: Option<&str>, payload: &[u8], signature: &str) -> bool {
    let Some(secret) = secret else {
        warn!("webhook secret not configured");
        return false;
    };
    let Some(hex_sig) = signature.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(sig_bytes) = hex::decode(hex_sig) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&sig_bytes).is_ok()
}
