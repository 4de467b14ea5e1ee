pub mod types;

pub use types::{PrFile, PullRequest, WebhookEvent};

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),
}

/// Seam between the webhook handler and the GitHub REST API, so the
/// handler can be driven by a stub in tests.
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// Fetch PR metadata (additions, deletions, changed file count).
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequest, GithubError>;

    /// List the PR's changed files with per-file stats.
    async fn list_pull_request_files(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<PrFile>, GithubError>;

    /// Post a comment on the PR's issue thread.
    async fn post_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<(), GithubError>;
}

const USER_AGENT: &str = "nyan-review";
const RETRY_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Retry an async operation with exponential backoff.
/// The delay doubles after each failed attempt.
pub async fn retry_with_backoff<T, E, F, Fut>(
    attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = base_delay;
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                warn!(attempt, error = %err, "GitHub request failed, retrying");
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// GitHub REST client authenticated with a bearer token.
pub struct GithubClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn pull_url(&self, owner: &str, repo: &str, number: u64) -> String {
        format!("{}/repos/{}/{}/pulls/{}", self.base_url, owner, repo, number)
    }

    async fn get_pull_request_once(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequest, GithubError> {
        let response = self
            .client
            .get(self.pull_url(owner, repo, number))
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<PullRequest>().await?)
    }

    async fn list_files_once(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<PrFile>, GithubError> {
        let url = format!("{}/files", self.pull_url(owner, repo, number));
        let response = self
            .client
            .get(&url)
            .query(&[("per_page", "100")])
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Vec<PrFile>>().await?)
    }

    async fn post_comment_once(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<(), GithubError> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_url, owner, repo, number
        );
        self.client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl PullRequestApi for GithubClient {
    #[instrument(skip(self))]
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequest, GithubError> {
        let pr = retry_with_backoff(RETRY_ATTEMPTS, RETRY_BASE_DELAY, || {
            self.get_pull_request_once(owner, repo, number)
        })
        .await?;
        debug!(title = %pr.title, changed_files = pr.changed_files, "received PR metadata");
        Ok(pr)
    }

    #[instrument(skip(self))]
    async fn list_pull_request_files(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<PrFile>, GithubError> {
        let files = retry_with_backoff(RETRY_ATTEMPTS, RETRY_BASE_DELAY, || {
            self.list_files_once(owner, repo, number)
        })
        .await?;
        debug!(files = files.len(), "received PR file list");
        Ok(files)
    }

    #[instrument(skip(self, body))]
    async fn post_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<(), GithubError> {
        retry_with_backoff(RETRY_ATTEMPTS, RETRY_BASE_DELAY, || {
            self.post_comment_once(owner, repo, number, body)
        })
        .await?;
        debug!(bytes = body.len(), "posted PR comment");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retry_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> =
            retry_with_backoff(3, Duration::from_millis(1), || async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(format!("transient failure {}", n))
                } else {
                    Ok(n)
                }
            })
            .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_attempts_exhausted() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> =
            retry_with_backoff(3, Duration::from_millis(1), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("always fails".to_string())
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_first_success_makes_one_call() {
        let calls = AtomicU32::new(0);
        let result: Result<&str, String> =
            retry_with_backoff(3, Duration::from_millis(1), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("ok")
            })
            .await;
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pull_url_shape() {
        let client = GithubClient::new("https://api.github.com", "token");
        assert_eq!(
            client.pull_url("octo", "kitten", 42),
            "https://api.github.com/repos/octo/kitten/pulls/42"
        );
    }
}
