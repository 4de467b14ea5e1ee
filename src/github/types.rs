use serde::Deserialize;

/// Payload of a GitHub webhook delivery, reduced to the fields the bot
/// acts on. Unknown fields are ignored by serde.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event action (e.g., "opened", "synchronize", "closed")
    pub action: String,
    /// Present on pull_request events
    pub pull_request: Option<EventPullRequest>,
    /// Repository the event belongs to
    pub repository: Repository,
    /// GitHub App installation that delivered the event
    pub installation: Option<Installation>,
}

/// The pull_request object inside a webhook payload. Only the number is
/// needed here; full metadata is re-fetched from the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct EventPullRequest {
    pub number: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// "owner/repo"
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Installation {
    pub id: u64,
}

/// PR metadata from GET /repos/{owner}/{repo}/pulls/{number}.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 42)
    pub number: u64,
    /// PR title
    pub title: String,
    /// Total lines added
    pub additions: usize,
    /// Total lines deleted
    pub deletions: usize,
    /// Total files changed
    pub changed_files: usize,
}

/// One changed file from GET /repos/{owner}/{repo}/pulls/{number}/files.
#[derive(Debug, Clone, Deserialize)]
pub struct PrFile {
    /// Path within the repository
    pub filename: String,
    /// Change status ("added", "modified", "removed", ...)
    pub status: String,
    /// Lines added in this file
    pub additions: usize,
    /// Lines deleted in this file
    pub deletions: usize,
    /// additions + deletions
    pub changes: usize,
    /// Unified-diff patch text; absent for binary files
    pub patch: Option<String>,
}
