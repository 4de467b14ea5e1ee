/// Size bucket for a pull request, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeSize {
    Small,
    Medium,
    Large,
    Huge,
}

impl std::fmt::Display for ChangeSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeSize::Small => write!(f, "small"),
            ChangeSize::Medium => write!(f, "medium"),
            ChangeSize::Large => write!(f, "large"),
            ChangeSize::Huge => write!(f, "huge"),
        }
    }
}

/// Review urgency derived from the complexity score.
/// The discriminant doubles as the emoji repeat count in the rendered comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReviewPriority {
    Low = 1,
    Medium = 2,
    High = 3,
    Urgent = 4,
}

impl ReviewPriority {
    /// How many times the priority glyph is repeated in the comment.
    pub fn as_count(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ReviewPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewPriority::Low => write!(f, "low"),
            ReviewPriority::Medium => write!(f, "medium"),
            ReviewPriority::High => write!(f, "high"),
            ReviewPriority::Urgent => write!(f, "urgent"),
        }
    }
}

/// Aggregated stats for one file extension within a PR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypeInfo {
    /// Lower-cased extension including the leading dot (e.g., ".rs"),
    /// or "no-extension" for files without one
    pub extension: String,
    /// Number of changed files with this extension
    pub count: usize,
    /// Lines added across those files
    pub additions: usize,
    /// Lines deleted across those files
    pub deletions: usize,
}

/// Complete analysis of one pull request.
/// Built once per webhook delivery, consumed by the comment renderer.
#[derive(Debug, Clone)]
pub struct PrAnalysis {
    /// PR number (e.g., 42)
    pub pr_number: u64,
    /// Repository full name ("owner/repo")
    pub repo_full_name: String,
    /// Total lines added
    pub additions: usize,
    /// Total lines deleted
    pub deletions: usize,
    /// Number of changed files
    pub changed_files: usize,
    /// Normalized file-type diversity in [0, 1]
    pub file_type_diversity: f64,
    /// Weighted complexity score, unbounded above
    pub complexity_score: f64,
    /// Priority tier derived from the complexity score
    pub review_priority: ReviewPriority,
    /// Size tier derived from raw diff stats
    pub size_category: ChangeSize,
    /// Message picked from the size tier's pool
    pub message: String,
    /// ASCII cat for the priority tier
    pub cat_art: &'static str,
}
