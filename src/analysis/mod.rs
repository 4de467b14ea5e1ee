pub mod file_types;
pub mod score;
pub mod types;

pub use types::{ChangeSize, FileTypeInfo, PrAnalysis, ReviewPriority};

use rand::Rng;

use crate::comment;
use crate::github::types::PrFile;

/// Analyze a pull request and assemble the full result.
///
/// Pure: no I/O, no hidden state. The only non-determinism is the
/// message pick, which goes through the caller-supplied RNG so tests
/// can pin a seeded one. Total over its domain — degenerate inputs
/// (empty file list, single extension) yield a diversity of 0 rather
/// than an error, and the catch-all Huge/Urgent tiers mean
/// classification always succeeds.
pub fn analyze_pr(
    pr_number: u64,
    repo_full_name: &str,
    additions: usize,
    deletions: usize,
    files: &[PrFile],
    rng: &mut impl Rng,
) -> PrAnalysis {
    let changed_files = files.len();
    let file_types = file_types::analyze_file_types(files);
    let file_type_diversity = file_types::file_type_diversity(&file_types, changed_files);
    let size_category = score::classify_size(additions, deletions, changed_files);
    let complexity_score =
        score::complexity_score(additions, deletions, changed_files, file_type_diversity);
    let review_priority = score::classify_priority(complexity_score);
    let message = comment::pick_message(size_category, rng).to_string();
    let cat_art = comment::cat_art(review_priority);

    PrAnalysis {
        pr_number,
        repo_full_name: repo_full_name.to_string(),
        additions,
        deletions,
        changed_files,
        file_type_diversity,
        complexity_score,
        review_priority,
        size_category,
        message,
        cat_art,
    }
}
