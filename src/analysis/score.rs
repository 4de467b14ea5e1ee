//! Threshold tables and the size/priority classifiers.

use super::types::{ChangeSize, ReviewPriority};

/// Inclusive upper bounds a PR must fully satisfy to qualify for a size tier.
#[derive(Debug, Clone, Copy)]
struct SizeThresholds {
    additions: usize,
    deletions: usize,
    changed_files: usize,
}

/// Bounded size tiers in ascending order. Anything above Large is Huge.
const SIZE_TIERS: [(ChangeSize, SizeThresholds); 3] = [
    (
        ChangeSize::Small,
        SizeThresholds { additions: 50, deletions: 30, changed_files: 3 },
    ),
    (
        ChangeSize::Medium,
        SizeThresholds { additions: 200, deletions: 100, changed_files: 7 },
    ),
    (
        ChangeSize::Large,
        SizeThresholds { additions: 500, deletions: 250, changed_files: 15 },
    ),
];

/// Weights for the complexity score's linear combination.
struct ComplexityWeights {
    additions: f64,
    deletions: f64,
    changed_files: f64,
    file_type_diversity: f64,
}

const COMPLEXITY_WEIGHTS: ComplexityWeights = ComplexityWeights {
    additions: 1.0,
    deletions: 0.5,
    changed_files: 10.0,
    file_type_diversity: 15.0,
};

/// Inclusive score cutoffs in ascending order. Anything above High is Urgent.
const PRIORITY_CUTOFFS: [(ReviewPriority, f64); 3] = [
    (ReviewPriority::Low, 30.0),
    (ReviewPriority::Medium, 60.0),
    (ReviewPriority::High, 100.0),
];

/// Classify the PR size from raw diff stats.
///
/// A PR qualifies for a tier only if all three stats are within that
/// tier's bounds; tiers are checked ascending and the first fully
/// satisfied one wins.
pub fn classify_size(additions: usize, deletions: usize, changed_files: usize) -> ChangeSize {
    for (size, t) in &SIZE_TIERS {
        if additions <= t.additions && deletions <= t.deletions && changed_files <= t.changed_files
        {
            return *size;
        }
    }
    ChangeSize::Huge
}

/// Weighted complexity score. Diversity is scaled to 0-100 before
/// weighting so it is commensurate with the line counts.
pub fn complexity_score(
    additions: usize,
    deletions: usize,
    changed_files: usize,
    file_type_diversity: f64,
) -> f64 {
    additions as f64 * COMPLEXITY_WEIGHTS.additions
        + deletions as f64 * COMPLEXITY_WEIGHTS.deletions
        + changed_files as f64 * COMPLEXITY_WEIGHTS.changed_files
        + file_type_diversity * 100.0 * COMPLEXITY_WEIGHTS.file_type_diversity
}

/// Map a complexity score to a review priority. Cutoffs are inclusive
/// and checked ascending, so a score of exactly 30 is Low, not Medium.
pub fn classify_priority(complexity_score: f64) -> ReviewPriority {
    for (priority, cutoff) in &PRIORITY_CUTOFFS {
        if complexity_score <= *cutoff {
            return *priority;
        }
    }
    ReviewPriority::Urgent
}
