//! Renders a PrAnalysis into the cat-themed Markdown comment.

use rand::Rng;

use crate::analysis::{ChangeSize, PrAnalysis, ReviewPriority};

const SMALL_MESSAGES: [&str; 3] = [
    "Meow! This is a small change, should be quick to review! 🐾",
    "Purr~ A tiny PR, perfect for a quick review between tasks! 😺",
    "Nya~ Small and focused changes are the best! Easy to review! ✨",
];

const MEDIUM_MESSAGES: [&str; 3] = [
    "Meow~ This PR has a decent amount of changes. Take your time! 🐱",
    "Nya! A medium-sized PR that deserves proper attention! 👀",
    "Purr... This will take a bit of time to review properly. ☕",
];

const LARGE_MESSAGES: [&str; 3] = [
    "Meoooow! This is a large PR! Consider breaking it down next time! 🙀",
    "Nya~! Quite a lot of changes here. Grab a coffee before reviewing! ☕",
    "Purrrr... This large PR will need careful review. Take your time! 🐈",
];

const HUGE_MESSAGES: [&str; 3] = [
    "MEOOOOOW!!! This PR is HUGE! Consider splitting it into smaller ones! 😿",
    "NYAAA!!! So many changes! This might take a whole day to review! 🙀🙀",
    "HISSSSS!!! This PR is too big! Please consider our review sanity! 😾",
];

/// The cat grows with the priority.
const CAT_ART_LOW: &str = r"
  /\_/\
 ( o.o )
  > ^ <
";

const CAT_ART_MEDIUM: &str = r"
   /\_/\
  ( -.- )
   > ^ <
  /     \
";

const CAT_ART_HIGH: &str = r"
   /\_/\
  ( O.O )
   > ^ <
  /     \
 /       \
";

const CAT_ART_URGENT: &str = r"
    /\_/\
   ( @.@ )
    > ^ <
   /     \
  /       \
 /         \
";

/// Message pool for a size tier.
pub(crate) fn messages_for(size: ChangeSize) -> &'static [&'static str; 3] {
    match size {
        ChangeSize::Small => &SMALL_MESSAGES,
        ChangeSize::Medium => &MEDIUM_MESSAGES,
        ChangeSize::Large => &LARGE_MESSAGES,
        ChangeSize::Huge => &HUGE_MESSAGES,
    }
}

/// Pick one message from the size tier's pool.
pub fn pick_message(size: ChangeSize, rng: &mut impl Rng) -> &'static str {
    let pool = messages_for(size);
    pool[rng.random_range(0..pool.len())]
}

/// ASCII cat for a priority tier.
pub fn cat_art(priority: ReviewPriority) -> &'static str {
    match priority {
        ReviewPriority::Low => CAT_ART_LOW,
        ReviewPriority::Medium => CAT_ART_MEDIUM,
        ReviewPriority::High => CAT_ART_HIGH,
        ReviewPriority::Urgent => CAT_ART_URGENT,
    }
}

fn priority_emoji(priority: ReviewPriority) -> &'static str {
    match priority {
        ReviewPriority::Low => "😺",
        ReviewPriority::Medium => "😼",
        ReviewPriority::High => "🙀",
        ReviewPriority::Urgent => "🔥",
    }
}

fn priority_label(priority: ReviewPriority) -> &'static str {
    match priority {
        ReviewPriority::Low => "Low Priority",
        ReviewPriority::Medium => "Medium Priority",
        ReviewPriority::High => "High Priority",
        ReviewPriority::Urgent => "URGENT PRIORITY",
    }
}

/// Emoji scale: the priority glyph repeated `priority` times plus a label,
/// e.g. "😼😼 (Medium Priority)".
fn priority_scale(priority: ReviewPriority) -> String {
    format!(
        "{} ({})",
        priority_emoji(priority).repeat(priority.as_count()),
        priority_label(priority)
    )
}

/// Render the full review comment for a PR analysis.
///
/// Rounding is f64::round (half away from zero) for both the diversity
/// percentage and the complexity score.
pub fn render_comment(analysis: &PrAnalysis) -> String {
    let diversity_percentage = (analysis.file_type_diversity * 100.0).round() as i64;
    let rounded_score = analysis.complexity_score.round() as i64;

    let mut md = String::new();
    md.push_str("# 😺 NyanCode Review 😺\n\n");
    md.push_str(&analysis.message);
    md.push_str("\n\n```\n");
    md.push_str(analysis.cat_art.trim_matches('\n'));
    md.push_str("\n```\n\n");
    md.push_str("## PR Stats\n");
    md.push_str(&format!("- 📝 Added lines: {}\n", analysis.additions));
    md.push_str(&format!("- 🗑️ Deleted lines: {}\n", analysis.deletions));
    md.push_str(&format!("- 📂 Changed files: {}\n", analysis.changed_files));
    md.push_str(&format!("- 🔄 File type diversity: {}%\n", diversity_percentage));
    md.push_str(&format!("- 🧠 Complexity score: {}\n\n", rounded_score));
    md.push_str(&format!(
        "## Review Priority: {}\n\n",
        priority_scale(analysis.review_priority)
    ));
    md.push_str(&review_tips(analysis.size_category, analysis.review_priority));
    md.push_str("\n---\n*Meow! I'm NyanCode Review, a cat who helps with code reviews! 🐱*\n");
    md
}

/// Size-specific review guidance, with extra caution appended for
/// High/Urgent complexity.
fn review_tips(size: ChangeSize, priority: ReviewPriority) -> String {
    let mut tips = String::from("### Review Tips\n");

    match size {
        ChangeSize::Small => {
            tips.push_str("- This is a small PR, should be quick to review!\n");
            tips.push_str("- Look for edge cases that might have been missed.\n");
        }
        ChangeSize::Medium => {
            tips.push_str("- Take your time to understand the changes.\n");
            tips.push_str("- Check if tests cover the main functionality.\n");
        }
        ChangeSize::Large => {
            tips.push_str("- Consider reviewing this PR in multiple sessions.\n");
            tips.push_str("- Focus on the architecture and design first, then details.\n");
            tips.push_str("- Suggest breaking large PRs into smaller ones in the future.\n");
        }
        ChangeSize::Huge => {
            tips.push_str("- This PR is very large! Consider asking for it to be split up.\n");
            tips.push_str("- Review high-level architecture first before diving into details.\n");
            tips.push_str("- Take breaks between reviewing different sections.\n");
            tips.push_str("- Consider pair-reviewing for better coverage.\n");
        }
    }

    if priority >= ReviewPriority::High {
        tips.push_str("- This PR has high complexity, review with extra care!\n");
        tips.push_str("- Consider discussing complex parts with the author.\n");
    }

    tips
}
