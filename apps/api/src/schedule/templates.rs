//! Fixed task templates the schedule synchronizer generates from. A task is
//! recognized as system-generated by exact (title, college_id) match against
//! these templates, so the title strings here are load-bearing: changing one
//! orphans every previously generated row.

use crate::models::task::{TaskCategory, TaskPriority};

/// A portfolio-wide task anchored to the earliest deadline across all of the
/// user's colleges.
pub struct GlobalTemplate {
    pub title: &'static str,
    pub description: &'static str,
    /// Days before the anchor date the task is ideally due.
    pub offset_days: i64,
    /// Days after today to fall back to when the ideal date is already past.
    pub fallback_days: i64,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    /// Emitted only when at least one college's test policy is "Required".
    pub needs_required_tests: bool,
}

pub const GLOBAL_TEMPLATES: &[GlobalTemplate] = &[
    GlobalTemplate {
        title: "Request transcripts",
        description: "Ask your counselor to send official transcripts to each college",
        offset_days: 45,
        fallback_days: 7,
        category: TaskCategory::Document,
        priority: TaskPriority::High,
        needs_required_tests: false,
    },
    GlobalTemplate {
        title: "Send official test scores",
        description: "Order official SAT/ACT score reports for colleges that require them",
        offset_days: 30,
        fallback_days: 7,
        category: TaskCategory::Document,
        priority: TaskPriority::High,
        needs_required_tests: true,
    },
    GlobalTemplate {
        title: "Submit FAFSA/CSS profile",
        description: "Complete and submit financial aid applications",
        offset_days: 45,
        fallback_days: 3,
        category: TaskCategory::General,
        priority: TaskPriority::High,
        needs_required_tests: false,
    },
    GlobalTemplate {
        title: "Confirm recommenders",
        description: "Check that every recommender has agreed and knows the deadlines",
        offset_days: 60,
        fallback_days: 3,
        category: TaskCategory::Lor,
        priority: TaskPriority::High,
        needs_required_tests: false,
    },
];

/// Per-college recommender assignment, due this many days before that
/// college's own deadline. Deliberately not past-date clamped.
pub const LOR_ASSIGN_OFFSET_DAYS: i64 = 30;

/// Per-essay offsets relative to the essay's college deadline.
pub const ESSAY_DRAFT_OFFSET_DAYS: i64 = 21;
pub const ESSAY_POLISH_OFFSET_DAYS: i64 = 5;

const TITLE_TRUNCATE_CHARS: usize = 30;

pub fn lor_assign_title(college_name: &str) -> String {
    format!("Assign recommenders for {college_name}")
}

pub fn essay_draft_title(essay_title: &str) -> String {
    format!("Draft: {}", truncate_title(essay_title))
}

pub fn essay_polish_title(essay_title: &str) -> String {
    format!("Polish & Finalize: {}", truncate_title(essay_title))
}

/// Truncates long essay titles to keep generated task titles scannable.
fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_TRUNCATE_CHARS {
        title.to_string()
    } else {
        let head: String = title.chars().take(TITLE_TRUNCATE_CHARS).collect();
        format!("{head}...")
    }
}
