//! Progress estimation — the single scoring function behind every surface
//! that displays application completion (college list, per-college endpoint,
//! analytics summary). Callers must not reimplement variant scoring.

use crate::models::college::CollegeRow;
use crate::models::essay::EssayRow;
use crate::models::task::TaskRow;

const ESSAY_WEIGHT: f64 = 0.4;
const TASK_WEIGHT: f64 = 0.6;

/// Ceiling on word-count credit for an essay not explicitly finalized.
const INCOMPLETE_ESSAY_CAP: f64 = 0.8;

/// Computes a 0–100 completion percentage for one college.
///
/// Pure and infallible: the input collections may contain items for other
/// colleges (filtered here by `college_id`), and missing or malformed data
/// degrades to a zero contribution rather than an error, since progress
/// display must never crash a UI surface.
pub fn estimate_progress(college: &CollegeRow, essays: &[EssayRow], tasks: &[TaskRow]) -> u8 {
    let essays: Vec<&EssayRow> = essays
        .iter()
        .filter(|e| e.college_id == Some(college.id))
        .collect();
    let tasks: Vec<&TaskRow> = tasks
        .iter()
        .filter(|t| t.college_id == Some(college.id))
        .collect();

    // A college with no generated work is "not started" regardless of its
    // status field.
    if essays.is_empty() && tasks.is_empty() {
        return 0;
    }

    let essay_score = if essays.is_empty() {
        None
    } else {
        let sum: f64 = essays.iter().map(|e| essay_contribution(e)).sum();
        Some(sum / essays.len() as f64)
    };

    let task_score = if tasks.is_empty() {
        None
    } else {
        let done = tasks.iter().filter(|t| t.completed).count();
        Some(done as f64 / tasks.len() as f64)
    };

    // A missing category contributes no weight; the other takes the full 1.0
    // so we never divide against work that does not exist.
    let combined = match (essay_score, task_score) {
        (Some(e), Some(t)) => e * ESSAY_WEIGHT + t * TASK_WEIGHT,
        (Some(e), None) => e,
        (None, Some(t)) => t,
        (None, None) => unreachable!("both-empty case returns early"),
    };

    (combined * 100.0).round().clamp(0.0, 100.0) as u8
}

fn essay_contribution(essay: &EssayRow) -> f64 {
    if essay.is_completed {
        return 1.0;
    }
    match essay.word_limit {
        Some(limit) if limit > 0 => {
            let ratio = (essay.word_count as f64 / limit as f64).min(1.0);
            ratio * INCOMPLETE_ESSAY_CAP
        }
        // Zero, negative, or absent word limit: no denominator to measure
        // against, so an unfinalized essay earns nothing.
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn college(id: Uuid) -> CollegeRow {
        CollegeRow {
            id,
            user_id: Uuid::new_v4(),
            name: "Test University".to_string(),
            platform: "Common App".to_string(),
            deadline: None,
            deadline_type: "RD".to_string(),
            test_policy: "Optional".to_string(),
            lors_required: 0,
            portfolio_required: false,
            status: "In Progress".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn essay(
        college_id: Option<Uuid>,
        word_count: i32,
        word_limit: Option<i32>,
        is_completed: bool,
    ) -> EssayRow {
        EssayRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            college_id,
            title: "Why us".to_string(),
            essay_type: "supplemental".to_string(),
            prompt: None,
            word_limit,
            content: String::new(),
            word_count,
            is_completed,
            version: 1,
            college_deadline: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn task(college_id: Option<Uuid>, completed: bool) -> TaskRow {
        TaskRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            college_id,
            title: "Request transcripts".to_string(),
            description: None,
            due_date: None,
            category: "Document".to_string(),
            priority: "High".to_string(),
            completed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_essays_no_tasks_is_zero() {
        let c = college(Uuid::new_v4());
        assert_eq!(estimate_progress(&c, &[], &[]), 0);
    }

    #[test]
    fn test_ignores_other_colleges_work() {
        let c = college(Uuid::new_v4());
        let other = Uuid::new_v4();
        let essays = vec![essay(Some(other), 500, Some(500), true)];
        let tasks = vec![task(Some(other), true)];
        assert_eq!(estimate_progress(&c, &essays, &tasks), 0);
    }

    #[test]
    fn test_only_completed_tasks_is_full() {
        let id = Uuid::new_v4();
        let c = college(id);
        let tasks = vec![task(Some(id), true), task(Some(id), true)];
        assert_eq!(estimate_progress(&c, &[], &tasks), 100);
    }

    #[test]
    fn test_single_empty_essay_is_zero() {
        let id = Uuid::new_v4();
        let c = college(id);
        let essays = vec![essay(Some(id), 0, Some(650), false)];
        assert_eq!(estimate_progress(&c, &essays, &[]), 0);
    }

    #[test]
    fn test_single_completed_essay_is_full() {
        let id = Uuid::new_v4();
        let c = college(id);
        let essays = vec![essay(Some(id), 650, Some(650), true)];
        assert_eq!(estimate_progress(&c, &essays, &[]), 100);
    }

    #[test]
    fn test_unfinalized_essay_caps_at_eighty() {
        // Word count equal to the limit without explicit finalization earns
        // at most 0.8 credit, weighted 1.0 since no tasks exist.
        let id = Uuid::new_v4();
        let c = college(id);
        let essays = vec![essay(Some(id), 650, Some(650), false)];
        assert_eq!(estimate_progress(&c, &essays, &[]), 80);
    }

    #[test]
    fn test_word_count_over_limit_is_clamped() {
        let id = Uuid::new_v4();
        let c = college(id);
        let essays = vec![essay(Some(id), 900, Some(650), false)];
        assert_eq!(estimate_progress(&c, &essays, &[]), 80);
    }

    #[test]
    fn test_missing_word_limit_contributes_zero() {
        let id = Uuid::new_v4();
        let c = college(id);
        let essays = vec![essay(Some(id), 400, None, false)];
        assert_eq!(estimate_progress(&c, &essays, &[]), 0);
    }

    #[test]
    fn test_zero_word_limit_completed_still_full() {
        let id = Uuid::new_v4();
        let c = college(id);
        let essays = vec![essay(Some(id), 0, Some(0), true)];
        assert_eq!(estimate_progress(&c, &essays, &[]), 100);
    }

    #[test]
    fn test_everything_complete_is_full() {
        let id = Uuid::new_v4();
        let c = college(id);
        let essays = vec![
            essay(Some(id), 650, Some(650), true),
            essay(Some(id), 200, Some(250), true),
        ];
        let tasks = vec![task(Some(id), true), task(Some(id), true)];
        assert_eq!(estimate_progress(&c, &essays, &tasks), 100);
    }

    #[test]
    fn test_weighted_mix() {
        // Essay score 1.0 * 0.4 + task score 0.5 * 0.6 = 0.7
        let id = Uuid::new_v4();
        let c = college(id);
        let essays = vec![essay(Some(id), 650, Some(650), true)];
        let tasks = vec![task(Some(id), true), task(Some(id), false)];
        assert_eq!(estimate_progress(&c, &essays, &tasks), 70);
    }

    #[test]
    fn test_half_word_count_with_tasks() {
        // Essay 0.5 * 0.8 = 0.4 contribution; tasks 1.0.
        // 0.4*0.4 + 1.0*0.6 = 0.76 -> 76
        let id = Uuid::new_v4();
        let c = college(id);
        let essays = vec![essay(Some(id), 325, Some(650), false)];
        let tasks = vec![task(Some(id), true)];
        assert_eq!(estimate_progress(&c, &essays, &tasks), 76);
    }

    #[test]
    fn test_bounds_hold_for_mixed_inputs() {
        let id = Uuid::new_v4();
        let c = college(id);
        let essays = vec![
            essay(Some(id), 0, None, false),
            essay(Some(id), 10_000, Some(1), false),
            essay(Some(id), 0, Some(-5), true),
        ];
        let tasks = vec![task(Some(id), false), task(Some(id), true)];
        let p = estimate_progress(&c, &essays, &tasks);
        assert!(p <= 100, "progress was {p}");
    }
}
