//! Anchor-relative schedule synchronization.
//!
//! Derives the canonical set of planning tasks for a user's whole portfolio
//! from college deadlines and reconciles it against the task store:
//! create what is missing, reschedule what exists but is incomplete, never
//! touch completed rows. Safe to re-run at any time; a run against unchanged
//! data stages nothing.
//!
//! Lifecycle of a generated task:
//! absent -> scheduled -> rescheduled (any number of times) -> completed
//! (terminal; the due date is frozen from then on).

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate, Utc};
use futures::future::try_join_all;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::college::CollegeRow;
use crate::models::essay::EssayRow;
use crate::models::task::{TaskCategory, TaskPriority};
use crate::schedule::templates::{
    essay_draft_title, essay_polish_title, lor_assign_title, ESSAY_DRAFT_OFFSET_DAYS,
    ESSAY_POLISH_OFFSET_DAYS, GLOBAL_TEMPLATES, LOR_ASSIGN_OFFSET_DAYS,
};
use crate::store::{ApplicationStore, NewTask};

/// Outcome of one synchronizer run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
}

impl SyncReport {
    pub fn count(&self) -> usize {
        self.created + self.updated
    }
}

/// One task the current run wants to exist, before reconciliation.
#[derive(Debug, Clone)]
struct PlannedTask {
    college_id: Option<Uuid>,
    title: String,
    description: String,
    due_date: NaiveDate,
    category: TaskCategory,
    priority: TaskPriority,
}

/// Entry point: reconciles the user's planning tasks against current
/// deadlines. `today` is fixed once here so every past-date check inside the
/// run agrees.
pub async fn synchronize_schedule(
    store: &dyn ApplicationStore,
    user_id: Uuid,
) -> Result<SyncReport, AppError> {
    run(store, user_id, Utc::now().date_naive()).await
}

pub(crate) async fn run(
    store: &dyn ApplicationStore,
    user_id: Uuid,
    today: NaiveDate,
) -> Result<SyncReport, AppError> {
    let (colleges, essays, tasks) = tokio::try_join!(
        store.list_colleges(user_id),
        store.list_essays(user_id),
        store.list_tasks(user_id),
    )?;

    let plan = build_plan(&colleges, &essays, today);

    // Existing tasks keyed by the dedup key. If duplicates slipped in from a
    // concurrent run, the first row wins and the rest are left alone.
    let mut existing: HashMap<(String, Option<Uuid>), (Uuid, Option<NaiveDate>, bool)> =
        HashMap::new();
    for t in &tasks {
        existing
            .entry((t.title.clone(), t.college_id))
            .or_insert((t.id, t.due_date, t.completed));
    }

    let mut inserts: Vec<NewTask> = Vec::new();
    let mut staged: HashSet<(String, Option<Uuid>)> = HashSet::new();
    let mut updates: Vec<(Uuid, NaiveDate)> = Vec::new();

    for planned in plan {
        let key = (planned.title.clone(), planned.college_id);
        let found = existing.get(&key).copied();
        match found {
            // Completed rows are frozen.
            Some((_, _, true)) => {}
            // Already scheduled on the right date.
            Some((_, due, _)) if due == Some(planned.due_date) => {}
            Some((id, _, _)) => updates.push((id, planned.due_date)),
            None => {
                // The same (title, college_id) pair can be planned twice in
                // one run (e.g. two essays sharing a title); stage it once.
                if staged.insert(key) {
                    inserts.push(NewTask {
                        user_id,
                        college_id: planned.college_id,
                        title: planned.title,
                        description: Some(planned.description),
                        due_date: planned.due_date,
                        category: planned.category,
                        priority: planned.priority,
                    });
                }
            }
        }
    }

    let created = inserts.len();
    let updated = updates.len();

    // One batch insert, then the per-row due date writes issued concurrently.
    // Best-effort: the first failure aborts the run without rolling back
    // writes that already landed.
    store.insert_tasks(&inserts).await?;
    try_join_all(
        updates
            .into_iter()
            .map(|(id, due)| store.update_task_due_date(id, due)),
    )
    .await?;

    info!("Schedule sync for user {user_id}: {created} created, {updated} rescheduled");
    Ok(SyncReport { created, updated })
}

/// Computes the full set of tasks that should exist for this portfolio.
/// Pure over the fetched snapshot.
fn build_plan(colleges: &[CollegeRow], essays: &[EssayRow], today: NaiveDate) -> Vec<PlannedTask> {
    // Anchor: earliest deadline across the portfolio, falling back to today
    // when no college has one yet.
    let base_date = colleges
        .iter()
        .filter_map(|c| c.deadline)
        .min()
        .unwrap_or(today);

    let any_tests_required = colleges.iter().any(|c| c.test_policy == "Required");

    let mut plan = Vec::new();

    for template in GLOBAL_TEMPLATES {
        if template.needs_required_tests && !any_tests_required {
            continue;
        }
        let ideal = base_date - Duration::days(template.offset_days);
        // Global tasks are never scheduled in the past.
        let due = if ideal < today {
            today + Duration::days(template.fallback_days)
        } else {
            ideal
        };
        plan.push(PlannedTask {
            college_id: None,
            title: template.title.to_string(),
            description: template.description.to_string(),
            due_date: due,
            category: template.category,
            priority: template.priority,
        });
    }

    // Per-college recommender assignment, anchored to that college's own
    // deadline. Intentionally unclamped: a near deadline may put this in the
    // past, which the UI surfaces as overdue.
    for college in colleges {
        if college.lors_required <= 0 {
            continue;
        }
        let Some(deadline) = college.deadline else {
            continue;
        };
        plan.push(PlannedTask {
            college_id: Some(college.id),
            title: lor_assign_title(&college.name),
            description: format!(
                "Choose {} recommenders and send requests for {}",
                college.lors_required, college.name
            ),
            due_date: deadline - Duration::days(LOR_ASSIGN_OFFSET_DAYS),
            category: TaskCategory::Lor,
            priority: TaskPriority::High,
        });
    }

    // Per-essay draft and polish passes, anchored to the essay's college
    // deadline. Essays without one (global essays, or colleges with no
    // deadline set) generate nothing.
    for essay in essays {
        let Some(deadline) = essay.college_deadline else {
            continue;
        };
        plan.push(PlannedTask {
            college_id: essay.college_id,
            title: essay_draft_title(&essay.title),
            description: "Write a complete first draft".to_string(),
            due_date: deadline - Duration::days(ESSAY_DRAFT_OFFSET_DAYS),
            category: TaskCategory::Essay,
            priority: TaskPriority::Medium,
        });
        plan.push(PlannedTask {
            college_id: essay.college_id,
            title: essay_polish_title(&essay.title),
            description: "Final read-through, trim to the word limit, finalize".to_string(),
            due_date: deadline - Duration::days(ESSAY_POLISH_OFFSET_DAYS),
            category: TaskCategory::Essay,
            priority: TaskPriority::High,
        });
    }

    plan
}
