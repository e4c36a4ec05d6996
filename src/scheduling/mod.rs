pub mod constraints;
pub mod engine;
pub mod report;
pub mod scoring;
pub mod snapshot;
pub mod time;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::{
    AssignmentSource, AssignmentStatus, ScheduleAssignment, ScheduleAssignmentInput,
};
use crate::database::repositories::AssignmentRepository;
use crate::error::AppError;

pub use engine::{AssignmentDraft, ScheduleEngine};
pub use report::{CoverageWarning, ScheduleStats, ValidationReport};
pub use snapshot::{SchedulingSnapshot, SnapshotLoader};

#[derive(Debug, Clone, Copy, Default)]
pub struct AutoScheduleOptions {
    /// Drop prior auto-sourced assignments for the schedule before running.
    pub overwrite_existing: bool,
    /// Compute everything, persist nothing.
    pub dry_run: bool,
    pub assigned_by: Option<Uuid>,
    /// Fixed tiebreaker seed; `None` seeds from the OS per run.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoScheduleOutcome {
    pub assignments_created: usize,
    pub assignments: Vec<ScheduleAssignment>,
    pub validation: ValidationReport,
    pub stats: ScheduleStats,
}

/// Top-level orchestration: snapshot in, engine run, validation, and the
/// transactional write phase. Concurrent runs against the same schedule are
/// the caller's problem to serialize; a dry run never writes and is safe to
/// overlap with anything.
#[derive(Clone)]
pub struct AutoScheduler {
    loader: SnapshotLoader,
    assignment_repository: AssignmentRepository,
}

impl AutoScheduler {
    pub fn new(loader: SnapshotLoader, assignment_repository: AssignmentRepository) -> Self {
        Self {
            loader,
            assignment_repository,
        }
    }

    pub async fn auto_schedule(
        &self,
        schedule_id: Uuid,
        options: AutoScheduleOptions,
    ) -> Result<AutoScheduleOutcome, AppError> {
        if options.overwrite_existing && !options.dry_run {
            // Validate the target before destroying anything
            self.loader.ensure_schedulable(schedule_id).await?;
            let removed = self
                .assignment_repository
                .delete_auto_assignments(schedule_id)
                .await?;
            if removed > 0 {
                log::info!(
                    "Removed {} prior auto assignments for schedule {}",
                    removed,
                    schedule_id
                );
            }
        }

        let mut snapshot = self.loader.load(schedule_id).await?;
        if options.overwrite_existing && options.dry_run {
            snapshot = snapshot.without_auto_assignments();
        }

        let drafts = match options.seed {
            Some(seed) => ScheduleEngine::with_seed(seed).run(&snapshot),
            None => ScheduleEngine::new().run(&snapshot),
        };

        debug_assert!(report::distinct_employee_shift_pairs(&drafts));

        let validation = report::validate(&snapshot, &drafts);
        let stats = report::compute_stats(&snapshot, &drafts);

        let inputs: Vec<ScheduleAssignmentInput> = drafts
            .iter()
            .map(|draft| ScheduleAssignmentInput {
                schedule_id,
                shift_id: draft.shift_id,
                employee_id: draft.employee_id,
                position_id: draft.position_id,
                notes: Some(format!("auto-assigned (score: {:.2})", draft.score)),
                assigned_by: options.assigned_by,
            })
            .collect();

        let assignments = if options.dry_run {
            inputs.into_iter().map(unsaved_assignment).collect()
        } else {
            self.assignment_repository
                .create_auto_assignments(&inputs)
                .await?
        };

        Ok(AutoScheduleOutcome {
            assignments_created: if options.dry_run { 0 } else { assignments.len() },
            assignments,
            validation,
            stats,
        })
    }
}

/// Shapes a draft like a stored record for dry-run responses.
fn unsaved_assignment(input: ScheduleAssignmentInput) -> ScheduleAssignment {
    let now = Utc::now().naive_utc();
    ScheduleAssignment {
        id: Uuid::new_v4(),
        schedule_id: input.schedule_id,
        shift_id: input.shift_id,
        employee_id: input.employee_id,
        position_id: input.position_id,
        status: AssignmentStatus::Assigned,
        source: AssignmentSource::Auto,
        notes: input.notes,
        assigned_by: input.assigned_by,
        created_at: now,
        updated_at: now,
    }
}
