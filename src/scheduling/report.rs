use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use uuid::Uuid;

use crate::scheduling::engine::AssignmentDraft;
use crate::scheduling::snapshot::SchedulingSnapshot;

/// A (shift, position) slot the run could not fully staff.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageWarning {
    pub shift_id: Uuid,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub position_id: Uuid,
    pub position_name: String,
    pub required: i64,
    pub assigned: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub warnings: Vec<CoverageWarning>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    pub total_assignments: usize,
    pub distinct_employees: usize,
    pub avg_shifts_per_employee: f64,
    pub min_shifts_per_employee: usize,
    pub max_shifts_per_employee: usize,
    pub total_required_slots: i64,
    pub coverage_rate: f64,
}

/// Post-hoc coverage check. Partial coverage is reported, never an error;
/// each open slot is also logged as a warning.
pub fn validate(snapshot: &SchedulingSnapshot, drafts: &[AssignmentDraft]) -> ValidationReport {
    let mut drafted: HashMap<(Uuid, Uuid), i64> = HashMap::new();
    for draft in drafts {
        *drafted.entry((draft.shift_id, draft.position_id)).or_insert(0) += 1;
    }

    let mut warnings = Vec::new();
    for snapshot_shift in &snapshot.shifts {
        for requirement in &snapshot_shift.requirements {
            let existing = snapshot_shift
                .existing_assignments
                .iter()
                .filter(|a| a.position_id == requirement.position_id)
                .count() as i64;
            let assigned = existing
                + drafted
                    .get(&(requirement.shift_id, requirement.position_id))
                    .copied()
                    .unwrap_or(0);
            if assigned < requirement.required_count {
                let position_name = snapshot
                    .positions
                    .get(&requirement.position_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| requirement.position_id.to_string());
                log::warn!(
                    "Unfilled slot: {} {}-{} needs {} x {}, has {}",
                    snapshot_shift.shift.shift_date,
                    snapshot_shift.shift.start_time.format("%H:%M"),
                    snapshot_shift.shift.end_time.format("%H:%M"),
                    requirement.required_count,
                    position_name,
                    assigned
                );
                warnings.push(CoverageWarning {
                    shift_id: snapshot_shift.shift.id,
                    shift_date: snapshot_shift.shift.shift_date,
                    start_time: snapshot_shift.shift.start_time,
                    end_time: snapshot_shift.shift.end_time,
                    position_id: requirement.position_id,
                    position_name,
                    required: requirement.required_count,
                    assigned,
                });
            }
        }
    }

    ValidationReport {
        valid: warnings.is_empty(),
        warnings,
        errors: Vec::new(),
    }
}

/// Aggregates over the run's own output: created assignments against the
/// schedule's total required capacity, and how the work spread across
/// employees.
pub fn compute_stats(snapshot: &SchedulingSnapshot, drafts: &[AssignmentDraft]) -> ScheduleStats {
    let mut shifts_per_employee: HashMap<Uuid, usize> = HashMap::new();
    for draft in drafts {
        *shifts_per_employee.entry(draft.employee_id).or_insert(0) += 1;
    }

    let distinct_employees = shifts_per_employee.len();
    let counts: Vec<usize> = shifts_per_employee.values().copied().collect();
    let avg_shifts_per_employee = if distinct_employees > 0 {
        drafts.len() as f64 / distinct_employees as f64
    } else {
        0.0
    };

    let total_required_slots = snapshot.total_required_slots();
    let coverage_rate = if total_required_slots > 0 {
        drafts.len() as f64 / total_required_slots as f64
    } else {
        0.0
    };

    ScheduleStats {
        total_assignments: drafts.len(),
        distinct_employees,
        avg_shifts_per_employee,
        min_shifts_per_employee: counts.iter().copied().min().unwrap_or(0),
        max_shifts_per_employee: counts.iter().copied().max().unwrap_or(0),
        total_required_slots,
        coverage_rate,
    }
}

/// Sanity check over one run's output: no (employee, shift) pair may
/// appear twice.
pub fn distinct_employee_shift_pairs(drafts: &[AssignmentDraft]) -> bool {
    let mut seen = HashSet::new();
    drafts
        .iter()
        .all(|d| seen.insert((d.employee_id, d.shift_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::ContractType;
    use crate::scheduling::testing::{
        candidate, position, schedule, shift, snapshot_shift, test_snapshot,
    };
    use pretty_assertions::assert_eq;

    fn draft(shift_id: Uuid, employee_id: Uuid, position_id: Uuid) -> AssignmentDraft {
        AssignmentDraft {
            shift_id,
            employee_id,
            position_id,
            score: 100.0,
        }
    }

    #[test]
    fn unfilled_slots_become_warnings() {
        let sched = schedule("2025-12-01");
        let s1 = shift(sched.id, "2025-12-01", "08:00", "16:00");
        let server = position("Server", false);
        let ada = candidate("Ada", ContractType::FullTime, &[(s1.id, server.id, 1)]);
        let snapshot = test_snapshot(
            sched,
            vec![snapshot_shift(s1.clone(), &[(server.id, 2)])],
            vec![ada.clone()],
            vec![server.clone()],
        );

        let drafts = vec![draft(s1.id, ada.employee.id, server.id)];
        let report = validate(&snapshot, &drafts);

        assert!(!report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].required, 2);
        assert_eq!(report.warnings[0].assigned, 1);
        assert_eq!(report.warnings[0].position_name, "Server");
        assert!(report.errors.is_empty());
    }

    #[test]
    fn full_coverage_validates_clean() {
        let sched = schedule("2025-12-01");
        let s1 = shift(sched.id, "2025-12-01", "08:00", "16:00");
        let server = position("Server", false);
        let ada = candidate("Ada", ContractType::FullTime, &[(s1.id, server.id, 1)]);
        let snapshot = test_snapshot(
            sched,
            vec![snapshot_shift(s1.clone(), &[(server.id, 1)])],
            vec![ada.clone()],
            vec![server.clone()],
        );

        let drafts = vec![draft(s1.id, ada.employee.id, server.id)];
        let report = validate(&snapshot, &drafts);

        assert!(report.valid);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn stats_summarize_distribution_and_coverage() {
        let sched = schedule("2025-12-01");
        let s1 = shift(sched.id, "2025-12-01", "08:00", "16:00");
        let s2 = shift(sched.id, "2025-12-02", "08:00", "16:00");
        let s3 = shift(sched.id, "2025-12-03", "08:00", "16:00");
        let server = position("Server", false);
        let ada = candidate("Ada", ContractType::FullTime, &[]);
        let ben = candidate("Ben", ContractType::PartTime, &[]);
        let snapshot = test_snapshot(
            sched.clone(),
            vec![
                snapshot_shift(s1.clone(), &[(server.id, 1)]),
                snapshot_shift(s2.clone(), &[(server.id, 1)]),
                snapshot_shift(s3.clone(), &[(server.id, 2)]),
            ],
            vec![ada.clone(), ben.clone()],
            vec![server.clone()],
        );

        let drafts = vec![
            draft(s1.id, ada.employee.id, server.id),
            draft(s2.id, ada.employee.id, server.id),
            draft(s3.id, ben.employee.id, server.id),
        ];
        let stats = compute_stats(&snapshot, &drafts);

        assert_eq!(stats.total_assignments, 3);
        assert_eq!(stats.distinct_employees, 2);
        assert_eq!(stats.avg_shifts_per_employee, 1.5);
        assert_eq!(stats.min_shifts_per_employee, 1);
        assert_eq!(stats.max_shifts_per_employee, 2);
        assert_eq!(stats.total_required_slots, 4);
        assert_eq!(stats.coverage_rate, 0.75);
    }

    #[test]
    fn empty_run_yields_zeroed_stats() {
        let sched = schedule("2025-12-01");
        let s1 = shift(sched.id, "2025-12-01", "08:00", "16:00");
        let server = position("Server", false);
        let ada = candidate("Ada", ContractType::FullTime, &[]);
        let snapshot = test_snapshot(
            sched,
            vec![snapshot_shift(s1, &[(server.id, 1)])],
            vec![ada],
            vec![server],
        );

        let stats = compute_stats(&snapshot, &[]);

        assert_eq!(stats.total_assignments, 0);
        assert_eq!(stats.distinct_employees, 0);
        assert_eq!(stats.avg_shifts_per_employee, 0.0);
        assert_eq!(stats.coverage_rate, 0.0);
    }

    #[test]
    fn duplicate_employee_shift_pairs_are_detected() {
        let shift_id = Uuid::new_v4();
        let employee_id = Uuid::new_v4();
        let drafts = vec![
            draft(shift_id, employee_id, Uuid::new_v4()),
            draft(shift_id, employee_id, Uuid::new_v4()),
        ];
        assert!(!distinct_employee_shift_pairs(&drafts));
        assert!(distinct_employee_shift_pairs(&drafts[..1]));
    }
}
