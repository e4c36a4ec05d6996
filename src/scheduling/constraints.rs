use std::collections::HashSet;

use uuid::Uuid;

use crate::database::models::Shift;
use crate::scheduling::snapshot::Candidate;
use crate::scheduling::time::{MAX_CONSECUTIVE_GAP_MINUTES, minute_of_day, shift_hours};

/// Weekly cap applied when an employee has none of their own.
pub const DEFAULT_MAX_HOURS_PER_WEEK: f64 = 48.0;

/// Running totals for one employee across the current scheduling run.
#[derive(Debug, Clone, Default)]
pub struct EmployeeLoad {
    pub assigned_shift_ids: HashSet<Uuid>,
    pub current_week_hours: f64,
}

impl EmployeeLoad {
    pub fn holds_shift(&self, shift_id: Uuid) -> bool {
        self.assigned_shift_ids.contains(&shift_id)
    }
}

/// Hard rules for a single-shift assignment: the weekly hour cap, no
/// double-booking of the same shift, and minimum rest against the other
/// shifts the employee already holds that day.
pub fn can_assign(
    candidate: &Candidate,
    shift: &Shift,
    load: &EmployeeLoad,
    held_shifts: &[&Shift],
) -> bool {
    within_weekly_cap(candidate, load, shift_hours(shift))
        && !load.holds_shift(shift.id)
        && respects_min_rest(candidate, shift, held_shifts)
}

/// Same rules for a consecutive two-shift combo, checked for both shifts
/// at once so a pair is only ever taken whole.
pub fn can_assign_pair(
    candidate: &Candidate,
    first: &Shift,
    second: &Shift,
    load: &EmployeeLoad,
    held_shifts: &[&Shift],
) -> bool {
    within_weekly_cap(candidate, load, shift_hours(first) + shift_hours(second))
        && !load.holds_shift(first.id)
        && !load.holds_shift(second.id)
        && respects_min_rest(candidate, first, held_shifts)
        && respects_min_rest(candidate, second, held_shifts)
}

fn within_weekly_cap(candidate: &Candidate, load: &EmployeeLoad, additional_hours: f64) -> bool {
    let cap = candidate
        .employee
        .max_hours_per_week
        .unwrap_or(DEFAULT_MAX_HOURS_PER_WEEK);
    load.current_week_hours + additional_hours <= cap
}

/// Minimum rest between same-day shifts. A gap inside the consecutive
/// window counts as one continuous working block and is exempt; anything
/// wider must reach the employee's declared rest hours.
fn respects_min_rest(candidate: &Candidate, shift: &Shift, held_shifts: &[&Shift]) -> bool {
    let Some(min_rest_hours) = candidate.employee.min_rest_hours_between_shifts else {
        return true;
    };
    let min_rest_minutes = (min_rest_hours * 60.0) as i64;

    for held in held_shifts {
        if held.shift_date != shift.shift_date || held.id == shift.id {
            continue;
        }
        let gap = if minute_of_day(held.start_time) >= minute_of_day(shift.end_time) {
            minute_of_day(held.start_time) - minute_of_day(shift.end_time)
        } else {
            minute_of_day(shift.start_time) - minute_of_day(held.end_time)
        };
        if (0..=MAX_CONSECUTIVE_GAP_MINUTES).contains(&gap) {
            continue;
        }
        if gap < min_rest_minutes {
            return false;
        }
    }

    true
}
