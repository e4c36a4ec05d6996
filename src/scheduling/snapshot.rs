use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::database::models::{
    AssignmentSource, AvailabilityPosition, ContractType, Employee, EmployeeAvailability, Position,
    ScheduleAssignment, ScheduleStatus, Shift, ShiftPositionRequirement, WeeklySchedule,
};
use crate::database::repositories::{
    AssignmentRepository, AvailabilityRepository, EmployeeRepository, PositionRepository,
    ScheduleRepository, ShiftRepository,
};
use crate::error::AppError;

/// A position an employee is willing to fill in one shift, with their
/// stated preference rank (1 = most preferred).
#[derive(Debug, Clone)]
pub struct PositionPreference {
    pub position_id: Uuid,
    pub preference_order: i64,
}

/// One shift with everything the engine needs to know about it.
#[derive(Debug, Clone)]
pub struct SnapshotShift {
    pub shift: Shift,
    pub requirements: Vec<ShiftPositionRequirement>,
    pub existing_assignments: Vec<ScheduleAssignment>,
}

/// An eligible employee: active, with at least one availability row for
/// the target week.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub employee: Employee,
    pub contract_type: ContractType,
    pub previous_month_hours: f64,
    /// shift id -> positions the employee is willing to fill in it
    pub availability: HashMap<Uuid, Vec<PositionPreference>>,
}

impl Candidate {
    pub fn is_available_for(&self, shift_id: Uuid, position_id: Uuid) -> bool {
        self.preference_order(shift_id, position_id).is_some()
    }

    pub fn preference_order(&self, shift_id: Uuid, position_id: Uuid) -> Option<i64> {
        self.availability.get(&shift_id).and_then(|positions| {
            positions
                .iter()
                .find(|p| p.position_id == position_id)
                .map(|p| p.preference_order)
        })
    }
}

/// Immutable per-run view of one schedule's scheduling inputs. Built
/// fresh for every run and discarded afterwards.
#[derive(Debug, Clone)]
pub struct SchedulingSnapshot {
    pub schedule: WeeklySchedule,
    /// Sorted by (date, start time).
    pub shifts: Vec<SnapshotShift>,
    pub candidates: Vec<Candidate>,
    pub positions: HashMap<Uuid, Position>,
}

impl SchedulingSnapshot {
    pub fn shift_by_id(&self, shift_id: Uuid) -> Option<&Shift> {
        self.shifts
            .iter()
            .find(|s| s.shift.id == shift_id)
            .map(|s| &s.shift)
    }

    pub fn total_required_slots(&self) -> i64 {
        self.shifts
            .iter()
            .flat_map(|s| &s.requirements)
            .map(|r| r.required_count)
            .sum()
    }

    /// Previews an overwrite run without touching the database: prior
    /// auto-sourced assignments are simply dropped from the view.
    pub fn without_auto_assignments(mut self) -> Self {
        for snapshot_shift in &mut self.shifts {
            snapshot_shift
                .existing_assignments
                .retain(|a| a.source != AssignmentSource::Auto);
        }
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        schedule: WeeklySchedule,
        mut shifts: Vec<Shift>,
        requirements: Vec<ShiftPositionRequirement>,
        assignments: Vec<ScheduleAssignment>,
        employees: Vec<Employee>,
        contracts: HashMap<Uuid, ContractType>,
        availability: Vec<EmployeeAvailability>,
        availability_positions: Vec<AvailabilityPosition>,
        worked_hours: HashMap<Uuid, f64>,
        positions: Vec<Position>,
    ) -> Self {
        shifts.sort_by_key(|s| (s.shift_date, s.start_time));

        let mut requirements_by_shift: HashMap<Uuid, Vec<ShiftPositionRequirement>> =
            HashMap::new();
        for requirement in requirements {
            requirements_by_shift
                .entry(requirement.shift_id)
                .or_default()
                .push(requirement);
        }

        let mut assignments_by_shift: HashMap<Uuid, Vec<ScheduleAssignment>> = HashMap::new();
        for assignment in assignments {
            assignments_by_shift
                .entry(assignment.shift_id)
                .or_default()
                .push(assignment);
        }

        let mut positions_by_availability: HashMap<Uuid, Vec<PositionPreference>> = HashMap::new();
        for row in availability_positions {
            positions_by_availability
                .entry(row.availability_id)
                .or_default()
                .push(PositionPreference {
                    position_id: row.position_id,
                    preference_order: row.preference_order,
                });
        }

        let mut availability_by_employee: HashMap<Uuid, HashMap<Uuid, Vec<PositionPreference>>> =
            HashMap::new();
        for row in availability {
            let preferences = positions_by_availability.remove(&row.id).unwrap_or_default();
            availability_by_employee
                .entry(row.employee_id)
                .or_default()
                .insert(row.shift_id, preferences);
        }

        // Employees with no availability for this week drop out of the pool
        let candidates = employees
            .into_iter()
            .filter_map(|employee| {
                let availability = availability_by_employee.remove(&employee.id)?;
                let contract_type = contracts.get(&employee.id).copied().unwrap_or_default();
                let previous_month_hours = worked_hours.get(&employee.id).copied().unwrap_or(0.0);
                Some(Candidate {
                    contract_type,
                    previous_month_hours,
                    availability,
                    employee,
                })
            })
            .collect();

        let shifts = shifts
            .into_iter()
            .map(|shift| SnapshotShift {
                requirements: requirements_by_shift.remove(&shift.id).unwrap_or_default(),
                existing_assignments: assignments_by_shift.remove(&shift.id).unwrap_or_default(),
                shift,
            })
            .collect();

        Self {
            schedule,
            shifts,
            candidates,
            positions: positions.into_iter().map(|p| (p.id, p)).collect(),
        }
    }
}

/// Payroll month (`YYYY-MM`) preceding the month the week starts in.
pub fn previous_period_month(week_start: NaiveDate) -> String {
    let (year, month) = if week_start.month() == 1 {
        (week_start.year() - 1, 12)
    } else {
        (week_start.year(), week_start.month() - 1)
    };
    format!("{:04}-{:02}", year, month)
}

/// Pulls everything one scheduling run needs into a [`SchedulingSnapshot`].
#[derive(Clone)]
pub struct SnapshotLoader {
    schedule_repository: ScheduleRepository,
    shift_repository: ShiftRepository,
    employee_repository: EmployeeRepository,
    availability_repository: AvailabilityRepository,
    position_repository: PositionRepository,
    assignment_repository: AssignmentRepository,
}

impl SnapshotLoader {
    pub fn new(
        schedule_repository: ScheduleRepository,
        shift_repository: ShiftRepository,
        employee_repository: EmployeeRepository,
        availability_repository: AvailabilityRepository,
        position_repository: PositionRepository,
        assignment_repository: AssignmentRepository,
    ) -> Self {
        Self {
            schedule_repository,
            shift_repository,
            employee_repository,
            availability_repository,
            position_repository,
            assignment_repository,
        }
    }

    /// The schedule must exist and still be editable.
    pub async fn ensure_schedulable(&self, schedule_id: Uuid) -> Result<WeeklySchedule, AppError> {
        let schedule = self
            .schedule_repository
            .get_schedule(schedule_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule not found: {}", schedule_id)))?;

        if schedule.status == ScheduleStatus::Finalized {
            return Err(AppError::InvalidState(format!(
                "Schedule {} is finalized and can no longer be auto-scheduled",
                schedule_id
            )));
        }

        Ok(schedule)
    }

    pub async fn load(&self, schedule_id: Uuid) -> Result<SchedulingSnapshot, AppError> {
        let schedule = self.ensure_schedulable(schedule_id).await?;

        let shifts = self.shift_repository.get_shifts_by_schedule(schedule_id).await?;
        if shifts.is_empty() {
            return Err(AppError::EmptyInput(format!(
                "Schedule {} has no shifts to assign",
                schedule_id
            )));
        }
        let shift_ids: Vec<Uuid> = shifts.iter().map(|s| s.id).collect();

        let requirements = self
            .shift_repository
            .get_requirements_by_shift_ids(&shift_ids)
            .await?;
        let assignments = self
            .assignment_repository
            .get_active_by_schedule(schedule_id)
            .await?;

        let employees = self.employee_repository.get_active_employees().await?;
        let contracts = self.employee_repository.get_active_contracts().await?;

        let availability = self.availability_repository.get_by_shift_ids(&shift_ids).await?;
        let availability_ids: Vec<Uuid> = availability.iter().map(|a| a.id).collect();
        let availability_positions = self
            .availability_repository
            .get_positions_by_availability_ids(&availability_ids)
            .await?;

        let prior_month = previous_period_month(schedule.week_start_date);
        let worked_hours = self
            .employee_repository
            .get_worked_hours_for_month(&prior_month)
            .await?;

        let positions = self.position_repository.get_all_positions().await?;

        let snapshot = SchedulingSnapshot::assemble(
            schedule,
            shifts,
            requirements,
            assignments,
            employees,
            contracts,
            availability,
            availability_positions,
            worked_hours,
            positions,
        );

        if snapshot.candidates.is_empty() {
            return Err(AppError::EmptyInput(format!(
                "No active employees declared availability for schedule {}",
                schedule_id
            )));
        }

        Ok(snapshot)
    }
}
