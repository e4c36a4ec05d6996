use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

use rosterd::database::init_database;
use rosterd::database::models::{
    ContractType, Employee, Position, Shift, WeeklySchedule,
};
use rosterd::database::repositories::{
    AssignmentRepository, AvailabilityRepository, EmployeeInput, EmployeeRepository,
    PositionRepository, ScheduleRepository, ShiftRepository,
};
use rosterd::{AutoScheduler, SnapshotLoader};

// Test database wrapper
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        Ok(TestDb {
            pool,
            _temp_dir: temp_dir,
        })
    }
}

// Everything an auto-scheduling test needs: one throwaway database with
// repositories and the scheduler wired up against it.
pub struct TestApp {
    pub db: TestDb,
    pub schedules: ScheduleRepository,
    pub shifts: ShiftRepository,
    pub employees: EmployeeRepository,
    pub availability: AvailabilityRepository,
    pub positions: PositionRepository,
    pub assignments: AssignmentRepository,
    pub scheduler: AutoScheduler,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let db = TestDb::new().await?;
        let pool = db.pool.clone();

        let schedules = ScheduleRepository::new(pool.clone());
        let shifts = ShiftRepository::new(pool.clone());
        let employees = EmployeeRepository::new(pool.clone());
        let availability = AvailabilityRepository::new(pool.clone());
        let positions = PositionRepository::new(pool.clone());
        let assignments = AssignmentRepository::new(pool.clone());

        let loader = SnapshotLoader::new(
            schedules.clone(),
            shifts.clone(),
            employees.clone(),
            availability.clone(),
            positions.clone(),
            assignments.clone(),
        );
        let scheduler = AutoScheduler::new(loader, assignments.clone());

        Ok(TestApp {
            db,
            schedules,
            shifts,
            employees,
            availability,
            positions,
            assignments,
            scheduler,
        })
    }

    pub async fn seed_schedule(&self, week_start: &str) -> WeeklySchedule {
        let week_start = week_start.parse::<NaiveDate>().expect("valid date");
        self.schedules
            .create_schedule("Test week", week_start)
            .await
            .expect("create schedule")
    }

    pub async fn seed_shift(
        &self,
        schedule_id: Uuid,
        date: &str,
        start: &str,
        end: &str,
    ) -> Shift {
        let date = date.parse::<NaiveDate>().expect("valid date");
        let start = parse_time(start);
        let end = parse_time(end);
        self.shifts
            .create_shift(schedule_id, date, start, end)
            .await
            .expect("create shift")
    }

    pub async fn seed_position(&self, name: &str, is_priority: bool) -> Position {
        self.positions
            .create_position(name, is_priority)
            .await
            .expect("create position")
    }

    pub async fn seed_employee(
        &self,
        name: &str,
        contract_type: ContractType,
        max_hours_per_week: Option<f64>,
    ) -> Employee {
        let employee = self
            .employees
            .create_employee(EmployeeInput {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                max_hours_per_week,
                ..Default::default()
            })
            .await
            .expect("create employee");
        self.employees
            .create_contract(employee.id, contract_type)
            .await
            .expect("create contract");
        employee
    }

    /// Declares availability of one employee for one shift, willing to
    /// fill the given positions in preference order.
    pub async fn seed_availability(&self, employee_id: Uuid, shift_id: Uuid, positions: &[Uuid]) {
        let row = self
            .availability
            .create_availability(employee_id, shift_id)
            .await
            .expect("create availability");
        for (index, position_id) in positions.iter().enumerate() {
            self.availability
                .create_availability_position(row.id, *position_id, index as i64 + 1)
                .await
                .expect("create availability position");
        }
    }
}

pub fn parse_time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid HH:MM time")
}
