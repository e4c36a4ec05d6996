use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{
    AssignmentSource, AssignmentStatus, ScheduleAssignment, ScheduleAssignmentInput,
};

#[derive(Clone)]
pub struct AssignmentRepository {
    pool: SqlitePool,
}

impl AssignmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_assignment(
        &self,
        input: ScheduleAssignmentInput,
        source: AssignmentSource,
    ) -> Result<ScheduleAssignment> {
        let now = Utc::now().naive_utc();
        let assignment = sqlx::query_as::<_, ScheduleAssignment>(
            r#"
            INSERT INTO schedule_assignments (
                id, schedule_id, shift_id, employee_id, position_id,
                status, source, notes, assigned_by, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, schedule_id, shift_id, employee_id, position_id,
                      status, source, notes, assigned_by, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.schedule_id)
        .bind(input.shift_id)
        .bind(input.employee_id)
        .bind(input.position_id)
        .bind(AssignmentStatus::Assigned)
        .bind(source)
        .bind(&input.notes)
        .bind(input.assigned_by)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(assignment)
    }

    /// Bulk insert of auto-sourced assignments inside one transaction, so a
    /// failure part-way through leaves no stray records behind.
    pub async fn create_auto_assignments(
        &self,
        inputs: &[ScheduleAssignmentInput],
    ) -> Result<Vec<ScheduleAssignment>> {
        let now = Utc::now().naive_utc();
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());

        for input in inputs {
            let assignment = sqlx::query_as::<_, ScheduleAssignment>(
                r#"
                INSERT INTO schedule_assignments (
                    id, schedule_id, shift_id, employee_id, position_id,
                    status, source, notes, assigned_by, created_at, updated_at
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING id, schedule_id, shift_id, employee_id, position_id,
                          status, source, notes, assigned_by, created_at, updated_at
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(input.schedule_id)
            .bind(input.shift_id)
            .bind(input.employee_id)
            .bind(input.position_id)
            .bind(AssignmentStatus::Assigned)
            .bind(AssignmentSource::Auto)
            .bind(&input.notes)
            .bind(input.assigned_by)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

            created.push(assignment);
        }

        tx.commit().await?;

        Ok(created)
    }

    pub async fn get_active_by_schedule(
        &self,
        schedule_id: Uuid,
    ) -> Result<Vec<ScheduleAssignment>> {
        let assignments = sqlx::query_as::<_, ScheduleAssignment>(
            r#"
            SELECT id, schedule_id, shift_id, employee_id, position_id,
                   status, source, notes, assigned_by, created_at, updated_at
            FROM schedule_assignments
            WHERE schedule_id = ? AND status != 'cancelled'
            ORDER BY created_at
            "#,
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    pub async fn delete_auto_assignments(&self, schedule_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM schedule_assignments WHERE schedule_id = ? AND source = 'auto'",
        )
        .bind(schedule_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
