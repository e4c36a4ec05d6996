use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{ScheduleStatus, WeeklySchedule};

#[derive(Clone)]
pub struct ScheduleRepository {
    pool: SqlitePool,
}

impl ScheduleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_schedule(
        &self,
        name: &str,
        week_start_date: NaiveDate,
    ) -> Result<WeeklySchedule> {
        let now = Utc::now().naive_utc();
        let schedule = sqlx::query_as::<_, WeeklySchedule>(
            r#"
            INSERT INTO weekly_schedules (id, name, week_start_date, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, name, week_start_date, status, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(week_start_date)
        .bind(ScheduleStatus::Draft)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(schedule)
    }

    pub async fn get_schedule(&self, id: Uuid) -> Result<Option<WeeklySchedule>> {
        let schedule = sqlx::query_as::<_, WeeklySchedule>(
            r#"
            SELECT id, name, week_start_date, status, created_at, updated_at
            FROM weekly_schedules WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: ScheduleStatus,
    ) -> Result<Option<WeeklySchedule>> {
        let now = Utc::now().naive_utc();
        let schedule = sqlx::query_as::<_, WeeklySchedule>(
            r#"
            UPDATE weekly_schedules SET status = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, week_start_date, status, created_at, updated_at
            "#,
        )
        .bind(status)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule)
    }
}
