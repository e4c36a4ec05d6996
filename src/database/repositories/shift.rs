use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Shift, ShiftPositionRequirement};

#[derive(Clone)]
pub struct ShiftRepository {
    pool: SqlitePool,
}

impl ShiftRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_shift(
        &self,
        schedule_id: Uuid,
        shift_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Shift> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            INSERT INTO shifts (id, schedule_id, shift_date, start_time, end_time, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, schedule_id, shift_date, start_time, end_time, notes, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(schedule_id)
        .bind(shift_date)
        .bind(start_time)
        .bind(end_time)
        .bind(None::<String>)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(shift)
    }

    pub async fn get_shifts_by_schedule(&self, schedule_id: Uuid) -> Result<Vec<Shift>> {
        let shifts = sqlx::query_as::<_, Shift>(
            r#"
            SELECT id, schedule_id, shift_date, start_time, end_time, notes, created_at
            FROM shifts WHERE schedule_id = ?
            ORDER BY shift_date, start_time
            "#,
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(shifts)
    }

    pub async fn create_requirement(
        &self,
        shift_id: Uuid,
        position_id: Uuid,
        required_count: i64,
    ) -> Result<ShiftPositionRequirement> {
        let requirement = sqlx::query_as::<_, ShiftPositionRequirement>(
            r#"
            INSERT INTO shift_position_requirements (id, shift_id, position_id, required_count)
            VALUES (?, ?, ?, ?)
            RETURNING id, shift_id, position_id, required_count
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shift_id)
        .bind(position_id)
        .bind(required_count)
        .fetch_one(&self.pool)
        .await?;

        Ok(requirement)
    }

    pub async fn get_requirements_by_shift_ids(
        &self,
        shift_ids: &[Uuid],
    ) -> Result<Vec<ShiftPositionRequirement>> {
        if shift_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = sqlx::QueryBuilder::new(
            "SELECT id, shift_id, position_id, required_count \
             FROM shift_position_requirements WHERE shift_id IN (",
        );
        let mut separated = query.separated(", ");
        for shift_id in shift_ids {
            separated.push_bind(shift_id);
        }
        query.push(")");

        let requirements = query
            .build_query_as::<ShiftPositionRequirement>()
            .fetch_all(&self.pool)
            .await?;

        Ok(requirements)
    }
}
