use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{AvailabilityPosition, EmployeeAvailability};

#[derive(Clone)]
pub struct AvailabilityRepository {
    pool: SqlitePool,
}

impl AvailabilityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_availability(
        &self,
        employee_id: Uuid,
        shift_id: Uuid,
    ) -> Result<EmployeeAvailability> {
        let availability = sqlx::query_as::<_, EmployeeAvailability>(
            r#"
            INSERT INTO employee_availability (id, employee_id, shift_id, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, employee_id, shift_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(employee_id)
        .bind(shift_id)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(availability)
    }

    pub async fn create_availability_position(
        &self,
        availability_id: Uuid,
        position_id: Uuid,
        preference_order: i64,
    ) -> Result<AvailabilityPosition> {
        let position = sqlx::query_as::<_, AvailabilityPosition>(
            r#"
            INSERT INTO availability_positions (id, availability_id, position_id, preference_order)
            VALUES (?, ?, ?, ?)
            RETURNING id, availability_id, position_id, preference_order
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(availability_id)
        .bind(position_id)
        .bind(preference_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(position)
    }

    pub async fn get_by_shift_ids(&self, shift_ids: &[Uuid]) -> Result<Vec<EmployeeAvailability>> {
        if shift_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = sqlx::QueryBuilder::new(
            "SELECT id, employee_id, shift_id, created_at \
             FROM employee_availability WHERE shift_id IN (",
        );
        let mut separated = query.separated(", ");
        for shift_id in shift_ids {
            separated.push_bind(shift_id);
        }
        query.push(")");

        let availability = query
            .build_query_as::<EmployeeAvailability>()
            .fetch_all(&self.pool)
            .await?;

        Ok(availability)
    }

    pub async fn get_positions_by_availability_ids(
        &self,
        availability_ids: &[Uuid],
    ) -> Result<Vec<AvailabilityPosition>> {
        if availability_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = sqlx::QueryBuilder::new(
            "SELECT id, availability_id, position_id, preference_order \
             FROM availability_positions WHERE availability_id IN (",
        );
        let mut separated = query.separated(", ");
        for availability_id in availability_ids {
            separated.push_bind(availability_id);
        }
        query.push(") ORDER BY preference_order");

        let positions = query
            .build_query_as::<AvailabilityPosition>()
            .fetch_all(&self.pool)
            .await?;

        Ok(positions)
    }
}
