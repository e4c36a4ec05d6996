use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::Position;

#[derive(Clone)]
pub struct PositionRepository {
    pool: SqlitePool,
}

impl PositionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_position(&self, name: &str, is_priority: bool) -> Result<Position> {
        let position = sqlx::query_as::<_, Position>(
            r#"
            INSERT INTO positions (id, name, is_priority, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, is_priority, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(is_priority)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(position)
    }

    pub async fn get_all_positions(&self) -> Result<Vec<Position>> {
        let positions = sqlx::query_as::<_, Position>(
            r#"
            SELECT id, name, is_priority, created_at
            FROM positions ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(positions)
    }
}
