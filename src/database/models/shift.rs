use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bounded time interval on a specific date requiring staffing.
/// `end_time < start_time` means the shift crosses midnight.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// How many employees a shift needs in one position.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPositionRequirement {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub position_id: Uuid,
    pub required_count: i64,
}
