use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySchedule {
    pub id: Uuid,
    pub name: String,
    pub week_start_date: NaiveDate,
    pub status: ScheduleStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Lifecycle: draft -> scheduled -> finalized | cancelled.
/// The auto-scheduler refuses to run against a finalized schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Draft,
    Scheduled,
    Finalized,
    Cancelled,
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleStatus::Draft => write!(f, "draft"),
            ScheduleStatus::Scheduled => write!(f, "scheduled"),
            ScheduleStatus::Finalized => write!(f, "finalized"),
            ScheduleStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for ScheduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(ScheduleStatus::Draft),
            "scheduled" => Ok(ScheduleStatus::Scheduled),
            "finalized" => Ok(ScheduleStatus::Finalized),
            "cancelled" => Ok(ScheduleStatus::Cancelled),
            _ => Err(format!("Invalid schedule status: {}", s)),
        }
    }
}

impl Default for ScheduleStatus {
    fn default() -> Self {
        ScheduleStatus::Draft
    }
}

impl sqlx::Type<sqlx::Sqlite> for ScheduleStatus {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for ScheduleStatus {
    fn encode_by_ref(
        &self,
        args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        let s = self.to_string();
        <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&s, args)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for ScheduleStatus {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        s.parse::<ScheduleStatus>().map_err(|e| e.into())
    }
}
