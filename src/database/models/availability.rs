use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An employee's declaration of willingness to work one specific shift.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAvailability {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub shift_id: Uuid,
    pub created_at: NaiveDateTime,
}

/// A position the employee is willing to fill within one availability,
/// ranked by `preference_order` (1 = most preferred).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPosition {
    pub id: Uuid,
    pub availability_id: Uuid,
    pub position_id: Uuid,
    pub preference_order: i64,
}
