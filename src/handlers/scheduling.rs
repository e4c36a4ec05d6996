use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::scheduling::{AutoScheduleOptions, AutoScheduler};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoScheduleRequest {
    #[serde(default)]
    pub overwrite_existing: bool,
    #[serde(default)]
    pub dry_run: bool,
    pub assigned_by: Option<Uuid>,
}

pub async fn auto_schedule(
    scheduler: web::Data<AutoScheduler>,
    path: web::Path<Uuid>,
    input: web::Json<AutoScheduleRequest>,
) -> Result<HttpResponse, AppError> {
    let schedule_id = path.into_inner();

    log::info!(
        "Auto-schedule requested for {} (overwrite: {}, dry run: {})",
        schedule_id,
        input.overwrite_existing,
        input.dry_run
    );

    let options = AutoScheduleOptions {
        overwrite_existing: input.overwrite_existing,
        dry_run: input.dry_run,
        assigned_by: input.assigned_by,
        seed: None,
    };

    let outcome = scheduler.auto_schedule(schedule_id, options).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(outcome)))
}
