use actix_web::web;

use crate::handlers::scheduling;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/schedules")
            .route("/{id}/auto-schedule", web::post().to(scheduling::auto_schedule)),
    );
}
