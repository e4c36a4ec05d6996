use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};
use anyhow::Result;

use rosterd::database::{
    init_database,
    repositories::{
        AssignmentRepository, AvailabilityRepository, EmployeeRepository, PositionRepository,
        ScheduleRepository, ShiftRepository,
    },
};
use rosterd::{AutoScheduler, Config, SnapshotLoader, routes};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Rosterd API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    // Load configuration
    let config = Config::from_env()?;
    log::info!("Configuration loaded (environment: {})", config.environment);

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized");

    // Initialize repositories and the scheduling service
    let schedule_repository = ScheduleRepository::new(pool.clone());
    let shift_repository = ShiftRepository::new(pool.clone());
    let employee_repository = EmployeeRepository::new(pool.clone());
    let availability_repository = AvailabilityRepository::new(pool.clone());
    let position_repository = PositionRepository::new(pool.clone());
    let assignment_repository = AssignmentRepository::new(pool.clone());

    let snapshot_loader = SnapshotLoader::new(
        schedule_repository.clone(),
        shift_repository.clone(),
        employee_repository.clone(),
        availability_repository.clone(),
        position_repository.clone(),
        assignment_repository.clone(),
    );
    let auto_scheduler = AutoScheduler::new(snapshot_loader, assignment_repository.clone());

    let scheduler_data = web::Data::new(auto_scheduler);
    let schedule_repo_data = web::Data::new(schedule_repository);
    let shift_repo_data = web::Data::new(shift_repository);
    let employee_repo_data = web::Data::new(employee_repository);
    let availability_repo_data = web::Data::new(availability_repository);
    let position_repo_data = web::Data::new(position_repository);
    let assignment_repo_data = web::Data::new(assignment_repository);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = if config.is_production() {
            Cors::default()
        } else {
            Cors::permissive()
        };

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(config_data.clone())
            .app_data(scheduler_data.clone())
            .app_data(schedule_repo_data.clone())
            .app_data(shift_repo_data.clone())
            .app_data(employee_repo_data.clone())
            .app_data(availability_repo_data.clone())
            .app_data(position_repo_data.clone())
            .app_data(assignment_repo_data.clone())
            .service(hello)
            .service(health)
            .configure(routes::configure)
    })
    .bind(&server_address)?
    .run()
    .await?;

    Ok(())
}
