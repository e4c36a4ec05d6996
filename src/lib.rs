pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod scheduling;

pub use config::Config;
pub use error::AppError;
pub use scheduling::{AutoScheduleOptions, AutoScheduleOutcome, AutoScheduler, SnapshotLoader};
