pub mod assignment;
pub mod availability;
pub mod employee;
pub mod position;
pub mod schedule;
pub mod shift;

// Re-export all repositories for easy importing
pub use assignment::AssignmentRepository;
pub use availability::AvailabilityRepository;
pub use employee::{EmployeeInput, EmployeeRepository};
pub use position::PositionRepository;
pub use schedule::ScheduleRepository;
pub use shift::ShiftRepository;
