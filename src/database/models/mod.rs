pub mod assignment;
pub mod availability;
pub mod employee;
pub mod position;
pub mod schedule;
pub mod shift;

pub use assignment::{
    AssignmentSource, AssignmentStatus, ScheduleAssignment, ScheduleAssignmentInput,
};
pub use availability::{AvailabilityPosition, EmployeeAvailability};
pub use employee::{ContractType, Employee, EmployeeContract, PayrollRecord};
pub use position::Position;
pub use schedule::{ScheduleStatus, WeeklySchedule};
pub use shift::{Shift, ShiftPositionRequirement};
