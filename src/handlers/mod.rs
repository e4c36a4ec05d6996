pub mod scheduling;
pub mod shared;
