pub mod chart;
pub mod scenario;
pub mod schedule;
