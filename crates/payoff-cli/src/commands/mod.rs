pub mod ask;
pub mod loan;
pub mod scenario;
