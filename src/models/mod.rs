pub mod failure;
pub mod report;

pub use failure::FailureRecord;
pub use report::RunReport;
