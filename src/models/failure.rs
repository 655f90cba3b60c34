use super::report::{ErrorDetail, Location};

/// Normalized view of the first failed test found in a run report.
///
/// Built once by `extract::first_failure` and consumed by the prompt renderer;
/// nothing mutates it after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    pub title: String,
    pub location: Option<Location>,
    pub error: Option<ErrorDetail>,
    /// Captured stderr lines, in emission order. `None` when the runner
    /// recorded nothing.
    pub stderr: Option<Vec<String>>,
}
