//! Pipeline result values exported at the end of every run.

/// Env key the pipeline reads the step result from.
pub const RESULT_KEY: &str = "BITRISE_XAMARIN_TEST_RESULT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Succeeded,
    Failed,
}

impl TestResult {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}
