// Test outcome structure

use crate::state::TestStatus;
use serde::Serialize;

/// Recorded outcome of a finished test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestOutcome {
    #[serde(rename = "test")]
    pub name: String,
    pub status: TestStatus,
    /// Joined diagnostics, present only for failed cases
    #[serde(rename = "exception", skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
}

impl TestOutcome {
    /// Create a successful outcome
    pub fn successful(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Successful,
            diagnostics: None,
        }
    }

    /// Create a failed outcome
    pub fn failed(name: impl Into<String>, diagnostics: String) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Failed,
            diagnostics: Some(diagnostics),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_successful() {
        let outcome = TestOutcome::successful("adds two numbers");
        assert_eq!(outcome.name, "adds two numbers");
        assert_eq!(outcome.status, TestStatus::Successful);
        assert!(outcome.diagnostics.is_none());
    }

    #[test]
    fn test_outcome_failed() {
        let outcome = TestOutcome::failed("overflow check", "Assertion failed: x == 1, but was 2".to_string());
        assert_eq!(outcome.status, TestStatus::Failed);
        assert_eq!(
            outcome.diagnostics.as_deref(),
            Some("Assertion failed: x == 1, but was 2")
        );
    }

    #[test]
    fn test_outcome_failed_empty_diagnostics() {
        // A case can fail with nothing in the buffer; the field stays present
        let outcome = TestOutcome::failed("crashes", String::new());
        assert_eq!(outcome.diagnostics.as_deref(), Some(""));
    }

    #[test]
    fn test_outcome_serde_field_names() {
        let outcome = TestOutcome::failed("t", "d".to_string());
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["test"], "t");
        assert_eq!(value["status"], "FAILED");
        assert_eq!(value["exception"], "d");

        let value = serde_json::to_value(TestOutcome::successful("t")).unwrap();
        assert!(value.get("exception").is_none());
    }
}
