// State module - Test outcome accumulation
// Centralized management of per-run outcomes and timing

pub mod collector;
pub mod metrics;
pub mod outcome;

pub use collector::CaseCollector;
pub use metrics::RunMetrics;
pub use outcome::TestOutcome;

use serde::Serialize;

/// Outcomes recorded over one run
#[derive(Debug, Clone, Serialize)]
pub struct RunResults {
    total: usize,
    passed: usize,
    failed: usize,
    results: Vec<TestOutcome>,
    pub metrics: RunMetrics,
}

impl Default for RunResults {
    fn default() -> Self {
        Self::new()
    }
}

impl RunResults {
    /// Create empty results
    pub fn new() -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
            results: Vec::new(),
            metrics: RunMetrics::default(),
        }
    }

    /// Append an outcome
    pub fn add(&mut self, outcome: TestOutcome) {
        match outcome.status {
            TestStatus::Successful => self.passed += 1,
            TestStatus::Failed => self.failed += 1,
        }

        self.results.push(outcome);
        self.total += 1;
    }

    /// Get total cases
    pub fn total(&self) -> usize {
        self.total
    }

    /// Get passed cases
    pub fn passed(&self) -> usize {
        self.passed
    }

    /// Get failed cases
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Get all outcomes, in recording order
    pub fn all(&self) -> &[TestOutcome] {
        &self.results
    }

    /// Check if all cases passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Outcome of one test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestStatus {
    Successful,
    Failed,
}

impl TestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Successful => "SUCCESSFUL",
            TestStatus::Failed => "FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_results_tallies() {
        let mut results = RunResults::new();
        results.add(TestOutcome::successful("a"));
        results.add(TestOutcome::failed("b", "boom".to_string()));
        results.add(TestOutcome::successful("c"));

        assert_eq!(results.total(), 3);
        assert_eq!(results.passed(), 2);
        assert_eq!(results.failed(), 1);
        assert!(!results.all_passed());
    }

    #[test]
    fn test_run_results_preserves_order() {
        let mut results = RunResults::new();
        results.add(TestOutcome::successful("first"));
        results.add(TestOutcome::successful("second"));

        let names: Vec<&str> = results.all().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_pass_rate_empty() {
        let results = RunResults::new();
        assert_eq!(results.pass_rate(), 0.0);
        assert!(results.all_passed());
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(TestStatus::Successful.as_str(), "SUCCESSFUL");
        assert_eq!(TestStatus::Failed.as_str(), "FAILED");
    }
}
