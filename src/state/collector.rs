// Per-case collection state machine
// One case at a time: begin resets the diagnostics buffer, end consumes it

use crate::state::{RunResults, TestOutcome};
use tracing::{debug, warn};

/// Accumulates diagnostics for the case in flight and outcomes for the run.
///
/// The host delivers notifications sequentially, so at most one case is
/// active at any moment. Diagnostics recorded while a case is active are
/// kept only if that case ends failed; a passing case discards them.
#[derive(Debug, Default)]
pub struct CaseCollector {
    active: Option<ActiveCase>,
    results: RunResults,
}

#[derive(Debug)]
struct ActiveCase {
    name: String,
    diagnostics: Vec<String>,
}

impl CaseCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh result list for a new run
    pub fn begin_run(&mut self) {
        self.active = None;
        self.results = RunResults::new();
    }

    /// Enter a case; the diagnostics buffer starts empty
    pub fn begin_case(&mut self, name: impl Into<String>) {
        let name = name.into();
        if let Some(previous) = self.active.take() {
            warn!("Test case '{}' started before '{}' ended", name, previous.name);
        }
        self.active = Some(ActiveCase {
            name,
            diagnostics: Vec::new(),
        });
    }

    /// Record a failed assertion for the active case
    pub fn assert_failed(&mut self, expression: &str, decomposed: &str) {
        self.push_line(format!(
            "Assertion failed: {}, but was {}",
            expression, decomposed
        ));
    }

    /// Record a logged message for the active case, whatever its eventual outcome
    pub fn log_message(&mut self, text: &str) {
        self.push_line(format!("Message: {}", text));
    }

    fn push_line(&mut self, line: String) {
        match &mut self.active {
            Some(case) => case.diagnostics.push(line),
            // Outside a case there is nowhere to attach the line
            None => debug!("Dropping diagnostics outside a test case: {}", line),
        }
    }

    /// Close the active case and record its outcome.
    ///
    /// Diagnostics are joined by newline for failed cases and discarded for
    /// passing ones. Returns a copy of the recorded outcome so streaming
    /// consumers can act on it; `None` if no case was active.
    pub fn end_case(&mut self, failed: bool) -> Option<TestOutcome> {
        let Some(case) = self.active.take() else {
            warn!("Test case end without a matching start");
            return None;
        };

        let outcome = if failed {
            TestOutcome::failed(case.name, case.diagnostics.join("\n"))
        } else {
            TestOutcome::successful(case.name)
        };

        self.results.add(outcome.clone());
        Some(outcome)
    }

    /// Stamp run end timing
    pub fn finish_run(&mut self) {
        self.results.metrics.update_time();
    }

    /// Recorded outcomes so far
    pub fn results(&self) -> &RunResults {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TestStatus;

    #[test]
    fn test_passing_case_has_no_diagnostics() {
        let mut collector = CaseCollector::new();
        collector.begin_run();
        collector.begin_case("ok");
        collector.log_message("noted during a passing case");
        let outcome = collector.end_case(false).unwrap();

        assert_eq!(outcome.status, TestStatus::Successful);
        assert!(outcome.diagnostics.is_none());
    }

    #[test]
    fn test_failed_case_joins_diagnostics() {
        let mut collector = CaseCollector::new();
        collector.begin_run();
        collector.begin_case("bad");
        collector.assert_failed("x == 1", "2");
        collector.log_message("context");
        let outcome = collector.end_case(true).unwrap();

        assert_eq!(
            outcome.diagnostics.as_deref(),
            Some("Assertion failed: x == 1, but was 2\nMessage: context")
        );
    }

    #[test]
    fn test_buffer_does_not_leak_between_cases() {
        let mut collector = CaseCollector::new();
        collector.begin_run();
        collector.begin_case("first");
        collector.assert_failed("a == b", "c");
        collector.end_case(true);

        collector.begin_case("second");
        let outcome = collector.end_case(true).unwrap();
        assert_eq!(outcome.diagnostics.as_deref(), Some(""));
    }

    #[test]
    fn test_end_without_start_records_nothing() {
        let mut collector = CaseCollector::new();
        collector.begin_run();
        assert!(collector.end_case(true).is_none());
        assert_eq!(collector.results().total(), 0);
    }

    #[test]
    fn test_diagnostics_outside_case_are_dropped() {
        let mut collector = CaseCollector::new();
        collector.begin_run();
        collector.log_message("between cases");
        collector.begin_case("t");
        let outcome = collector.end_case(true).unwrap();
        assert_eq!(outcome.diagnostics.as_deref(), Some(""));
    }

    #[test]
    fn test_begin_run_resets_results() {
        let mut collector = CaseCollector::new();
        collector.begin_run();
        collector.begin_case("t");
        collector.end_case(false);
        assert_eq!(collector.results().total(), 1);

        collector.begin_run();
        assert_eq!(collector.results().total(), 0);
    }
}
