use std::io::{self, Write};

use serde_json::json;

use crate::config::HostOptions;
use crate::listener::{AssertInfo, CaseStats, MessageInfo, RunStats, TestCaseInfo, TestListener};
use crate::state::{CaseCollector, TestStatus};

/// Streaming listener - one JSON event per line on stdout
pub struct StreamingReporter {
    collector: CaseCollector,
    suite_started: bool,
}

impl StreamingReporter {
    pub fn new() -> Self {
        Self {
            collector: CaseCollector::new(),
            suite_started: false,
        }
    }

    pub fn from_options(_options: &HostOptions) -> Self {
        Self::new()
    }

    fn emit(&self, event: &serde_json::Value) {
        let mut stdout = io::stdout().lock();
        if let Ok(s) = serde_json::to_string(event) {
            let _ = writeln!(stdout, "{}", s);
        }
        let _ = stdout.flush();
    }
}

impl Default for StreamingReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TestListener for StreamingReporter {
    fn on_run_start(&mut self) {
        self.collector.begin_run();
        self.suite_started = false;
    }

    fn on_test_case_start(&mut self, case: &TestCaseInfo) {
        if !self.suite_started {
            self.suite_started = true;
            self.emit(&json!({
                "event": "suite_start",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }));
        }

        self.emit(&json!({
            "event": "test_start",
            "testId": case.name,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));

        self.collector.begin_case(&case.name);
    }

    fn on_assert(&mut self, assert: &AssertInfo) {
        if !assert.passed {
            self.collector
                .assert_failed(&assert.expression, &assert.decomposed);
        }
    }

    fn on_message(&mut self, message: &MessageInfo) {
        self.collector.log_message(&message.text);
    }

    fn on_test_case_end(&mut self, stats: &CaseStats) {
        let Some(outcome) = self.collector.end_case(stats.failure_flags.is_failure()) else {
            return;
        };

        let event_type = match outcome.status {
            TestStatus::Successful => "test_pass",
            TestStatus::Failed => "test_fail",
        };

        let mut event = json!({
            "event": event_type,
            "testId": outcome.name,
            "duration": stats.seconds,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if let Some(diagnostics) = &outcome.diagnostics {
            event["message"] = json!(diagnostics);
        }

        self.emit(&event);
    }

    fn on_run_end(&mut self, _stats: &RunStats) {
        self.collector.finish_run();

        let results = self.collector.results();
        self.emit(&json!({
            "event": "suite_end",
            "summary": {
                "total": results.total(),
                "passed": results.passed(),
                "failed": results.failed(),
                "duration": results.metrics.total_duration_ms
            },
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }
}
