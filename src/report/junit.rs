// JUnit listener - outputs test results in JUnit XML format

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::error;

use crate::config::HostOptions;
use crate::listener::{AssertInfo, CaseStats, MessageInfo, RunStats, TestCaseInfo, TestListener};
use crate::state::{CaseCollector, TestStatus};

/// JUnit listener
pub struct JunitReporter {
    output_path: PathBuf,
    suite_name: String,
    collector: CaseCollector,
    // Host-measured seconds, parallel to the recorded outcomes
    case_seconds: Vec<f64>,
}

impl JunitReporter {
    /// Create a new JUnit listener
    pub fn new(output_path: PathBuf, suite_name: impl Into<String>) -> Self {
        Self {
            output_path,
            suite_name: suite_name.into(),
            collector: CaseCollector::new(),
            case_seconds: Vec::new(),
        }
    }

    pub fn from_options(options: &HostOptions) -> Self {
        Self::new(options.output.clone(), options.suite.clone())
    }

    /// Render the collected outcomes as a JUnit XML document
    pub fn render(&self) -> String {
        let results = self.collector.results();
        let suite_time = results.metrics.total_duration_ms as f64 / 1000.0;

        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<testsuites name=\"{}\" time=\"{:.3}\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"0\">\n",
            escape_xml(&self.suite_name),
            suite_time,
            results.total(),
            results.failed()
        ));

        xml.push_str(&format!(
            "  <testsuite name=\"{}\" time=\"{:.3}\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"0\">\n",
            escape_xml(&self.suite_name),
            suite_time,
            results.total(),
            results.failed()
        ));

        for (outcome, seconds) in results.all().iter().zip(&self.case_seconds) {
            xml.push_str(&format!(
                "    <testcase name=\"{}\" classname=\"{}\" time=\"{:.3}\">\n",
                escape_xml(&outcome.name),
                escape_xml(&self.suite_name),
                seconds
            ));

            if outcome.status == TestStatus::Failed {
                let msg = outcome.diagnostics.as_deref().unwrap_or("Test failed");
                let escaped_msg = escape_xml(msg);
                xml.push_str(&format!(
                    "      <failure message=\"{}\" type=\"AssertionError\">{}</failure>\n",
                    escaped_msg, escaped_msg
                ));
            }

            xml.push_str("    </testcase>\n");
        }

        xml.push_str("  </testsuite>\n");
        xml.push_str("</testsuites>\n");
        xml
    }

    /// Write the report, truncating any previous file
    pub fn write_report(&self) -> Result<()> {
        let mut file = File::create(&self.output_path).with_context(|| {
            format!(
                "Failed to create JUnit report file: {}",
                self.output_path.display()
            )
        })?;

        file.write_all(self.render().as_bytes())
            .context("Failed to write JUnit XML content")?;

        Ok(())
    }
}

impl TestListener for JunitReporter {
    fn on_run_start(&mut self) {
        self.collector.begin_run();
        self.case_seconds.clear();
    }

    fn on_test_case_start(&mut self, case: &TestCaseInfo) {
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
        if self
            .collector
            .end_case(stats.failure_flags.is_failure())
            .is_some()
        {
            self.case_seconds.push(stats.seconds);
        }
    }

    fn on_run_end(&mut self, _stats: &RunStats) {
        self.collector.finish_run();
        // The host contract has no error channel for listeners
        if let Err(e) = self.write_report() {
            error!("{:#}", e);
        }
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml("a < b & \"c\" > 'd'"),
            "a &lt; b &amp; &quot;c&quot; &gt; &apos;d&apos;"
        );
    }
}
