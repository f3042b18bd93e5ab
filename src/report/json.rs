// JSON listener - collects test outcomes and writes them to a JSON file

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::error;

use crate::config::HostOptions;
use crate::listener::{AssertInfo, CaseStats, MessageInfo, RunStats, TestCaseInfo, TestListener};
use crate::state::{CaseCollector, RunResults};

/// JSON listener.
///
/// Renders the result list as one array, one object per line, members in
/// `test`, `status`, `exception` order. The array layout, member order and
/// escaping are fixed; the document is built by hand.
pub struct JsonReporter {
    output_path: PathBuf,
    collector: CaseCollector,
}

impl JsonReporter {
    /// Create a new JSON listener writing to `output_path`
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            output_path,
            collector: CaseCollector::new(),
        }
    }

    pub fn from_options(options: &HostOptions) -> Self {
        Self::new(options.output.clone())
    }

    /// Outcomes recorded so far
    pub fn results(&self) -> &RunResults {
        self.collector.results()
    }

    /// Render the result list into the output document
    pub fn render(&self) -> String {
        let results = self.collector.results();
        let mut out = String::from("[\n");

        for (i, outcome) in results.all().iter().enumerate() {
            out.push_str("{\"test\": \"");
            out.push_str(&escape_json(&outcome.name));
            out.push_str("\", \"status\": \"");
            out.push_str(outcome.status.as_str());
            out.push('"');

            if let Some(diagnostics) = &outcome.diagnostics {
                out.push_str(", \"exception\": \"");
                out.push_str(&escape_json(diagnostics));
                out.push('"');
            }

            out.push('}');
            if i + 1 < results.total() {
                out.push(',');
            }
            out.push('\n');
        }

        out.push(']');
        out
    }

    /// Write the report, truncating any previous file
    pub fn write_report(&self) -> Result<()> {
        let mut file = File::create(&self.output_path).with_context(|| {
            format!(
                "Failed to create JSON report file: {}",
                self.output_path.display()
            )
        })?;

        file.write_all(self.render().as_bytes())
            .context("Failed to write JSON report content")?;

        Ok(())
    }
}

impl TestListener for JsonReporter {
    fn on_run_start(&mut self) {
        self.collector.begin_run();
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
        self.collector.end_case(stats.failure_flags.is_failure());
    }

    fn on_run_end(&mut self, _stats: &RunStats) {
        self.collector.finish_run();
        // The host contract has no error channel for listeners
        if let Err(e) = self.write_report() {
            error!("{:#}", e);
        }
    }
}

/// Escape a string for embedding in a JSON document.
///
/// Covers the two-character escapes plus `\u00XX` for remaining control
/// characters. Codepoints above 0x1F pass through unchanged; enough for
/// ASCII test names and diagnostics, not a general-purpose encoder.
fn escape_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes_and_backslashes() {
        assert_eq!(escape_json(r#"He said "hi""#), r#"He said \"hi\""#);
        assert_eq!(escape_json(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_escape_named_controls() {
        assert_eq!(escape_json("a\nb"), "a\\nb");
        assert_eq!(escape_json("a\tb"), "a\\tb");
        assert_eq!(escape_json("a\rb"), "a\\rb");
        assert_eq!(escape_json("a\u{0008}b"), "a\\bb");
        assert_eq!(escape_json("a\u{000C}b"), "a\\fb");
    }

    #[test]
    fn test_escape_other_controls_as_hex() {
        assert_eq!(escape_json("\u{0001}"), "\\u0001");
        assert_eq!(escape_json("\u{001f}"), "\\u001f");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        let plain = "plain ASCII text, no specials";
        assert_eq!(escape_json(plain), plain);
    }

    #[test]
    fn test_escape_leaves_non_ascii_alone() {
        assert_eq!(escape_json("héllo"), "héllo");
    }

    #[test]
    fn test_render_empty_run() {
        let reporter = JsonReporter::new(PathBuf::from("unused.json"));
        assert_eq!(reporter.render(), "[\n]");
    }
}
