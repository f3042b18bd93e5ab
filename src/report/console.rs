// Console listener - pytest-style output

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{HostOptions, ProgressMode};
use crate::listener::{AssertInfo, CaseStats, MessageInfo, RunStats, TestCaseInfo, TestListener};
use crate::state::{CaseCollector, TestStatus};

/// Console listener
pub struct ConsoleReporter {
    mode: ProgressMode,
    progress_bar: ProgressBar,
    collector: CaseCollector,
    dots_count: usize,
}

impl ConsoleReporter {
    /// Create a new console listener
    pub fn new(mode: ProgressMode) -> Self {
        Self {
            mode,
            // Replaced with a sized bar once the host announces its case list
            progress_bar: ProgressBar::hidden(),
            collector: CaseCollector::new(),
            dots_count: 0,
        }
    }

    pub fn from_options(options: &HostOptions) -> Self {
        Self::new(options.progress_mode())
    }

    /// Print summary
    fn print_summary(&self, errors: &[String]) {
        let results = self.collector.results();
        let total = results.total();
        let duration_ms = results.metrics.total_duration_ms;

        println!();
        println!(
            "════════════════════════════════════════════════════════════════════════════════"
        );
        if results.all_passed() {
            println!("✅ PASSED ({} passed in {}ms)", results.passed(), duration_ms);
        } else {
            println!(
                "❌ FAILED ({} failed, {} passed in {}ms)",
                results.failed(),
                results.passed(),
                duration_ms
            );
        }
        println!(
            "────────────────────────────────────────────────────────────────────────────────"
        );
        println!("📊 Execution Statistics:");
        println!("   • Total tests: {}", total);
        println!("   • Passed: {}", results.passed());
        println!("   • Failed: {}", results.failed());
        println!("   • Duration: {}ms", duration_ms);

        let avg = if total > 0 {
            duration_ms as f64 / total as f64
        } else {
            0.0
        };
        println!("   • Average per test: {:.0}ms", avg);
        println!("   • Success rate: {:.0}%", results.pass_rate());

        println!(
            "────────────────────────────────────────────────────────────────────────────────"
        );

        if !errors.is_empty() {
            println!("❌ Failed Tests:");
            for error in errors {
                println!("   • {}", error);
            }
            println!(
                "────────────────────────────────────────────────────────────────────────────────"
            );
        }
        println!();
    }
}

impl TestListener for ConsoleReporter {
    fn on_run_start(&mut self) {
        self.collector.begin_run();
        self.dots_count = 0;
    }

    fn on_query(&mut self, cases: &[TestCaseInfo]) {
        if matches!(self.mode, ProgressMode::Bar) {
            let bar = ProgressBar::new(cases.len() as u64);
            if let Ok(style) =
                ProgressStyle::default_bar().template("{bar:40} {pos}/{len} {msg}")
            {
                bar.set_style(style);
            }
            self.progress_bar = bar;
        }
    }

    fn on_test_case_start(&mut self, case: &TestCaseInfo) {
        if matches!(self.mode, ProgressMode::Verbose) {
            match (&case.file, case.line) {
                (Some(file), Some(line)) => {
                    println!("Testing {} ({}:{}) ... ", case.name, file, line)
                }
                _ => println!("Testing {} ... ", case.name),
            }
        }
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

        match self.mode {
            ProgressMode::Dots => {
                let char = match outcome.status {
                    TestStatus::Successful => ".",
                    TestStatus::Failed => "E",
                };

                print!("{}", char);
                use std::io::Write;
                let _ = std::io::stdout().flush();

                self.dots_count += 1;
                if self.dots_count >= 80 {
                    println!();
                    self.dots_count = 0;
                }
            }
            ProgressMode::Bar => {
                self.progress_bar.set_message(outcome.name.clone());
                self.progress_bar.inc(1);
            }
            ProgressMode::Verbose => match outcome.status {
                TestStatus::Successful => println!("✅ PASS"),
                TestStatus::Failed => println!(
                    "❌ FAIL: {}",
                    outcome.diagnostics.as_deref().unwrap_or("Unknown error")
                ),
            },
            ProgressMode::None => {}
        }
    }

    fn on_run_end(&mut self, _stats: &RunStats) {
        self.collector.finish_run();

        // Ensure newline after dots
        if matches!(self.mode, ProgressMode::Dots) && self.dots_count > 0 {
            println!();
        }
        self.progress_bar.finish_and_clear();

        let mut errors = Vec::new();
        for outcome in self.collector.results().all() {
            if outcome.status == TestStatus::Failed {
                let mut error_line = outcome.name.clone();
                if let Some(diagnostics) = &outcome.diagnostics
                    && !diagnostics.is_empty()
                {
                    error_line
                        .push_str(&format!("\n      {}", diagnostics.replace('\n', "\n      ")));
                }
                errors.push(error_line);
            }
        }

        self.print_summary(&errors);
    }
}
