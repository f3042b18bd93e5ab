pub mod config;
pub mod listener;
pub mod logging;
pub mod report;
pub mod state;

pub use config::{HostOptions, ProgressMode};
pub use listener::TestListener;
pub use report::{ConsoleReporter, JsonReporter, JunitReporter, StreamingReporter};
pub use state::{CaseCollector, RunResults, TestOutcome, TestStatus};
