// Report module - listeners that render collected outcomes

pub mod console;
pub mod json;
pub mod junit;
pub mod streaming;

pub use console::ConsoleReporter;
pub use json::JsonReporter;
pub use junit::JunitReporter;
pub use streaming::StreamingReporter;
