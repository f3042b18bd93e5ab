// Host-supplied listener options

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Progress indicator modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Dots,
    Bar,
    None,
    Verbose,
}

impl std::str::FromStr for ProgressMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dots" => Ok(Self::Dots),
            "bar" => Ok(Self::Bar),
            "none" => Ok(Self::None),
            "verbose" => Ok(Self::Verbose),
            _ => Ok(Self::Dots),
        }
    }
}

/// Options handed to a listener factory by the host engine.
///
/// The host passes an opaque JSON object; fields we know about are picked
/// out here, everything else is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostOptions {
    /// Output path for file-writing listeners
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Progress indicator mode for the console listener
    #[serde(default = "default_progress")]
    pub progress: String,

    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Suite name used in JUnit documents
    #[serde(default = "default_suite")]
    pub suite: String,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            output: default_output(),
            progress: default_progress(),
            color: default_color(),
            suite: default_suite(),
        }
    }
}

// Default values

pub fn default_output() -> PathBuf {
    PathBuf::from("./test-results.json")
}

fn default_progress() -> String {
    String::from("dots")
}

fn default_color() -> bool {
    true
}

fn default_suite() -> String {
    String::from("reportify")
}

impl HostOptions {
    /// Build options from the opaque object supplied by the host.
    ///
    /// A malformed object falls back to defaults rather than failing the
    /// listener registration.
    pub fn from_value(value: &serde_json::Value) -> Self {
        match serde_json::from_value(value.clone()) {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!("Malformed host options, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Parse the progress field into a mode
    pub fn progress_mode(&self) -> ProgressMode {
        self.progress.parse().unwrap_or(ProgressMode::Dots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let value = json!({
            "output": "out/results.json",
            "progress": "verbose",
            "color": false,
            "suite": "e2e"
        });

        let options = HostOptions::from_value(&value);
        assert_eq!(options.output, PathBuf::from("out/results.json"));
        assert_eq!(options.progress, "verbose");
        assert!(!options.color);
        assert_eq!(options.suite, "e2e");
        assert_eq!(options.progress_mode(), ProgressMode::Verbose);
    }

    #[test]
    fn test_from_value_ignores_unknown_fields() {
        let value = json!({
            "output": "results.json",
            "order_by": "rand",
            "no_skip": true
        });

        let options = HostOptions::from_value(&value);
        assert_eq!(options.output, PathBuf::from("results.json"));
        assert_eq!(options.progress, "dots");
    }

    #[test]
    fn test_from_value_malformed_falls_back_to_defaults() {
        let value = json!(["not", "an", "object"]);

        let options = HostOptions::from_value(&value);
        assert_eq!(options.output, default_output());
    }
}
