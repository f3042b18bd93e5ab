// Run timing

use chrono::Utc;
use serde::Serialize;

/// Wall-clock bounds of one run, in unix milliseconds
#[derive(Debug, Clone, Serialize)]
pub struct RunMetrics {
    pub total_duration_ms: u64,
    pub start_time: i64,
    pub end_time: i64,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self {
            total_duration_ms: 0,
            start_time: Utc::now().timestamp_millis(),
            end_time: 0,
        }
    }
}

impl RunMetrics {
    /// Stamp the end of the run and derive the duration
    pub fn update_time(&mut self) {
        self.end_time = Utc::now().timestamp_millis();
        self.total_duration_ms = self.end_time.saturating_sub(self.start_time).max(0) as u64;
    }
}
