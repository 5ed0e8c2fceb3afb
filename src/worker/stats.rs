use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters for a single worker session, returned to the caller when
/// the session ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerStats {
    /// When the session task started
    pub started_at: DateTime<Utc>,

    /// Commands received over the inbound channel
    pub commands_received: usize,

    /// Successful model loads
    pub loads_ok: usize,

    /// Failed model loads
    pub loads_failed: usize,

    /// Successful transcriptions
    pub transcriptions_ok: usize,

    /// Failed transcriptions (decode or inference errors, not rejections)
    pub transcriptions_failed: usize,

    /// Commands rejected while another operation was in flight
    pub rejected_busy: usize,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            commands_received: 0,
            loads_ok: 0,
            loads_failed: 0,
            transcriptions_ok: 0,
            transcriptions_failed: 0,
            rejected_busy: 0,
        }
    }

    /// Seconds since the session started.
    pub fn uptime_secs(&self) -> f64 {
        let elapsed = Utc::now().signed_duration_since(self.started_at);
        elapsed.num_milliseconds() as f64 / 1000.0
    }
}

impl Default for WorkerStats {
    fn default() -> Self {
        Self::new()
    }
}
