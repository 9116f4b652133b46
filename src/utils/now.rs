use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current timestamp in milliseconds since the UNIX epoch.
///
/// Request deadlines are computed against this clock, so timeout resolution
/// is bounded by how often the embedder calls `run()` rather than by the
/// clock itself. Falls back to `0` if the system time is unavailable.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
