// Normalized event vocabulary pushed onto each session's event channel

use serde::{Deserialize, Serialize};

/// Half-open buffered range `[start_ms, end_ms]`
pub type BufferedRange = [i64; 2];

/// Event emitted to the listener of a session's event channel.
///
/// Serializes as a map tagged by `"event"`, e.g.
/// `{"event":"bufferingUpdate","values":[[0,5000]]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum VideoEvent {
    /// Preparation completed and a listener is attached
    Initialized {
        /// Media duration in milliseconds
        duration: i64,
        width: i32,
        height: i32,
    },

    /// Buffered progress; always a single range starting at zero
    BufferingUpdate { values: Vec<BufferedRange> },

    /// Playback reached the end of the media
    Completed,
}

impl VideoEvent {
    /// Translate a vendor buffering percentage into an elapsed-time range.
    pub fn buffering(percent: i32, duration_ms: i64) -> Self {
        VideoEvent::BufferingUpdate {
            values: vec![buffered_range(percent, duration_ms)],
        }
    }
}

/// `[0, percent * duration / 100]`, rounded toward zero.
pub fn buffered_range(percent: i32, duration_ms: i64) -> BufferedRange {
    let end = i64::from(percent).saturating_mul(duration_ms) / 100;
    [0, end]
}
