// Seam around the closed-source vendor media player

use crate::error::Result;
use crate::texture::RenderTarget;
use std::sync::Arc;

/// Audio content type used for routing decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioContent {
    Movie,
}

/// Notification raised by the vendor player on its own threads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorEvent {
    /// Asynchronous prepare step finished
    Prepared,
    /// Buffered percentage, 0..=100
    BufferingUpdate { percent: i32 },
    /// Playback reached the end of the media
    Completion,
    /// Decoder error with the vendor's primary and secondary codes
    Error { what: i32, extra: i32 },
}

/// Receiver for vendor notifications.
/// Called from vendor-owned threads; must not block.
pub trait VendorListener: Send + Sync {
    /// Returns true when the event was handled. For errors this suppresses
    /// the vendor's fatal stop.
    fn on_vendor_event(&self, event: VendorEvent) -> bool;
}

/// Vendor media player.
///
/// The vendor library is internally thread-safe: commands from the dispatch
/// thread and queries from callback threads may run concurrently, so every
/// method takes `&self`.
pub trait VendorPlayer: Send + Sync {
    /// Bind the player output to a render target
    fn set_surface(&self, target: &dyn RenderTarget) -> Result<()>;

    /// Set the media location; fails with `DataSource` on I/O errors
    fn set_data_source(&self, data_source: &str) -> Result<()>;

    /// Configure audio routing (best-effort)
    fn set_audio_content(&self, content: AudioContent) -> Result<()>;

    /// Install or clear the notification listener
    fn set_listener(&self, listener: Option<Arc<dyn VendorListener>>) -> Result<()>;

    /// Begin preparation; returns before it completes
    fn prepare_async(&self) -> Result<()>;

    fn start(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn stop(&self) -> Result<()>;
    fn reset(&self) -> Result<()>;
    fn release(&self) -> Result<()>;

    fn is_playing(&self) -> Result<bool>;
    fn set_looping(&self, looping: bool) -> Result<()>;

    /// Per-channel volume, 0.0 - 1.0
    fn set_volume(&self, left: f32, right: f32) -> Result<()>;

    /// Seek to a position in milliseconds. Not clamped.
    fn seek_to(&self, position_ms: i64) -> Result<()>;

    /// Current position in milliseconds
    fn current_position(&self) -> Result<i64>;

    /// Media duration in milliseconds
    fn duration(&self) -> Result<i64>;

    fn video_width(&self) -> Result<i32>;
    fn video_height(&self) -> Result<i32>;
}
