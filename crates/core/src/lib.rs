// Core types and traits for the video player plugin

pub mod channel;
pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod method;
pub mod plugin;
pub mod registry;
pub mod session;
pub mod texture;
pub mod vendor;

#[cfg(test)]
mod fakes;

// Re-export commonly used types
pub use channel::{EventChannel, EventSink, StreamHandler};
pub use config::PluginConfig;
pub use error::{Result, VideoPlayerError};
pub use event::{BufferedRange, VideoEvent};
pub use host::PluginHost;
pub use method::{MethodCall, MethodResponse, PlayerCommand};
pub use plugin::VideoPlayerPlugin;
pub use registry::PlayerRegistry;
pub use session::{SessionOptions, VideoPlayer};
pub use texture::{RenderTarget, TextureId, TextureRegistry};
pub use vendor::{AudioContent, VendorEvent, VendorListener, VendorPlayer};
