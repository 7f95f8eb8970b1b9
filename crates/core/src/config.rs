// Plugin configuration handed over by the host at creation time

use crate::error::Result;
use crate::texture::TextureId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_METHOD_CHANNEL: &str = "flutter.io/videoPlayer";
pub const DEFAULT_EVENT_CHANNEL_PREFIX: &str = "flutter.io/videoPlayer/videoEvents";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
    /// Name of the request/response channel
    pub method_channel: String,
    /// Event channels are named prefix + texture id
    pub event_channel_prefix: String,
    /// `log::LevelFilter` name
    pub log_level: String,
    /// Keep the last decode error raised with no listener and deliver it on attach
    pub replay_error_to_late_listener: bool,
    /// Drop vendor callbacks that arrive after the session was disposed
    pub ignore_callbacks_after_dispose: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            method_channel: DEFAULT_METHOD_CHANNEL.to_string(),
            event_channel_prefix: DEFAULT_EVENT_CHANNEL_PREFIX.to_string(),
            log_level: "info".to_string(),
            replay_error_to_late_listener: true,
            ignore_callbacks_after_dispose: true,
        }
    }
}

impl PluginConfig {
    /// Parse from JSON; blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn event_channel_name(&self, texture_id: TextureId) -> String {
        format!("{}{}", self.event_channel_prefix, texture_id)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
