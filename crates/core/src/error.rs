// Error handling for the video player plugin

use thiserror::Error;

/// Video player error types
#[derive(Error, Debug)]
pub enum VideoPlayerError {
    /// No render-target provider (no foreground activity)
    #[error("video_player plugin requires a foreground activity")]
    Unavailable,

    /// Command addressed a texture id with no session behind it
    #[error("No video player associated with texture id {0}")]
    UnknownTextureId(i64),

    /// The vendor player rejected the data source
    #[error("IOError when initializing video player {0}")]
    DataSource(String),

    /// Decoder error reported by the vendor player
    #[error("Video player had error {what} extra {extra}")]
    Decode { what: i32, extra: i32 },

    /// Missing or mistyped method-call argument
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Failure in the platform glue (JNI, host object)
    #[error("Platform error: {0}")]
    Platform(String),

    /// Payload could not be encoded or decoded
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl VideoPlayerError {
    /// Error code reported to the caller alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            VideoPlayerError::Unavailable => "no_activity",
            VideoPlayerError::UnknownTextureId(_) => "Unknown textureId",
            VideoPlayerError::DataSource(_) | VideoPlayerError::Decode { .. } => "VideoError",
            VideoPlayerError::InvalidArgument { .. } => "bad_args",
            VideoPlayerError::Platform(_) => "platform_error",
            VideoPlayerError::Codec(_) => "codec_error",
        }
    }

    pub(crate) fn invalid_argument(name: &str, reason: impl Into<String>) -> Self {
        VideoPlayerError::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for plugin operations
pub type Result<T> = std::result::Result<T, VideoPlayerError>;
