// Request/response protocol of the method channel

use crate::error::{Result, VideoPlayerError};
use crate::texture::TextureId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Incoming request: a method name plus a map of arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    fn raw_argument(&self, name: &str) -> Result<&Value> {
        match self.arguments.get(name) {
            Some(Value::Null) | None => Err(VideoPlayerError::invalid_argument(name, "missing")),
            Some(value) => Ok(value),
        }
    }

    /// Typed argument lookup
    pub fn argument<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.raw_argument(name)?;
        T::deserialize(value).map_err(|e| VideoPlayerError::invalid_argument(name, e.to_string()))
    }

    /// Any JSON number, truncated toward zero
    pub fn integer_argument(&self, name: &str) -> Result<i64> {
        let value = self.raw_argument(name)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
            .ok_or_else(|| VideoPlayerError::invalid_argument(name, "expected a number"))
    }

    pub fn texture_id(&self) -> Result<TextureId> {
        self.integer_argument("textureId")
    }
}

/// Reply sent back for a single method call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    Success { result: Value },
    Error { code: String, message: String },
    NotImplemented,
}

impl MethodResponse {
    pub fn success(result: Value) -> Self {
        MethodResponse::Success { result }
    }

    pub fn empty() -> Self {
        MethodResponse::Success { result: Value::Null }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResponse::Success { .. })
    }
}

impl From<VideoPlayerError> for MethodResponse {
    fn from(err: VideoPlayerError) -> Self {
        MethodResponse::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<Result<MethodResponse>> for MethodResponse {
    fn from(result: Result<MethodResponse>) -> Self {
        result.unwrap_or_else(MethodResponse::from)
    }
}

/// Command addressed to an existing session
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    SetLooping(bool),
    SetVolume(f64),
    Play,
    Pause,
    SeekTo(i32),
    Position,
    Dispose,
}

impl PlayerCommand {
    /// Decode a per-session call. `Ok(None)` means the method is not implemented.
    pub fn from_call(call: &MethodCall) -> Result<Option<Self>> {
        let command = match call.method.as_str() {
            "setLooping" => PlayerCommand::SetLooping(call.argument("looping")?),
            "setVolume" => PlayerCommand::SetVolume(call.argument("volume")?),
            "play" => PlayerCommand::Play,
            "pause" => PlayerCommand::Pause,
            "seekTo" => PlayerCommand::SeekTo(call.integer_argument("location")? as i32),
            "position" => PlayerCommand::Position,
            "dispose" => PlayerCommand::Dispose,
            _ => return Ok(None),
        };
        Ok(Some(command))
    }
}
