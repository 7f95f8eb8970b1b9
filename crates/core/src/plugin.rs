// Method-channel entry point: one plugin instance per host

use crate::config::PluginConfig;
use crate::error::Result;
use crate::host::PluginHost;
use crate::method::{MethodCall, MethodResponse};
use crate::registry::PlayerRegistry;
use crate::session::SessionOptions;
use serde_json::json;
use std::sync::Arc;

/// Handles every request arriving on the method channel.
///
/// The instance is owned by whoever receives requests and passed around
/// explicitly; there is no process-wide table.
pub struct VideoPlayerPlugin {
    host: Arc<dyn PluginHost>,
    registry: PlayerRegistry,
    config: PluginConfig,
}

impl VideoPlayerPlugin {
    pub fn new(host: Arc<dyn PluginHost>, config: PluginConfig) -> Self {
        log::info!("Video player plugin on channel {}", config.method_channel);
        Self {
            host,
            registry: PlayerRegistry::new(),
            config,
        }
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            replay_error_to_late_listener: self.config.replay_error_to_late_listener,
            ignore_callbacks_after_dispose: self.config.ignore_callbacks_after_dispose,
        }
    }

    pub fn on_method_call(&self, call: &MethodCall) -> MethodResponse {
        log::debug!("Method call: {}", call.method);
        let response = MethodResponse::from(self.handle(call));
        if let MethodResponse::Error { code, message } = &response {
            log::error!("{} failed: [{}] {}", call.method, code, message);
        }
        response
    }

    fn handle(&self, call: &MethodCall) -> Result<MethodResponse> {
        match call.method.as_str() {
            "init" => {
                self.registry.reset();
                Ok(MethodResponse::empty())
            }
            "create" => {
                let data_source: String = call.argument("dataSource")?;
                let texture_id = self.registry.create(
                    self.host.as_ref(),
                    |id| self.config.event_channel_name(id),
                    &data_source,
                    self.session_options(),
                )?;
                Ok(MethodResponse::success(json!({ "textureId": texture_id })))
            }
            _ => {
                let texture_id = call.texture_id()?;
                self.registry.dispatch(texture_id, call)
            }
        }
    }

    /// Dispose every session; used when the host detaches the plugin.
    pub fn shutdown(&self) {
        self.registry.reset();
    }
}
