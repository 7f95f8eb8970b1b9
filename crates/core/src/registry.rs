// Handle -> session table with explicit reset and per-session teardown

use crate::error::{Result, VideoPlayerError};
use crate::host::PluginHost;
use crate::method::{MethodCall, MethodResponse, PlayerCommand};
use crate::session::{SessionOptions, VideoPlayer};
use crate::texture::{RenderTarget, TextureId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Owns every live session. Handles are allocated by the texture registry,
/// never by this table. Sessions still registered on drop are disposed.
pub struct PlayerRegistry {
    players: Mutex<HashMap<TextureId, Arc<VideoPlayer>>>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.players.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.lock().is_empty()
    }

    pub fn contains(&self, texture_id: TextureId) -> bool {
        self.players.lock().contains_key(&texture_id)
    }

    /// Dispose every session and clear the table.
    pub fn reset(&self) {
        let drained: Vec<Arc<VideoPlayer>> = {
            let mut players = self.players.lock();
            players.drain().map(|(_, player)| player).collect()
        };
        log::info!("Resetting registry ({} sessions)", drained.len());
        for player in drained {
            player.dispose();
        }
    }

    /// Allocate a render target, build a session on it and register it.
    ///
    /// Fails with `Unavailable` before allocating anything when the host has
    /// no render-target provider.
    pub fn create(
        &self,
        host: &dyn PluginHost,
        channel_name: impl Fn(TextureId) -> String,
        data_source: &str,
        options: SessionOptions,
    ) -> Result<TextureId> {
        let textures = host.textures().ok_or(VideoPlayerError::Unavailable)?;
        let target = textures.create_surface_texture()?;
        let texture_id = target.id();

        let parts = host
            .event_channel(&channel_name(texture_id))
            .and_then(|channel| host.new_vendor_player().map(|player| (channel, player)));
        let (channel, player) = match parts {
            Ok(parts) => parts,
            Err(e) => {
                release_target(target.as_ref());
                return Err(e);
            }
        };

        let session = VideoPlayer::new(target, channel, player, data_source, options)?;
        let replaced = self.players.lock().insert(texture_id, Arc::new(session));
        debug_assert!(replaced.is_none(), "texture id {} handed out twice", texture_id);
        if let Some(stale) = replaced {
            log::error!("Texture id {} reused, disposing the previous session", texture_id);
            stale.dispose();
        }
        log::info!("Video player created with texture id: {}", texture_id);
        Ok(texture_id)
    }

    /// Route a per-session call. Unknown handles fail before the method name
    /// is looked at.
    pub fn dispatch(&self, texture_id: TextureId, call: &MethodCall) -> Result<MethodResponse> {
        // The table lock is not held while the vendor player runs
        let player = self
            .players
            .lock()
            .get(&texture_id)
            .cloned()
            .ok_or(VideoPlayerError::UnknownTextureId(texture_id))?;
        let Some(command) = PlayerCommand::from_call(call)? else {
            log::warn!("Method not implemented: {}", call.method);
            return Ok(MethodResponse::NotImplemented);
        };

        if command == PlayerCommand::Dispose {
            self.dispose(texture_id);
            return Ok(MethodResponse::empty());
        }
        player.execute(&command)
    }

    /// Tear down and remove one session. Missing handles are ignored.
    pub fn dispose(&self, texture_id: TextureId) {
        let removed = self.players.lock().remove(&texture_id);
        match removed {
            Some(player) => player.dispose(),
            None => log::debug!("dispose: no session for texture id {}", texture_id),
        }
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PlayerRegistry {
    fn drop(&mut self) {
        if !self.players.get_mut().is_empty() {
            self.reset();
        }
    }
}

fn release_target(target: &dyn RenderTarget) {
    log::debug!("Releasing unused texture {}", target.id());
    target.release();
}
