// Host object, texture registry and event channels behind JNI

use super::player::JniVendorPlayer;
use super::vm::{is_null, with_env};
use super::{register_stream_handler, unregister_stream_handler};
use jni::objects::{GlobalRef, JValue};
use std::sync::Arc;
use videoplayer_core::{
    EventChannel, PluginHost, RenderTarget, Result, StreamHandler, TextureId, TextureRegistry,
    VendorPlayer,
};

/// Wraps the Java-side host object handed to `nativeCreate`.
pub(crate) struct JniHost {
    host: GlobalRef,
}

impl JniHost {
    pub(crate) fn new(host: GlobalRef) -> Self {
        Self { host }
    }
}

impl PluginHost for JniHost {
    fn textures(&self) -> Option<Arc<dyn TextureRegistry>> {
        let registry = with_env(|env| {
            let registry = env
                .call_method(&self.host, "textures", "()Lio/flutter/view/TextureRegistry;", &[])?
                .l()?;
            if is_null(&registry) {
                return Ok(None);
            }
            env.new_global_ref(registry).map(Some)
        });

        match registry {
            Ok(Some(registry)) => Some(Arc::new(JniTextureRegistry { registry })),
            Ok(None) => None,
            Err(e) => {
                log::error!("Failed to query texture registry: {}", e);
                None
            }
        }
    }

    fn event_channel(&self, name: &str) -> Result<Box<dyn EventChannel>> {
        Ok(Box::new(JniEventChannel {
            host: self.host.clone(),
            name: name.to_string(),
        }))
    }

    fn new_vendor_player(&self) -> Result<Arc<dyn VendorPlayer>> {
        let player = with_env(|env| {
            let player = env
                .call_method(&self.host, "newMediaPlayer", "()Ljava/lang/Object;", &[])?
                .l()?;
            env.new_global_ref(player)
        })?;
        Ok(Arc::new(JniVendorPlayer::new(player, self.host.clone())))
    }
}

struct JniTextureRegistry {
    registry: GlobalRef,
}

impl TextureRegistry for JniTextureRegistry {
    fn create_surface_texture(&self) -> Result<Box<dyn RenderTarget>> {
        let (entry, id) = with_env(|env| {
            let entry = env
                .call_method(
                    &self.registry,
                    "createSurfaceTexture",
                    "()Lio/flutter/view/TextureRegistry$SurfaceTextureEntry;",
                    &[],
                )?
                .l()?;
            let id = env.call_method(&entry, "id", "()J", &[])?.j()?;
            Ok((env.new_global_ref(entry)?, id))
        })?;
        log::debug!("Allocated surface texture {}", id);
        Ok(Box::new(JniRenderTarget { entry, id }))
    }
}

/// `TextureRegistry.SurfaceTextureEntry`
pub(crate) struct JniRenderTarget {
    entry: GlobalRef,
    id: TextureId,
}

impl JniRenderTarget {
    pub(crate) fn entry(&self) -> &GlobalRef {
        &self.entry
    }
}

impl RenderTarget for JniRenderTarget {
    fn id(&self) -> TextureId {
        self.id
    }

    fn release(&self) {
        if let Err(e) = with_env(|env| env.call_method(&self.entry, "release", "()V", &[])?.v()) {
            log::error!("Failed to release texture {}: {}", self.id, e);
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Event channel; the Java side forwards listen/cancel back by name.
struct JniEventChannel {
    host: GlobalRef,
    name: String,
}

impl EventChannel for JniEventChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_stream_handler(&self, handler: Option<Arc<dyn StreamHandler>>) {
        let active = handler.is_some();
        match handler {
            Some(handler) => register_stream_handler(&self.name, handler),
            None => unregister_stream_handler(&self.name),
        }

        let result = with_env(|env| {
            let name = env.new_string(&self.name)?;
            env.call_method(
                &self.host,
                "setStreamHandler",
                "(Ljava/lang/String;Z)V",
                &[JValue::Object(&name), JValue::Bool(u8::from(active))],
            )?
            .v()
        });
        if let Err(e) = result {
            log::error!("Failed to update stream handler for {}: {}", self.name, e);
        }
    }
}
