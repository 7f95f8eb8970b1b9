// KSY media player driven through JNI

use super::host::JniRenderTarget;
use super::vm::with_env;
use super::{register_listener, unregister_listener};
use jni::objects::{GlobalRef, JValue};
use parking_lot::Mutex;
use std::sync::Arc;
use videoplayer_core::{
    AudioContent, RenderTarget, Result, VendorListener, VendorPlayer, VideoPlayerError,
};

/// AudioManager.STREAM_MUSIC
const STREAM_MUSIC: i32 = 3;
/// Build.VERSION_CODES.LOLLIPOP
const SDK_LOLLIPOP: i32 = 21;

pub(crate) struct JniVendorPlayer {
    player: GlobalRef,
    host: GlobalRef,
    listener_id: Mutex<Option<i64>>,
}

impl JniVendorPlayer {
    pub(crate) fn new(player: GlobalRef, host: GlobalRef) -> Self {
        Self {
            player,
            host,
            listener_id: Mutex::new(None),
        }
    }

    fn call_void(&self, name: &str, sig: &str, args: &[JValue]) -> Result<()> {
        with_env(|env| env.call_method(&self.player, name, sig, args)?.v())
    }

    fn call_long(&self, name: &str) -> Result<i64> {
        with_env(|env| env.call_method(&self.player, name, "()J", &[])?.j())
    }

    fn call_int(&self, name: &str) -> Result<i32> {
        with_env(|env| env.call_method(&self.player, name, "()I", &[])?.i())
    }
}

impl VendorPlayer for JniVendorPlayer {
    fn set_surface(&self, target: &dyn RenderTarget) -> Result<()> {
        let target = target
            .as_any()
            .downcast_ref::<JniRenderTarget>()
            .ok_or_else(|| VideoPlayerError::Platform("foreign render target".to_string()))?;

        with_env(|env| {
            let texture = env
                .call_method(
                    target.entry(),
                    "surfaceTexture",
                    "()Landroid/graphics/SurfaceTexture;",
                    &[],
                )?
                .l()?;
            let surface = env.new_object(
                "android/view/Surface",
                "(Landroid/graphics/SurfaceTexture;)V",
                &[JValue::Object(&texture)],
            )?;
            env.call_method(
                &self.player,
                "setSurface",
                "(Landroid/view/Surface;)V",
                &[JValue::Object(&surface)],
            )?
            .v()
        })
    }

    fn set_data_source(&self, data_source: &str) -> Result<()> {
        with_env(|env| {
            let source = env.new_string(data_source)?;
            env.call_method(
                &self.player,
                "setDataSource",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&source)],
            )?
            .v()
        })
    }

    fn set_audio_content(&self, content: AudioContent) -> Result<()> {
        match content {
            AudioContent::Movie => {
                let sdk = with_env(|env| {
                    env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
                        .i()
                })?;
                // Newer platforms route movie audio correctly by default
                if sdk < SDK_LOLLIPOP {
                    self.call_void("setAudioStreamType", "(I)V", &[JValue::Int(STREAM_MUSIC)])?;
                }
                Ok(())
            }
        }
    }

    fn set_listener(&self, listener: Option<Arc<dyn VendorListener>>) -> Result<()> {
        let previous = self.listener_id.lock().take();
        if let Some(id) = previous {
            unregister_listener(id);
        }

        match listener {
            Some(listener) => {
                let id = register_listener(listener);
                *self.listener_id.lock() = Some(id);
                with_env(|env| {
                    env.call_method(
                        &self.host,
                        "bindListener",
                        "(Ljava/lang/Object;J)V",
                        &[JValue::Object(self.player.as_obj()), JValue::Long(id)],
                    )?
                    .v()
                })
            }
            None => with_env(|env| {
                env.call_method(
                    &self.host,
                    "unbindListener",
                    "(Ljava/lang/Object;)V",
                    &[JValue::Object(self.player.as_obj())],
                )?
                .v()
            }),
        }
    }

    fn prepare_async(&self) -> Result<()> {
        self.call_void("prepareAsync", "()V", &[])
    }

    fn start(&self) -> Result<()> {
        self.call_void("start", "()V", &[])
    }

    fn pause(&self) -> Result<()> {
        self.call_void("pause", "()V", &[])
    }

    fn stop(&self) -> Result<()> {
        self.call_void("stop", "()V", &[])
    }

    fn reset(&self) -> Result<()> {
        self.call_void("reset", "()V", &[])
    }

    fn release(&self) -> Result<()> {
        self.call_void("release", "()V", &[])
    }

    fn is_playing(&self) -> Result<bool> {
        with_env(|env| env.call_method(&self.player, "isPlaying", "()Z", &[])?.z())
    }

    fn set_looping(&self, looping: bool) -> Result<()> {
        self.call_void("setLooping", "(Z)V", &[JValue::Bool(u8::from(looping))])
    }

    fn set_volume(&self, left: f32, right: f32) -> Result<()> {
        self.call_void(
            "setVolume",
            "(FF)V",
            &[JValue::Float(left), JValue::Float(right)],
        )
    }

    fn seek_to(&self, position_ms: i64) -> Result<()> {
        self.call_void("seekTo", "(J)V", &[JValue::Long(position_ms)])
    }

    fn current_position(&self) -> Result<i64> {
        self.call_long("getCurrentPosition")
    }

    fn duration(&self) -> Result<i64> {
        self.call_long("getDuration")
    }

    fn video_width(&self) -> Result<i32> {
        self.call_int("getVideoWidth")
    }

    fn video_height(&self) -> Result<i32> {
        self.call_int("getVideoHeight")
    }
}
