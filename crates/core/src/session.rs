// One vendor player bound to one render target and one event channel

use crate::channel::{EventChannel, EventSink, StreamHandler};
use crate::error::{Result, VideoPlayerError};
use crate::event::VideoEvent;
use crate::method::{MethodResponse, PlayerCommand};
use crate::texture::{RenderTarget, TextureId};
use crate::vendor::{AudioContent, VendorEvent, VendorListener, VendorPlayer};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Session behaviour switches derived from `PluginConfig`
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub replay_error_to_late_listener: bool,
    pub ignore_callbacks_after_dispose: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            replay_error_to_late_listener: true,
            ignore_callbacks_after_dispose: true,
        }
    }
}

/// Who is listening, and what they have already been told.
#[derive(Default)]
struct Delivery {
    sink: Option<Arc<dyn EventSink>>,
    /// `initialized` went out to the current sink
    announced: bool,
    /// Last error raised while no listener was attached
    pending_error: Option<String>,
}

/// State shared between the command thread, the channel's attach/detach
/// hooks and vendor callback threads.
struct SessionShared {
    texture_id: TextureId,
    player: Arc<dyn VendorPlayer>,
    options: SessionOptions,
    /// Set once the vendor finished preparing; never cleared
    initialized: AtomicBool,
    disposed: AtomicBool,
    /// Decisions are made under this lock, sinks are called outside it.
    delivery: Mutex<Delivery>,
}

impl SessionShared {
    fn current_sink(&self) -> Option<Arc<dyn EventSink>> {
        self.delivery.lock().sink.clone()
    }

    fn emit(&self, event: VideoEvent) {
        match self.current_sink() {
            Some(sink) => sink.success(&event),
            None => log::debug!("[{}] no listener, dropping {:?}", self.texture_id, event),
        }
    }

    /// Emit `initialized` once per attached listener, as soon as preparation
    /// completed and a listener is attached.
    fn send_initialized(&self) {
        let sink = {
            let mut delivery = self.delivery.lock();
            if delivery.announced || !self.initialized.load(Ordering::SeqCst) {
                return;
            }
            let Some(sink) = delivery.sink.clone() else {
                return;
            };
            delivery.announced = true;
            sink
        };

        match self.media_info() {
            Ok(event) => {
                log::info!("[{}] initialized: {:?}", self.texture_id, event);
                sink.success(&event);
            }
            Err(e) => {
                log::error!("[{}] failed to query media info: {}", self.texture_id, e);
                let mut delivery = self.delivery.lock();
                if delivery.sink.as_ref().is_some_and(|s| Arc::ptr_eq(s, &sink)) {
                    delivery.announced = false;
                }
            }
        }
    }

    fn media_info(&self) -> Result<VideoEvent> {
        Ok(VideoEvent::Initialized {
            duration: self.player.duration()?,
            width: self.player.video_width()?,
            height: self.player.video_height()?,
        })
    }

    fn send_error(&self, err: &VideoPlayerError) {
        let message = err.to_string();
        let sink = {
            let mut delivery = self.delivery.lock();
            match delivery.sink.clone() {
                Some(sink) => sink,
                None if self.options.replay_error_to_late_listener => {
                    log::warn!("[{}] {} (held for next listener)", self.texture_id, message);
                    delivery.pending_error = Some(message);
                    return;
                }
                None => {
                    log::warn!("[{}] {} (no listener, dropped)", self.texture_id, message);
                    return;
                }
            }
        };
        sink.error(err.code(), &message);
    }
}

impl VendorListener for SessionShared {
    fn on_vendor_event(&self, event: VendorEvent) -> bool {
        if self.options.ignore_callbacks_after_dispose && self.disposed.load(Ordering::SeqCst) {
            log::debug!("[{}] ignoring {:?} after dispose", self.texture_id, event);
            return true;
        }

        match event {
            VendorEvent::Prepared => {
                self.initialized.store(true, Ordering::SeqCst);
                self.send_initialized();
            }
            VendorEvent::BufferingUpdate { percent } => {
                if self.current_sink().is_none() {
                    return true;
                }
                match self.player.duration() {
                    Ok(duration) => self.emit(VideoEvent::buffering(percent, duration)),
                    Err(e) => log::warn!("[{}] buffering update dropped: {}", self.texture_id, e),
                }
            }
            VendorEvent::Completion => self.emit(VideoEvent::Completed),
            VendorEvent::Error { what, extra } => {
                self.send_error(&VideoPlayerError::Decode { what, extra });
            }
        }
        true
    }
}

impl StreamHandler for SessionShared {
    fn on_listen(&self, sink: Arc<dyn EventSink>) {
        log::debug!("[{}] listener attached", self.texture_id);
        let pending = {
            let mut delivery = self.delivery.lock();
            delivery.sink = Some(sink.clone());
            delivery.announced = false;
            delivery.pending_error.take()
        };

        if let Some(message) = pending {
            sink.error("VideoError", &message);
        }
        self.send_initialized();
    }

    fn on_cancel(&self) {
        log::debug!("[{}] listener detached", self.texture_id);
        let mut delivery = self.delivery.lock();
        delivery.sink = None;
        delivery.announced = false;
    }
}

/// A live player session, owned by the registry.
pub struct VideoPlayer {
    shared: Arc<SessionShared>,
    target: Box<dyn RenderTarget>,
    channel: Box<dyn EventChannel>,
}

impl VideoPlayer {
    /// Build a session and start preparing `data_source`.
    ///
    /// Returns as soon as preparation has been kicked off; readiness is
    /// reported later through the `initialized` event. A data-source failure
    /// tears everything down again and is returned to the caller.
    pub fn new(
        target: Box<dyn RenderTarget>,
        channel: Box<dyn EventChannel>,
        player: Arc<dyn VendorPlayer>,
        data_source: &str,
        options: SessionOptions,
    ) -> Result<Self> {
        let texture_id = target.id();
        log::info!(
            "[{}] creating session on {} for {}",
            texture_id,
            channel.name(),
            data_source
        );

        let shared = Arc::new(SessionShared {
            texture_id,
            player,
            options,
            initialized: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
            delivery: Mutex::new(Delivery::default()),
        });
        channel.set_stream_handler(Some(shared.clone() as Arc<dyn StreamHandler>));

        let session = Self {
            shared,
            target,
            channel,
        };
        if let Err(e) = session.start(data_source) {
            log::error!("[{}] setup failed: {}", texture_id, e);
            session.teardown();
            return Err(e);
        }
        Ok(session)
    }

    fn start(&self, data_source: &str) -> Result<()> {
        let player = &self.shared.player;
        player.set_surface(self.target.as_ref())?;
        player.set_data_source(data_source)?;

        if let Err(e) = player.set_audio_content(AudioContent::Movie) {
            log::warn!("[{}] audio routing not applied: {}", self.texture_id(), e);
        }

        player.set_listener(Some(self.shared.clone() as Arc<dyn VendorListener>))?;
        player.prepare_async()
    }

    pub fn texture_id(&self) -> TextureId {
        self.shared.texture_id
    }

    pub fn is_initialized(&self) -> bool {
        self.shared.initialized.load(Ordering::SeqCst)
    }

    /// Execute a per-session command.
    /// `Dispose` only tears the session down; removal is the registry's job.
    pub fn execute(&self, command: &PlayerCommand) -> Result<MethodResponse> {
        log::debug!("[{}] {:?}", self.texture_id(), command);
        match *command {
            PlayerCommand::SetLooping(looping) => self.set_looping(looping)?,
            PlayerCommand::SetVolume(volume) => self.set_volume(volume)?,
            PlayerCommand::Play => self.play()?,
            PlayerCommand::Pause => self.pause()?,
            PlayerCommand::SeekTo(location) => self.seek_to(location)?,
            PlayerCommand::Position => {
                return Ok(MethodResponse::success(Value::from(self.position()?)));
            }
            PlayerCommand::Dispose => self.dispose(),
        }
        Ok(MethodResponse::empty())
    }

    pub fn play(&self) -> Result<()> {
        if !self.shared.player.is_playing()? {
            self.shared.player.start()?;
        }
        Ok(())
    }

    pub fn pause(&self) -> Result<()> {
        if self.shared.player.is_playing()? {
            self.shared.player.pause()?;
        }
        Ok(())
    }

    pub fn set_looping(&self, looping: bool) -> Result<()> {
        self.shared.player.set_looping(looping)
    }

    /// Volume is clamped to 0.0 - 1.0 and applied to both channels.
    pub fn set_volume(&self, volume: f64) -> Result<()> {
        let level = clamp_volume(volume);
        self.shared.player.set_volume(level, level)
    }

    pub fn seek_to(&self, location_ms: i32) -> Result<()> {
        self.shared.player.seek_to(i64::from(location_ms))
    }

    pub fn position(&self) -> Result<i64> {
        self.shared.player.current_position()
    }

    /// Stop, reset and release the vendor player, release the render target
    /// and detach the event channel. Call once per session.
    pub fn dispose(&self) {
        log::info!("[{}] disposing", self.texture_id());
        self.shared.disposed.store(true, Ordering::SeqCst);

        match self.shared.player.is_playing() {
            Ok(true) => {
                if let Err(e) = self.shared.player.stop() {
                    log::warn!("[{}] stop failed: {}", self.texture_id(), e);
                }
            }
            Ok(false) => {}
            Err(e) => log::warn!("[{}] is_playing failed: {}", self.texture_id(), e),
        }
        if let Err(e) = self.shared.player.reset() {
            log::warn!("[{}] reset failed: {}", self.texture_id(), e);
        }
        self.teardown();
    }

    fn teardown(&self) {
        let player = &self.shared.player;
        if let Err(e) = player.set_listener(None) {
            log::warn!("[{}] failed to detach vendor listener: {}", self.texture_id(), e);
        }
        if let Err(e) = player.release() {
            log::warn!("[{}] release failed: {}", self.texture_id(), e);
        }
        self.target.release();
        self.channel.set_stream_handler(None);
        let mut delivery = self.shared.delivery.lock();
        delivery.sink = None;
        delivery.announced = false;
    }
}

/// `max(0, min(1, v))`; NaN maps to silence.
pub fn clamp_volume(volume: f64) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0) as f32
}
