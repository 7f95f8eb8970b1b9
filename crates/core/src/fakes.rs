// In-memory stand-ins for the host, the vendor player and event channels

use crate::channel::{EventChannel, EventSink, StreamHandler};
use crate::error::{Result, VideoPlayerError};
use crate::event::VideoEvent;
use crate::host::PluginHost;
use crate::texture::{RenderTarget, TextureId, TextureRegistry};
use crate::vendor::{AudioContent, VendorEvent, VendorListener, VendorPlayer};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Barrier};

/// Commands observed by the fake vendor player (queries are not recorded)
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCall {
    SetSurface(TextureId),
    SetDataSource(String),
    SetAudioContent,
    SetListener(bool),
    PrepareAsync,
    Start,
    Pause,
    Stop,
    Reset,
    Release,
    SetLooping(bool),
    SetVolume(f32, f32),
    SeekTo(i64),
}

pub struct FakeVendorPlayer {
    calls: Mutex<Vec<PlayerCall>>,
    listener: Mutex<Option<Arc<dyn VendorListener>>>,
    playing: AtomicBool,
    position: AtomicI64,
    media: Mutex<(i64, i32, i32)>,
    data_source_error: Mutex<Option<String>>,
    start_gate: Mutex<Option<Arc<Barrier>>>,
}

impl FakeVendorPlayer {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            listener: Mutex::new(None),
            playing: AtomicBool::new(false),
            position: AtomicI64::new(0),
            media: Mutex::new((0, 0, 0)),
            data_source_error: Mutex::new(None),
            start_gate: Mutex::new(None),
        }
    }

    fn record(&self, call: PlayerCall) -> Result<()> {
        self.calls.lock().push(call);
        Ok(())
    }

    pub fn calls(&self) -> Vec<PlayerCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn count(&self, call: &PlayerCall) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }

    pub fn fail_data_source(&self, reason: &str) {
        *self.data_source_error.lock() = Some(reason.to_string());
    }

    /// `start` waits on `gate` twice: once on entry, once before returning.
    pub fn hold_start(&self, gate: Arc<Barrier>) {
        *self.start_gate.lock() = Some(gate);
    }

    pub fn set_media(&self, duration_ms: i64, width: i32, height: i32) {
        *self.media.lock() = (duration_ms, width, height);
    }

    pub fn set_position(&self, position_ms: i64) {
        self.position.store(position_ms, Ordering::SeqCst);
    }

    pub fn listener(&self) -> Option<Arc<dyn VendorListener>> {
        self.listener.lock().clone()
    }

    /// Deliver a vendor notification the way the vendor's own thread would.
    /// Returns false when no listener is installed.
    pub fn fire(&self, event: VendorEvent) -> bool {
        match self.listener() {
            Some(listener) => listener.on_vendor_event(event),
            None => false,
        }
    }
}

impl VendorPlayer for FakeVendorPlayer {
    fn set_surface(&self, target: &dyn RenderTarget) -> Result<()> {
        self.record(PlayerCall::SetSurface(target.id()))
    }

    fn set_data_source(&self, data_source: &str) -> Result<()> {
        self.record(PlayerCall::SetDataSource(data_source.to_string()))?;
        match self.data_source_error.lock().clone() {
            Some(reason) => Err(VideoPlayerError::DataSource(reason)),
            None => Ok(()),
        }
    }

    fn set_audio_content(&self, _content: AudioContent) -> Result<()> {
        self.record(PlayerCall::SetAudioContent)
    }

    fn set_listener(&self, listener: Option<Arc<dyn VendorListener>>) -> Result<()> {
        let installed = listener.is_some();
        *self.listener.lock() = listener;
        self.record(PlayerCall::SetListener(installed))
    }

    fn prepare_async(&self) -> Result<()> {
        self.record(PlayerCall::PrepareAsync)
    }

    fn start(&self) -> Result<()> {
        let gate = self.start_gate.lock().clone();
        if let Some(gate) = gate {
            gate.wait();
            gate.wait();
        }
        self.playing.store(true, Ordering::SeqCst);
        self.record(PlayerCall::Start)
    }

    fn pause(&self) -> Result<()> {
        self.playing.store(false, Ordering::SeqCst);
        self.record(PlayerCall::Pause)
    }

    fn stop(&self) -> Result<()> {
        self.playing.store(false, Ordering::SeqCst);
        self.record(PlayerCall::Stop)
    }

    fn reset(&self) -> Result<()> {
        self.record(PlayerCall::Reset)
    }

    fn release(&self) -> Result<()> {
        self.record(PlayerCall::Release)
    }

    fn is_playing(&self) -> Result<bool> {
        Ok(self.playing.load(Ordering::SeqCst))
    }

    fn set_looping(&self, looping: bool) -> Result<()> {
        self.record(PlayerCall::SetLooping(looping))
    }

    fn set_volume(&self, left: f32, right: f32) -> Result<()> {
        self.record(PlayerCall::SetVolume(left, right))
    }

    fn seek_to(&self, position_ms: i64) -> Result<()> {
        self.record(PlayerCall::SeekTo(position_ms))
    }

    fn current_position(&self) -> Result<i64> {
        Ok(self.position.load(Ordering::SeqCst))
    }

    fn duration(&self) -> Result<i64> {
        Ok(self.media.lock().0)
    }

    fn video_width(&self) -> Result<i32> {
        Ok(self.media.lock().1)
    }

    fn video_height(&self) -> Result<i32> {
        Ok(self.media.lock().2)
    }
}

#[derive(Clone)]
pub struct FakeTarget {
    id: TextureId,
    released: Arc<AtomicBool>,
}

impl FakeTarget {
    pub fn new(id: TextureId) -> Self {
        Self {
            id,
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl RenderTarget for FakeTarget {
    fn id(&self) -> TextureId {
        self.id
    }

    fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Hands out sequential texture ids starting at `first_id`
pub struct FakeTextures {
    next_id: AtomicI64,
    created: Mutex<Vec<FakeTarget>>,
}

impl FakeTextures {
    pub fn new(first_id: TextureId) -> Self {
        Self {
            next_id: AtomicI64::new(first_id),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn created(&self) -> Vec<FakeTarget> {
        self.created.lock().clone()
    }
}

impl TextureRegistry for FakeTextures {
    fn create_surface_texture(&self) -> Result<Box<dyn RenderTarget>> {
        let target = FakeTarget::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.created.lock().push(target.clone());
        Ok(Box::new(target))
    }
}

#[derive(Clone)]
pub struct FakeEventChannel {
    name: String,
    handler: Arc<Mutex<Option<Arc<dyn StreamHandler>>>>,
}

impl FakeEventChannel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            handler: Arc::new(Mutex::new(None)),
        }
    }

    pub fn has_handler(&self) -> bool {
        self.handler.lock().is_some()
    }

    /// Simulate the remote side subscribing
    pub fn attach(&self, sink: Arc<dyn EventSink>) {
        let handler = self.handler.lock().clone();
        if let Some(handler) = handler {
            handler.on_listen(sink);
        }
    }

    pub fn detach(&self) {
        let handler = self.handler.lock().clone();
        if let Some(handler) = handler {
            handler.on_cancel();
        }
    }
}

impl EventChannel for FakeEventChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_stream_handler(&self, handler: Option<Arc<dyn StreamHandler>>) {
        *self.handler.lock() = handler;
    }
}

pub struct RecordingSink {
    events: Mutex<Vec<VideoEvent>>,
    errors: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<VideoEvent> {
        self.events.lock().clone()
    }

    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().clone()
    }
}

impl EventSink for RecordingSink {
    fn success(&self, event: &VideoEvent) {
        self.events.lock().push(event.clone());
    }

    fn error(&self, code: &str, message: &str) {
        self.errors.lock().push((code.to_string(), message.to_string()));
    }
}

/// Host with switchable texture availability
pub struct FakeHost {
    textures: Arc<FakeTextures>,
    textures_available: AtomicBool,
    players: Mutex<Vec<Arc<FakeVendorPlayer>>>,
    channels: Mutex<HashMap<String, FakeEventChannel>>,
    fail_next_data_source: Mutex<Option<String>>,
}

impl FakeHost {
    pub fn new(first_texture_id: TextureId) -> Self {
        Self {
            textures: Arc::new(FakeTextures::new(first_texture_id)),
            textures_available: AtomicBool::new(true),
            players: Mutex::new(Vec::new()),
            channels: Mutex::new(HashMap::new()),
            fail_next_data_source: Mutex::new(None),
        }
    }

    pub fn set_textures_available(&self, available: bool) {
        self.textures_available.store(available, Ordering::SeqCst);
    }

    pub fn textures_created(&self) -> Vec<FakeTarget> {
        self.textures.created()
    }

    pub fn players(&self) -> Vec<Arc<FakeVendorPlayer>> {
        self.players.lock().clone()
    }

    pub fn channel(&self, name: &str) -> Option<FakeEventChannel> {
        self.channels.lock().get(name).cloned()
    }

    pub fn fail_next_data_source(&self, reason: &str) {
        *self.fail_next_data_source.lock() = Some(reason.to_string());
    }
}

impl PluginHost for FakeHost {
    fn textures(&self) -> Option<Arc<dyn TextureRegistry>> {
        if self.textures_available.load(Ordering::SeqCst) {
            Some(self.textures.clone() as Arc<dyn TextureRegistry>)
        } else {
            None
        }
    }

    fn event_channel(&self, name: &str) -> Result<Box<dyn EventChannel>> {
        let channel = FakeEventChannel::new(name);
        self.channels
            .lock()
            .insert(name.to_string(), channel.clone());
        Ok(Box::new(channel))
    }

    fn new_vendor_player(&self) -> Result<Arc<dyn VendorPlayer>> {
        let player = Arc::new(FakeVendorPlayer::new());
        if let Some(reason) = self.fail_next_data_source.lock().take() {
            player.fail_data_source(&reason);
        }
        self.players.lock().push(player.clone());
        Ok(player)
    }
}
