// Event-channel plumbing between sessions and the remote listener

use crate::event::VideoEvent;
use std::sync::Arc;

/// The listener currently attached to an event channel.
/// Implementations should be lightweight and non-blocking.
pub trait EventSink: Send + Sync {
    fn success(&self, event: &VideoEvent);

    /// Out-of-band error; the caller treats the stream as unusable afterwards
    fn error(&self, code: &str, message: &str);
}

/// Attach/detach hooks for an event channel
pub trait StreamHandler: Send + Sync {
    fn on_listen(&self, sink: Arc<dyn EventSink>);
    fn on_cancel(&self);
}

/// Named event channel provided by the host
pub trait EventChannel: Send + Sync {
    fn name(&self) -> &str;

    /// Install a handler; `None` detaches the channel
    fn set_stream_handler(&self, handler: Option<Arc<dyn StreamHandler>>);
}
