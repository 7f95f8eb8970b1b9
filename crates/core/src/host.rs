// Everything the plugin needs from its embedding host

use crate::channel::EventChannel;
use crate::error::Result;
use crate::texture::TextureRegistry;
use crate::vendor::VendorPlayer;
use std::sync::Arc;

pub trait PluginHost: Send + Sync {
    /// Render-target provider; `None` while no presentation surface exists
    fn textures(&self) -> Option<Arc<dyn TextureRegistry>>;

    /// Open the named event channel
    fn event_channel(&self, name: &str) -> Result<Box<dyn EventChannel>>;

    /// Construct a fresh vendor player instance
    fn new_vendor_player(&self) -> Result<Arc<dyn VendorPlayer>>;
}
