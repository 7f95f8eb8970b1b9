// Render targets allocated by the host's texture registry

use crate::error::Result;

/// Opaque handle identifying a render target and its session
pub type TextureId = i64;

/// A surface the vendor player writes decoded frames to
pub trait RenderTarget: Send + Sync {
    /// Identifier assigned by the texture registry
    fn id(&self) -> TextureId;

    /// Give the surface back to the host
    fn release(&self);

    /// Downcast to concrete type (for the platform player binding)
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Allocator of render targets
pub trait TextureRegistry: Send + Sync {
    fn create_surface_texture(&self) -> Result<Box<dyn RenderTarget>>;
}
