/// Drawable trait - a presentable image handed to the rendering driver

use crate::present::PixelFormat;

/// One acquired presentable image, safe to render into
///
/// Returned by `Swapchain::acquire_next_drawable()`. The rendering driver
/// records and submits its work against the drawable, then drops it;
/// dropping triggers presentation of the wrapped image exactly once.
/// Rendering code never calls present directly.
pub trait Drawable: Send + Sync {
    /// Width of the image in pixels
    fn width(&self) -> u32;

    /// Height of the image in pixels
    fn height(&self) -> u32;

    /// Pixel format of the image
    fn format(&self) -> PixelFormat;

    /// Index of the wrapped image within the chain
    fn image_index(&self) -> u32;
}
