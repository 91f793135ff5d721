/// PixelFormat - backend-agnostic surface pixel formats

/// Pixel format of the presentable images in a chain
///
/// Only the formats presentation engines commonly expose for window
/// surfaces are listed; backends map their native format enums onto these.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    R8G8B8A8_UNORM,
    R8G8B8A8_SRGB,
    B8G8R8A8_UNORM,
    B8G8R8A8_SRGB,
}

impl PixelFormat {
    /// Whether the format carries sRGB-encoded color
    pub fn is_srgb(&self) -> bool {
        matches!(self, PixelFormat::R8G8B8A8_SRGB | PixelFormat::B8G8R8A8_SRGB)
    }
}
