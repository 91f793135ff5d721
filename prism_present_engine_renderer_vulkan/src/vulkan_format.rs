/// Pure conversions between Vulkan enums and engine presentation types

use ash::vk;
use prism_present_engine::prism::present::{PixelFormat, SurfaceTransform};

/// Convert a Vulkan format to the engine PixelFormat
pub fn pixel_format_from_vk(vk_format: vk::Format) -> PixelFormat {
    match vk_format {
        vk::Format::R8G8B8A8_SRGB => PixelFormat::R8G8B8A8_SRGB,
        vk::Format::R8G8B8A8_UNORM => PixelFormat::R8G8B8A8_UNORM,
        vk::Format::B8G8R8A8_SRGB => PixelFormat::B8G8R8A8_SRGB,
        vk::Format::B8G8R8A8_UNORM => PixelFormat::B8G8R8A8_UNORM,
        _ => PixelFormat::R8G8B8A8_SRGB, // Fallback
    }
}

/// Convert an engine PixelFormat to the Vulkan format
pub fn pixel_format_to_vk(format: PixelFormat) -> vk::Format {
    match format {
        PixelFormat::R8G8B8A8_SRGB => vk::Format::R8G8B8A8_SRGB,
        PixelFormat::R8G8B8A8_UNORM => vk::Format::R8G8B8A8_UNORM,
        PixelFormat::B8G8R8A8_SRGB => vk::Format::B8G8R8A8_SRGB,
        PixelFormat::B8G8R8A8_UNORM => vk::Format::B8G8R8A8_UNORM,
    }
}

/// Convert a Vulkan surface transform to the engine SurfaceTransform
///
/// The capability query reports exactly one transform bit; combined or
/// unknown bit patterns fall back to Identity.
pub fn transform_from_vk(transform: vk::SurfaceTransformFlagsKHR) -> SurfaceTransform {
    match transform {
        vk::SurfaceTransformFlagsKHR::IDENTITY => SurfaceTransform::Identity,
        vk::SurfaceTransformFlagsKHR::ROTATE_90 => SurfaceTransform::Rotate90,
        vk::SurfaceTransformFlagsKHR::ROTATE_180 => SurfaceTransform::Rotate180,
        vk::SurfaceTransformFlagsKHR::ROTATE_270 => SurfaceTransform::Rotate270,
        vk::SurfaceTransformFlagsKHR::HORIZONTAL_MIRROR => SurfaceTransform::HorizontalMirror,
        vk::SurfaceTransformFlagsKHR::HORIZONTAL_MIRROR_ROTATE_90 => {
            SurfaceTransform::HorizontalMirrorRotate90
        }
        vk::SurfaceTransformFlagsKHR::HORIZONTAL_MIRROR_ROTATE_180 => {
            SurfaceTransform::HorizontalMirrorRotate180
        }
        vk::SurfaceTransformFlagsKHR::HORIZONTAL_MIRROR_ROTATE_270 => {
            SurfaceTransform::HorizontalMirrorRotate270
        }
        vk::SurfaceTransformFlagsKHR::INHERIT => SurfaceTransform::Inherit,
        _ => SurfaceTransform::Identity,
    }
}

/// Convert an engine SurfaceTransform to the Vulkan transform flag
pub fn transform_to_vk(transform: SurfaceTransform) -> vk::SurfaceTransformFlagsKHR {
    match transform {
        SurfaceTransform::Identity => vk::SurfaceTransformFlagsKHR::IDENTITY,
        SurfaceTransform::Rotate90 => vk::SurfaceTransformFlagsKHR::ROTATE_90,
        SurfaceTransform::Rotate180 => vk::SurfaceTransformFlagsKHR::ROTATE_180,
        SurfaceTransform::Rotate270 => vk::SurfaceTransformFlagsKHR::ROTATE_270,
        SurfaceTransform::HorizontalMirror => vk::SurfaceTransformFlagsKHR::HORIZONTAL_MIRROR,
        SurfaceTransform::HorizontalMirrorRotate90 => {
            vk::SurfaceTransformFlagsKHR::HORIZONTAL_MIRROR_ROTATE_90
        }
        SurfaceTransform::HorizontalMirrorRotate180 => {
            vk::SurfaceTransformFlagsKHR::HORIZONTAL_MIRROR_ROTATE_180
        }
        SurfaceTransform::HorizontalMirrorRotate270 => {
            vk::SurfaceTransformFlagsKHR::HORIZONTAL_MIRROR_ROTATE_270
        }
        SurfaceTransform::Inherit => vk::SurfaceTransformFlagsKHR::INHERIT,
    }
}

#[cfg(test)]
#[path = "vulkan_format_tests.rs"]
mod tests;
