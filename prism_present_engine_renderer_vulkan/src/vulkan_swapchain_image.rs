/// SwapchainImage - one presentable image owned by the chain
///
/// Wraps a native image the presentation engine can display, plus the view
/// and metadata a drawable needs. The image itself is owned by the native
/// chain; only the view is created (and later destroyed) here. Images are
/// shared with in-flight drawables via Arc and are never individually
/// recreated - they live and die with their chain.

use ash::vk;

use prism_present_engine::prism::{Error, Result};
use prism_present_engine::present_error;

pub struct SwapchainImage {
    /// Native image, owned by the chain
    pub image: vk::Image,

    /// Color view over the image, for the driver's render-target setup
    pub view: vk::ImageView,

    /// Pixel format the chain was built with
    pub format: vk::Format,

    /// Image dimensions in pixels
    pub extent: vk::Extent2D,
}

impl SwapchainImage {
    /// Wrap a chain image, creating its color view
    pub fn new(
        device: &ash::Device,
        image: vk::Image,
        format: vk::Format,
        extent: vk::Extent2D,
    ) -> Result<Self> {
        unsafe {
            let create_info = vk::ImageViewCreateInfo::default()
                .image(image)
                .view_type(vk::ImageViewType::TYPE_2D)
                .format(format)
                .components(vk::ComponentMapping {
                    r: vk::ComponentSwizzle::IDENTITY,
                    g: vk::ComponentSwizzle::IDENTITY,
                    b: vk::ComponentSwizzle::IDENTITY,
                    a: vk::ComponentSwizzle::IDENTITY,
                })
                .subresource_range(vk::ImageSubresourceRange {
                    aspect_mask: vk::ImageAspectFlags::COLOR,
                    base_mip_level: 0,
                    level_count: 1,
                    base_array_layer: 0,
                    layer_count: 1,
                });

            let view = device.create_image_view(&create_info, None).map_err(|e| {
                present_error!("prism::vulkan", "Failed to create swapchain image view: {:?}", e);
                Error::InitializationFailed(format!("Failed to create image view: {:?}", e))
            })?;

            Ok(Self {
                image,
                view,
                format,
                extent,
            })
        }
    }

    pub fn width(&self) -> u32 {
        self.extent.width
    }

    pub fn height(&self) -> u32 {
        self.extent.height
    }

    /// Destroy the view; the image belongs to the chain
    ///
    /// # Safety
    ///
    /// No GPU work may still reference the view.
    pub unsafe fn destroy_view(&self, device: &ash::Device) {
        device.destroy_image_view(self.view, None);
    }
}
