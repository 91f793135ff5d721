/// Drawable - Vulkan implementation of the Drawable trait
///
/// A short-lived wrapper over one acquired swapchain image. The rendering
/// driver records and submits against it, then drops it; Drop issues the
/// present request through a weak back-reference to the chain, so a chain
/// torn down while a drawable is still alive degrades to a logged no-op
/// instead of touching freed handles.

use ash::vk;
use std::sync::{Arc, Weak};

use prism_present_engine::prism::present::{Drawable as PresentDrawable, PixelFormat};
use prism_present_engine::present_warn;

use crate::vulkan_format::pixel_format_from_vk;
use crate::vulkan_swapchain::Swapchain;
use crate::vulkan_swapchain_image::SwapchainImage;

pub struct Drawable {
    image: Arc<SwapchainImage>,
    image_index: u32,
    frame_slot: usize,
    wait_semaphore: vk::Semaphore,
    signal_semaphore: vk::Semaphore,
    submission_fence: vk::Fence,
    swapchain: Weak<Swapchain>,
}

impl Drawable {
    pub(crate) fn new(
        image: Arc<SwapchainImage>,
        image_index: u32,
        frame_slot: usize,
        wait_semaphore: vk::Semaphore,
        signal_semaphore: vk::Semaphore,
        submission_fence: vk::Fence,
        swapchain: Weak<Swapchain>,
    ) -> Self {
        Self {
            image,
            image_index,
            frame_slot,
            wait_semaphore,
            signal_semaphore,
            submission_fence,
            swapchain,
        }
    }

    /// The wrapped presentable image, for render-target setup
    pub fn image(&self) -> &Arc<SwapchainImage> {
        &self.image
    }

    /// Semaphore the driver's submission must wait on (image available)
    pub fn wait_semaphore(&self) -> vk::Semaphore {
        self.wait_semaphore
    }

    /// Semaphore the driver's submission must signal (render complete);
    /// presentation waits on it
    pub fn signal_semaphore(&self) -> vk::Semaphore {
        self.signal_semaphore
    }

    /// Fence the driver's submission must signal; acquisition waits on it
    /// before reusing this drawable's frame slot
    pub fn submission_fence(&self) -> vk::Fence {
        self.submission_fence
    }
}

impl PresentDrawable for Drawable {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn format(&self) -> PixelFormat {
        pixel_format_from_vk(self.image.format)
    }

    fn image_index(&self) -> u32 {
        self.image_index
    }
}

impl Drop for Drawable {
    fn drop(&mut self) {
        match self.swapchain.upgrade() {
            Some(swapchain) => {
                swapchain.present(self.image_index, self.frame_slot);
            }
            None => {
                present_warn!(
                    "prism::vulkan",
                    "Drawable for image {} released after its swapchain was destroyed",
                    self.image_index
                );
            }
        }
    }
}
