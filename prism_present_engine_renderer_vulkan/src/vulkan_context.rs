/// VulkanContext - shared GPU handles for the presentation chain
///
/// Contains everything the chain needs from the embedding renderer:
/// - Device for Vulkan API calls
/// - Present queue for submission to the windowing system
/// - Surface/swapchain extension loaders
/// - Device-loss state shared by everything that can observe a lost device
///
/// The chain manager holds this context weakly: the context must not be
/// kept alive by an outstanding chain, and a chain whose context is gone
/// refuses all further operations.

use ash::vk;
use std::sync::atomic::{AtomicBool, Ordering};

use prism_present_engine::prism::{Error, Result};
use prism_present_engine::present_error;

/// Shared GPU context consumed by the Vulkan presentation chain.
///
/// Note: device and instance destruction is handled by the embedding
/// renderer to keep drop ordering in one place; this struct never destroys
/// the handles it was given.
pub struct VulkanContext {
    /// Vulkan logical device
    pub device: ash::Device,

    /// Physical device for surface capability queries
    pub physical_device: vk::PhysicalDevice,

    /// Queue capable of presenting to the windowing system
    pub present_queue: vk::Queue,

    /// Queue family index of the present queue
    pub present_queue_family: u32,

    /// Surface extension loader (capabilities/format/present-mode queries)
    pub surface_loader: ash::khr::surface::Instance,

    /// Swapchain extension loader (chain creation, acquire, present)
    pub swapchain_loader: ash::khr::swapchain::Device,

    /// Vulkan instance (kept for reference, destroyed by the renderer)
    #[allow(dead_code)]
    instance: ash::Instance,

    /// Set once a VK_ERROR_DEVICE_LOST is observed anywhere; never cleared
    device_lost: AtomicBool,
}

impl VulkanContext {
    /// Create a new presentation context
    ///
    /// # Arguments
    ///
    /// * `device` - Vulkan logical device
    /// * `physical_device` - Vulkan physical device
    /// * `instance` - Vulkan instance (used to build the swapchain loader)
    /// * `surface_loader` - Surface extension loader
    /// * `present_queue` - Queue with presentation support for the surface
    /// * `present_queue_family` - Family index of `present_queue`
    pub fn new(
        device: ash::Device,
        physical_device: vk::PhysicalDevice,
        instance: ash::Instance,
        surface_loader: ash::khr::surface::Instance,
        present_queue: vk::Queue,
        present_queue_family: u32,
    ) -> Self {
        let swapchain_loader = ash::khr::swapchain::Device::new(&instance, &device);
        Self {
            device,
            physical_device,
            present_queue,
            present_queue_family,
            surface_loader,
            swapchain_loader,
            instance,
            device_lost: AtomicBool::new(false),
        }
    }

    /// Whether a device loss has been observed
    pub fn is_device_lost(&self) -> bool {
        self.device_lost.load(Ordering::Acquire)
    }

    /// Record a device loss; the state is permanent
    pub fn mark_device_lost(&self) {
        self.device_lost.store(true, Ordering::Release);
    }

    /// Block until all GPU work on this device has completed
    pub fn wait_idle(&self) -> Result<()> {
        unsafe {
            self.device.device_wait_idle().map_err(|e| {
                if e == vk::Result::ERROR_DEVICE_LOST {
                    self.mark_device_lost();
                }
                present_error!("prism::vulkan", "Failed to wait idle: {:?}", e);
                Error::DeviceLost(format!("vkDeviceWaitIdle failed: {:?}", e))
            })
        }
    }
}

impl Drop for VulkanContext {
    fn drop(&mut self) {
        // NOTE: device and instance destruction is handled by the embedding
        // renderer to keep drop ordering in one place. This Drop impl
        // intentionally does nothing.
    }
}
