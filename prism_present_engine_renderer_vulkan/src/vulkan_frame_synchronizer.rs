/// FrameSynchronizer - per-slot pairing of GPU signals and a CPU fence
///
/// One synchronizer exists per frame in flight. The image-available
/// semaphore is signaled by image acquisition and waited on by the
/// driver's render submission; the render-complete semaphore is signaled
/// by that submission and waited on by presentation; the fence is signaled
/// when the submission finishes on the GPU and gates CPU reuse of the
/// slot. Created once per chain, reset and reused round-robin, destroyed
/// with the chain.

use ash::vk;
use std::time::Duration;

use prism_present_engine::prism::{Error, Result};
use prism_present_engine::present_error;

pub struct FrameSynchronizer {
    /// Signaled when the presentation engine releases the acquired image
    pub image_available: vk::Semaphore,

    /// Signaled by the driver's render submission; presentation waits on it
    pub render_complete: vk::Semaphore,

    /// Signaled by the driver's render submission; acquisition waits on it
    /// before reusing the slot. Created signaled so the first pass over
    /// each slot never blocks.
    pub in_flight: vk::Fence,
}

impl FrameSynchronizer {
    /// Create the semaphore pair and pre-signaled fence for one slot
    pub fn new(device: &ash::Device) -> Result<Self> {
        unsafe {
            let semaphore_create_info = vk::SemaphoreCreateInfo::default();

            let image_available = device
                .create_semaphore(&semaphore_create_info, None)
                .map_err(|e| {
                    present_error!("prism::vulkan", "Failed to create image-available semaphore: {:?}", e);
                    Error::InitializationFailed(format!("Failed to create semaphore: {:?}", e))
                })?;

            let render_complete = device
                .create_semaphore(&semaphore_create_info, None)
                .map_err(|e| {
                    device.destroy_semaphore(image_available, None);
                    present_error!("prism::vulkan", "Failed to create render-complete semaphore: {:?}", e);
                    Error::InitializationFailed(format!("Failed to create semaphore: {:?}", e))
                })?;

            let fence_create_info =
                vk::FenceCreateInfo::default().flags(vk::FenceCreateFlags::SIGNALED);

            let in_flight = device
                .create_fence(&fence_create_info, None)
                .map_err(|e| {
                    device.destroy_semaphore(image_available, None);
                    device.destroy_semaphore(render_complete, None);
                    present_error!("prism::vulkan", "Failed to create frame fence: {:?}", e);
                    Error::InitializationFailed(format!("Failed to create fence: {:?}", e))
                })?;

            Ok(Self {
                image_available,
                render_complete,
                in_flight,
            })
        }
    }

    /// Block until the slot's prior GPU work is complete, bounded by `timeout`
    ///
    /// # Errors
    ///
    /// `DeviceLost` when the wait times out or the device is lost - both are
    /// unrecoverable by policy; a hung fence means the render loop must not
    /// keep waiting.
    pub fn wait(&self, device: &ash::Device, timeout: Duration) -> Result<()> {
        unsafe {
            device
                .wait_for_fences(&[self.in_flight], true, timeout.as_nanos() as u64)
                .map_err(|e| match e {
                    vk::Result::TIMEOUT => {
                        present_error!("prism::vulkan", "Frame fence wait exceeded {:?}", timeout);
                        Error::DeviceLost(format!("frame fence wait exceeded {:?}", timeout))
                    }
                    vk::Result::ERROR_DEVICE_LOST => {
                        present_error!("prism::vulkan", "Device lost while waiting on frame fence");
                        Error::DeviceLost("device lost while waiting on frame fence".to_string())
                    }
                    other => {
                        present_error!("prism::vulkan", "Failed to wait on frame fence: {:?}", other);
                        Error::BackendError(format!("vkWaitForFences failed: {:?}", other))
                    }
                })
        }
    }

    /// Unsignal the fence; the slot is committed to a new frame
    pub fn reset(&self, device: &ash::Device) -> Result<()> {
        unsafe {
            device.reset_fences(&[self.in_flight]).map_err(|e| {
                present_error!("prism::vulkan", "Failed to reset frame fence: {:?}", e);
                Error::BackendError(format!("vkResetFences failed: {:?}", e))
            })
        }
    }

    /// Destroy the native synchronization objects
    ///
    /// # Safety
    ///
    /// No GPU work may still reference the semaphores or fence.
    pub unsafe fn destroy(&self, device: &ash::Device) {
        device.destroy_semaphore(self.image_available, None);
        device.destroy_semaphore(self.render_complete, None);
        device.destroy_fence(self.in_flight, None);
    }
}
