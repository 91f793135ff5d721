/// Swapchain - Vulkan implementation of the presentation chain manager
///
/// Manages one VkSwapchainKHR generation bound to a caller-provided
/// surface, completely separated from rendering logic. Handles fence-gated
/// image acquisition across multiple frames in flight, debounced
/// surface-transform staleness detection, presentation on drawable release,
/// and the ownership-transfer teardown that lets a replacement chain reuse
/// the still-valid surface.
///
/// A chain that has gone out of date is NOT adapted in place: staleness is
/// reported through `AcquireResult::OutOfDate` and the caller builds a new
/// instance, optionally stealing this one's surface and chain handles via
/// `destroy_swapchain()`.

use ash::vk;
use std::mem;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use prism_present_engine::prism::present::{
    AcquireResult, PixelFormat, PresentConfig, Swapchain as PresentSwapchain, SurfaceTransform,
    TransformDebouncer,
};
use prism_present_engine::prism::{Error, Result};
use prism_present_engine::{present_debug, present_err, present_error, present_info, present_warn};

use crate::vulkan_context::VulkanContext;
use crate::vulkan_drawable::Drawable;
use crate::vulkan_format::transform_from_vk;
use crate::vulkan_format::pixel_format_from_vk;
use crate::vulkan_frame_synchronizer::FrameSynchronizer;
use crate::vulkan_swapchain_image::SwapchainImage;

/// Mutable chain state, rotated by the render loop
struct ChainState {
    /// Surface handle; null once moved out by destroy_swapchain()
    surface: vk::SurfaceKHR,
    /// Chain handle; null once moved out by destroy_swapchain()
    swapchain: vk::SwapchainKHR,
    /// Frame slot the next acquisition will reuse
    current_frame: usize,
    /// Debounced transform-change detection
    debouncer: TransformDebouncer,
    /// False once torn down; an invalid chain refuses acquisition
    valid: bool,
}

pub struct Swapchain {
    /// Weakly referenced so an outstanding chain never keeps the context
    /// alive; a dead context makes every operation fail
    context: Weak<VulkanContext>,

    /// Presentable images, shared with in-flight drawables
    images: Vec<Arc<SwapchainImage>>,

    /// One synchronizer per frame in flight, reused round-robin
    synchronizers: Vec<FrameSynchronizer>,

    /// Format the chain was built with
    surface_format: vk::Format,

    /// Image dimensions in pixels
    extent: vk::Extent2D,

    /// Bounded CPU wait on a slot's fence
    fence_wait_timeout: Duration,

    state: Mutex<ChainState>,

    /// Back-reference handed to drawables for their release callback
    self_ref: Weak<Swapchain>,
}

impl Swapchain {
    /// Create a chain for one surface generation
    ///
    /// Takes ownership of `surface` and `old_swapchain`: on success the
    /// surface lives with the new chain and the retired old chain is
    /// destroyed once the new one exists; on failure both are destroyed
    /// before returning, so an `Err` never leaks native handles and never
    /// yields a partially-usable instance.
    ///
    /// # Arguments
    ///
    /// * `context` - Presentation context; held weakly afterwards
    /// * `surface` - Surface to bind, exclusively owned from here on
    /// * `config` - Frames-in-flight and staleness policy
    /// * `old_swapchain` - Retiring chain for zero-downtime recreation, or null
    /// * `last_transform` - Orientation the previous generation was built for
    pub fn new(
        context: &Arc<VulkanContext>,
        surface: vk::SurfaceKHR,
        config: &PresentConfig,
        old_swapchain: vk::SwapchainKHR,
        last_transform: SurfaceTransform,
    ) -> Result<Arc<Self>> {
        // Cleanup for the failure paths; `chain` is whichever chain handle
        // is still owned at that point (old before handoff, new after)
        let destroy_handles = |chain: vk::SwapchainKHR| unsafe {
            if chain != vk::SwapchainKHR::null() {
                context.swapchain_loader.destroy_swapchain(chain, None);
            }
            context.surface_loader.destroy_surface(surface, None);
        };

        if let Err(e) = config.validate() {
            destroy_handles(old_swapchain);
            return Err(e);
        }

        if context.is_device_lost() {
            destroy_handles(old_swapchain);
            present_error!("prism::vulkan", "Refusing to create swapchain on a lost device");
            return Err(Error::DeviceLost("device lost before swapchain creation".to_string()));
        }

        unsafe {
            // Query surface capabilities
            let capabilities = match context
                .surface_loader
                .get_physical_device_surface_capabilities(context.physical_device, surface)
            {
                Ok(capabilities) => capabilities,
                Err(e) => {
                    destroy_handles(old_swapchain);
                    present_error!("prism::vulkan", "Failed to get surface capabilities: {:?}", e);
                    return Err(Error::InitializationFailed(format!(
                        "Failed to get surface capabilities: {:?}",
                        e
                    )));
                }
            };

            // Choose surface format
            let surface_formats = match context
                .surface_loader
                .get_physical_device_surface_formats(context.physical_device, surface)
            {
                Ok(formats) => formats,
                Err(e) => {
                    destroy_handles(old_swapchain);
                    present_error!("prism::vulkan", "Failed to query surface formats: {:?}", e);
                    return Err(Error::InitializationFailed(format!(
                        "Failed to get surface formats: {:?}",
                        e
                    )));
                }
            };

            let Some(surface_format) = surface_formats
                .iter()
                .find(|f| {
                    f.format == vk::Format::B8G8R8A8_SRGB || f.format == vk::Format::R8G8B8A8_SRGB
                })
                .or_else(|| surface_formats.first())
                .copied()
            else {
                destroy_handles(old_swapchain);
                present_error!("prism::vulkan", "Surface reports no pixel formats");
                return Err(Error::InitializationFailed(
                    "surface reports no pixel formats".to_string(),
                ));
            };

            // Choose present mode; FIFO is required by the API and keeps
            // presentation in acquisition order
            let present_mode = match context
                .surface_loader
                .get_physical_device_surface_present_modes(context.physical_device, surface)
            {
                Ok(modes) if modes.contains(&vk::PresentModeKHR::FIFO) => vk::PresentModeKHR::FIFO,
                Ok(modes) => match modes.first() {
                    Some(&mode) => {
                        present_warn!("prism::vulkan", "Surface lacks FIFO, using {:?}", mode);
                        mode
                    }
                    None => {
                        destroy_handles(old_swapchain);
                        present_error!("prism::vulkan", "Surface reports no present modes");
                        return Err(Error::InitializationFailed(
                            "surface reports no present modes".to_string(),
                        ));
                    }
                },
                Err(e) => {
                    destroy_handles(old_swapchain);
                    present_error!("prism::vulkan", "Failed to query present modes: {:?}", e);
                    return Err(Error::InitializationFailed(format!(
                        "Failed to get present modes: {:?}",
                        e
                    )));
                }
            };

            let extent = capabilities.current_extent;
            if extent.width == 0 || extent.height == 0 || extent.width == u32::MAX {
                destroy_handles(old_swapchain);
                present_error!(
                    "prism::vulkan",
                    "Surface has no usable extent: {}x{}",
                    extent.width,
                    extent.height
                );
                return Err(Error::InitializationFailed(format!(
                    "surface has no usable extent: {}x{}",
                    extent.width, extent.height
                )));
            }

            let image_count = capabilities.min_image_count + 1;
            let image_count = if capabilities.max_image_count > 0 {
                image_count.min(capabilities.max_image_count)
            } else {
                image_count
            };

            // The transform the chain is built for becomes the debounce
            // baseline polled against on every acquisition
            let built_transform = capabilities.current_transform;
            let baseline = transform_from_vk(built_transform);
            if baseline != last_transform {
                present_debug!(
                    "prism::vulkan",
                    "Surface transform changed across recreation: {:?} -> {:?}",
                    last_transform,
                    baseline
                );
            }

            // Create swapchain, chaining the retiring one for zero-downtime
            // recreation
            let swapchain_create_info = vk::SwapchainCreateInfoKHR::default()
                .surface(surface)
                .min_image_count(image_count)
                .image_format(surface_format.format)
                .image_color_space(surface_format.color_space)
                .image_extent(extent)
                .image_array_layers(1)
                .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT | vk::ImageUsageFlags::TRANSFER_DST)
                .image_sharing_mode(vk::SharingMode::EXCLUSIVE)
                .pre_transform(built_transform)
                .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
                .present_mode(present_mode)
                .clipped(true)
                .old_swapchain(old_swapchain);

            let swapchain = match context
                .swapchain_loader
                .create_swapchain(&swapchain_create_info, None)
            {
                Ok(swapchain) => swapchain,
                Err(e) => {
                    destroy_handles(old_swapchain);
                    present_error!("prism::vulkan", "Failed to create swapchain: {:?}", e);
                    return Err(Error::InitializationFailed(format!(
                        "Failed to create swapchain: {:?}",
                        e
                    )));
                }
            };

            // The new chain exists; the retired one can go
            if old_swapchain != vk::SwapchainKHR::null() {
                context.swapchain_loader.destroy_swapchain(old_swapchain, None);
            }

            // Wrap the chain images
            let native_images = match context.swapchain_loader.get_swapchain_images(swapchain) {
                Ok(images) => images,
                Err(e) => {
                    destroy_handles(swapchain);
                    present_error!("prism::vulkan", "Failed to get swapchain images: {:?}", e);
                    return Err(Error::InitializationFailed(format!(
                        "Failed to get swapchain images: {:?}",
                        e
                    )));
                }
            };

            if native_images.is_empty() {
                destroy_handles(swapchain);
                present_error!("prism::vulkan", "Swapchain returned zero images");
                return Err(Error::InitializationFailed(
                    "swapchain returned zero images".to_string(),
                ));
            }

            let mut images = Vec::with_capacity(native_images.len());
            for &native_image in &native_images {
                match SwapchainImage::new(&context.device, native_image, surface_format.format, extent)
                {
                    Ok(image) => images.push(Arc::new(image)),
                    Err(e) => {
                        for image in &images {
                            image.destroy_view(&context.device);
                        }
                        destroy_handles(swapchain);
                        return Err(e);
                    }
                }
            }

            // One synchronizer per frame in flight
            let mut synchronizers = Vec::with_capacity(config.frames_in_flight);
            for _ in 0..config.frames_in_flight {
                match FrameSynchronizer::new(&context.device) {
                    Ok(synchronizer) => synchronizers.push(synchronizer),
                    Err(e) => {
                        for synchronizer in &synchronizers {
                            synchronizer.destroy(&context.device);
                        }
                        for image in &images {
                            image.destroy_view(&context.device);
                        }
                        destroy_handles(swapchain);
                        return Err(e);
                    }
                }
            }

            present_info!(
                "prism::vulkan",
                "Swapchain created: {} images, {:?}, {}x{}, {} frames in flight",
                images.len(),
                surface_format.format,
                extent.width,
                extent.height,
                synchronizers.len()
            );

            Ok(Arc::new_cyclic(|weak| Self {
                context: Arc::downgrade(context),
                images,
                synchronizers,
                surface_format: surface_format.format,
                extent,
                fence_wait_timeout: config.fence_wait_timeout,
                state: Mutex::new(ChainState {
                    surface,
                    swapchain,
                    current_frame: 0,
                    debouncer: TransformDebouncer::new(
                        baseline,
                        config.transform_debounce_threshold,
                    ),
                    valid: true,
                }),
                self_ref: weak.clone(),
            }))
        }
    }

    /// The presentation context, while it is still alive
    pub fn context(&self) -> Option<Arc<VulkanContext>> {
        self.context.upgrade()
    }

    pub fn width(&self) -> u32 {
        self.extent.width
    }

    pub fn height(&self) -> u32 {
        self.extent.height
    }

    /// Block until all GPU work referencing this chain's resources has
    /// completed; call immediately before teardown
    pub fn wait_idle(&self) -> Result<()> {
        let context = self.live_context()?;
        context.wait_idle()
    }

    /// Tear the chain down, returning ownership of the surface and chain
    /// handles without destroying them
    ///
    /// The destructor is suppressed for those two handles only; the
    /// synchronizers and image views still die with the manager. After this
    /// call the manager is permanently invalid: every subsequent acquire or
    /// present is rejected without touching the moved-out handles. The
    /// returned pair feeds the next generation's constructor, which reuses
    /// the surface (avoiding a surface-recreation flicker) and retires the
    /// stale chain.
    pub fn destroy_swapchain(&self) -> Result<(vk::SurfaceKHR, vk::SwapchainKHR)> {
        self.wait_idle()?;

        let mut state = self.lock_state()?;
        if !state.valid {
            return Err(Error::InvalidOperation(
                "destroy_swapchain on an already-destroyed swapchain".to_string(),
            ));
        }
        state.valid = false;

        let surface = mem::replace(&mut state.surface, vk::SurfaceKHR::null());
        let swapchain = mem::replace(&mut state.swapchain, vk::SwapchainKHR::null());

        present_info!("prism::vulkan", "Swapchain destroyed, surface handed back for reuse");
        Ok((surface, swapchain))
    }

    /// Present request issued by a drawable being dropped
    ///
    /// Never called by rendering code directly. Waits on the render-complete
    /// semaphore of the synchronizer that acquired the image. Out-of-date or
    /// suboptimal results here are advisory: the frame was already rendered
    /// and the next acquisition will detect the staleness, so they must not
    /// fail an otherwise-valid frame.
    pub(crate) fn present(&self, image_index: u32, frame_slot: usize) -> bool {
        let Some(context) = self.context.upgrade() else {
            present_warn!("prism::vulkan", "Present skipped: context is gone");
            return false;
        };

        let swapchain = {
            let Ok(state) = self.state.lock() else {
                present_error!("prism::vulkan", "Present skipped: state lock poisoned");
                return false;
            };
            if !state.valid {
                present_warn!("prism::vulkan", "Present skipped: swapchain already destroyed");
                return false;
            }
            state.swapchain
        };

        if image_index as usize >= self.images.len() {
            present_error!(
                "prism::vulkan",
                "Present rejected: image index {} out of range (count: {})",
                image_index,
                self.images.len()
            );
            return false;
        }
        if frame_slot >= self.synchronizers.len() {
            present_error!(
                "prism::vulkan",
                "Present rejected: frame slot {} out of range (count: {})",
                frame_slot,
                self.synchronizers.len()
            );
            return false;
        }

        unsafe {
            let swapchains = [swapchain];
            let image_indices = [image_index];
            let wait_semaphores = [self.synchronizers[frame_slot].render_complete];

            let present_info = vk::PresentInfoKHR::default()
                .wait_semaphores(&wait_semaphores)
                .swapchains(&swapchains)
                .image_indices(&image_indices);

            match context
                .swapchain_loader
                .queue_present(context.present_queue, &present_info)
            {
                Ok(false) => true,
                Ok(true) => {
                    // SUBOPTIMAL_KHR: advisory, the next acquire corrects it
                    present_debug!("prism::vulkan", "Present reported a suboptimal swapchain");
                    true
                }
                Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                    present_debug!("prism::vulkan", "Present reported an out-of-date swapchain");
                    true
                }
                Err(vk::Result::ERROR_DEVICE_LOST) => {
                    context.mark_device_lost();
                    present_error!("prism::vulkan", "Device lost during present");
                    false
                }
                Err(e) => {
                    present_error!("prism::vulkan", "Failed to present swapchain image: {:?}", e);
                    false
                }
            }
        }
    }

    fn live_context(&self) -> Result<Arc<VulkanContext>> {
        match self.context.upgrade() {
            Some(context) if !context.is_device_lost() => Ok(context),
            Some(_) => Err(Error::DeviceLost("device lost".to_string())),
            None => {
                present_error!("prism::vulkan", "Presentation context is gone");
                Err(Error::DeviceLost("presentation context is gone".to_string()))
            }
        }
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, ChainState>> {
        self.state
            .lock()
            .map_err(|_| Error::BackendError("swapchain state lock poisoned".to_string()))
    }
}

impl PresentSwapchain for Swapchain {
    fn is_valid(&self) -> bool {
        self.state.lock().map(|state| state.valid).unwrap_or(false)
    }

    fn acquire_next_drawable(&self) -> Result<AcquireResult> {
        let context = self.live_context()?;

        let (frame_slot, surface, swapchain) = {
            let state = self.lock_state()?;
            if !state.valid {
                return Err(Error::InvalidOperation(
                    "acquire on a destroyed swapchain".to_string(),
                ));
            }
            (state.current_frame, state.surface, state.swapchain)
        };
        let synchronizer = &self.synchronizers[frame_slot];

        // Gate on the slot's fence so the CPU never runs more than
        // frames-in-flight ahead of the GPU. This is the one intentional
        // CPU stall in the loop; a timeout here means a hung device.
        if let Err(e) = synchronizer.wait(&context.device, self.fence_wait_timeout) {
            if matches!(e, Error::DeviceLost(_)) {
                context.mark_device_lost();
            }
            return Err(e);
        }

        // Debounced transform poll. A surface that no longer answers
        // capability queries is treated as stale, not fatal: the caller
        // recreates the chain against whatever surface replaces it.
        let observed = unsafe {
            match context
                .surface_loader
                .get_physical_device_surface_capabilities(context.physical_device, surface)
            {
                Ok(capabilities) => transform_from_vk(capabilities.current_transform),
                Err(e) => {
                    present_warn!(
                        "prism::vulkan",
                        "Surface capability poll failed ({:?}), treating chain as out of date",
                        e
                    );
                    return Ok(AcquireResult::OutOfDate);
                }
            }
        };
        {
            let mut state = self.lock_state()?;
            if state.debouncer.poll(observed) {
                present_info!(
                    "prism::vulkan",
                    "Surface transform change confirmed ({:?}), chain is out of date",
                    observed
                );
                return Ok(AcquireResult::OutOfDate);
            }
        }

        // Ask the presentation engine for the next image
        let acquired = unsafe {
            context.swapchain_loader.acquire_next_image(
                swapchain,
                u64::MAX,
                synchronizer.image_available,
                vk::Fence::null(),
            )
        };

        let image_index = match acquired {
            Ok((index, false)) => index,
            Ok((_, true)) => {
                // SUBOPTIMAL_KHR still delivers an image, but the chain no
                // longer matches the surface; recreate before rendering
                present_debug!("prism::vulkan", "Acquire reported a suboptimal swapchain");
                return Ok(AcquireResult::OutOfDate);
            }
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                present_debug!("prism::vulkan", "Swapchain out of date during acquire");
                return Ok(AcquireResult::OutOfDate);
            }
            Err(vk::Result::ERROR_DEVICE_LOST) => {
                context.mark_device_lost();
                present_error!("prism::vulkan", "Device lost during acquire");
                return Err(Error::DeviceLost("device lost during acquire".to_string()));
            }
            Err(e) => {
                // Absorbed: recreating the chain is safe, propagating a hard
                // error through the render loop is not
                present_warn!(
                    "prism::vulkan",
                    "Acquire failed ({:?}), treating chain as out of date",
                    e
                );
                return Ok(AcquireResult::OutOfDate);
            }
        };

        let Some(image) = self.images.get(image_index as usize) else {
            return Err(present_err!(
                "prism::vulkan",
                "Acquire returned image index {} out of range (count: {})",
                image_index,
                self.images.len()
            ));
        };

        // The slot is committed to a new frame: unsignal its fence (the
        // driver's submission re-signals it) and rotate to the next slot
        synchronizer.reset(&context.device)?;

        let drawable = Drawable::new(
            image.clone(),
            image_index,
            frame_slot,
            synchronizer.image_available,
            synchronizer.render_complete,
            synchronizer.in_flight,
            self.self_ref.clone(),
        );

        {
            let mut state = self.lock_state()?;
            state.current_frame = (frame_slot + 1) % self.synchronizers.len();
        }

        Ok(AcquireResult::Drawable(Box::new(drawable)))
    }

    fn surface_format(&self) -> PixelFormat {
        pixel_format_from_vk(self.surface_format)
    }

    fn last_transform(&self) -> SurfaceTransform {
        self.state
            .lock()
            .map(|state| state.debouncer.baseline())
            .unwrap_or(SurfaceTransform::Identity)
    }

    fn image_count(&self) -> usize {
        self.images.len()
    }
}

impl Drop for Swapchain {
    fn drop(&mut self) {
        let Some(context) = self.context.upgrade() else {
            present_warn!(
                "prism::vulkan",
                "Swapchain dropped after its context; native handles cannot be released"
            );
            return;
        };

        unsafe {
            // Nothing referencing the chain may still be in flight
            context.device.device_wait_idle().ok();

            for synchronizer in &self.synchronizers {
                synchronizer.destroy(&context.device);
            }

            for image in &self.images {
                image.destroy_view(&context.device);
            }

            // Skipped for handles moved out by destroy_swapchain()
            if let Ok(state) = self.state.get_mut() {
                if state.swapchain != vk::SwapchainKHR::null() {
                    context.swapchain_loader.destroy_swapchain(state.swapchain, None);
                }
                if state.surface != vk::SurfaceKHR::null() {
                    context.surface_loader.destroy_surface(state.surface, None);
                }
            }
        }
    }
}
