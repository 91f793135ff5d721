//! Integration tests for the Vulkan swapchain backend
//!
//! These tests verify the chain lifecycle against a real device: creation,
//! acquire/present cycles, and the teardown path that hands the surface to
//! a replacement chain. The out-of-scope collaborators (instance, device,
//! surface) are built here, in the role of the embedding renderer.
//! All tests require a GPU and are marked with #[ignore].
//!
//! Run with: cargo test --test vulkan_swapchain_tests -- --ignored

use std::sync::Arc;

use ash::vk;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::event_loop::EventLoop;
use winit::window::Window;

use prism_present_engine::prism::present::{
    AcquireResult, Drawable as PresentDrawable, PresentConfig, Swapchain as PresentSwapchain,
    SurfaceTransform,
};
use prism_present_engine::prism::Error;
use prism_present_engine_renderer_vulkan::{VulkanContext, VulkanDrawable, VulkanSwapchain};

/// Helper to create a test window for Vulkan
#[allow(deprecated)]
fn create_test_window() -> (Window, EventLoop<()>) {
    let event_loop = EventLoop::new().unwrap();
    let window_attrs = Window::default_attributes()
        .with_title("Prism Swapchain Test")
        .with_inner_size(winit::dpi::LogicalSize::new(800, 600))
        .with_visible(false); // Hidden window for tests
    let window = event_loop.create_window(window_attrs).unwrap();
    (window, event_loop)
}

/// The embedding renderer's half of the world: instance, device, queue
struct TestGpu {
    context: Arc<VulkanContext>,
    surface: vk::SurfaceKHR,
    device: ash::Device,
    instance: ash::Instance,
}

impl TestGpu {
    /// Destroy the collaborator handles; call after the chain and the
    /// context Arc are gone
    unsafe fn teardown(self) {
        let TestGpu {
            context,
            device,
            instance,
            ..
        } = self;
        drop(context);
        device.destroy_device(None);
        instance.destroy_instance(None);
    }
}

fn create_test_gpu(window: &Window) -> TestGpu {
    unsafe {
        let entry = ash::Entry::load().expect("Vulkan library not found");

        let app_info = vk::ApplicationInfo::default()
            .application_name(c"Prism Swapchain Test")
            .application_version(vk::make_api_version(0, 1, 0, 0))
            .engine_name(c"Prism")
            .engine_version(vk::make_api_version(0, 0, 1, 0))
            .api_version(vk::API_VERSION_1_3);

        let display_handle = window.display_handle().unwrap();
        let extension_names = ash_window::enumerate_required_extensions(display_handle.as_raw())
            .unwrap()
            .to_vec();

        let create_info = vk::InstanceCreateInfo::default()
            .application_info(&app_info)
            .enabled_extension_names(&extension_names);

        let instance = entry.create_instance(&create_info, None).unwrap();

        let window_handle = window.window_handle().unwrap();
        let surface = ash_window::create_surface(
            &entry,
            &instance,
            display_handle.as_raw(),
            window_handle.as_raw(),
            None,
        )
        .unwrap();

        let surface_loader = ash::khr::surface::Instance::new(&entry, &instance);

        // Pick any physical device with a present-capable queue family
        let (physical_device, present_family) = instance
            .enumerate_physical_devices()
            .unwrap()
            .into_iter()
            .find_map(|physical_device| {
                let family_count = instance
                    .get_physical_device_queue_family_properties(physical_device)
                    .len() as u32;
                (0..family_count)
                    .find(|&i| {
                        surface_loader
                            .get_physical_device_surface_support(physical_device, i, surface)
                            .unwrap_or(false)
                    })
                    .map(|i| (physical_device, i))
            })
            .expect("no present-capable GPU found");

        let queue_priorities = [1.0];
        let queue_create_infos = [vk::DeviceQueueCreateInfo::default()
            .queue_family_index(present_family)
            .queue_priorities(&queue_priorities)];

        let device_extension_names = [ash::khr::swapchain::NAME.as_ptr()];

        let device_create_info = vk::DeviceCreateInfo::default()
            .queue_create_infos(&queue_create_infos)
            .enabled_extension_names(&device_extension_names);

        let device = instance
            .create_device(physical_device, &device_create_info, None)
            .unwrap();
        let present_queue = device.get_device_queue(present_family, 0);

        let context = Arc::new(VulkanContext::new(
            device.clone(),
            physical_device,
            instance.clone(),
            surface_loader,
            present_queue,
            present_family,
        ));

        TestGpu {
            context,
            surface,
            device,
            instance,
        }
    }
}

/// Play the rendering driver: an empty submission that waits on the
/// drawable's image-available semaphore and signals its render-complete
/// semaphore and submission fence
fn submit_empty_render(context: &VulkanContext, drawable: &VulkanDrawable) {
    unsafe {
        let wait_semaphores = [drawable.wait_semaphore()];
        let wait_stages = [vk::PipelineStageFlags::TOP_OF_PIPE];
        let signal_semaphores = [drawable.signal_semaphore()];

        let submit_info = vk::SubmitInfo::default()
            .wait_semaphores(&wait_semaphores)
            .wait_dst_stage_mask(&wait_stages)
            .signal_semaphores(&signal_semaphores);

        context
            .device
            .queue_submit(
                context.present_queue,
                &[submit_info],
                drawable.submission_fence(),
            )
            .unwrap();
    }
}

fn acquire_drawable(chain: &Arc<VulkanSwapchain>) -> Box<VulkanDrawable> {
    match chain.acquire_next_drawable().unwrap() {
        AcquireResult::Drawable(drawable) => {
            // The concrete backend type is known in these tests
            let raw = Box::into_raw(drawable) as *mut VulkanDrawable;
            unsafe { Box::from_raw(raw) }
        }
        AcquireResult::OutOfDate => panic!("chain unexpectedly out of date"),
    }
}

// ============================================================================
// CONSTRUCTION TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_vulkan_swapchain_create() {
    let (window, _event_loop) = create_test_window();
    let gpu = create_test_gpu(&window);

    let chain = VulkanSwapchain::new(
        &gpu.context,
        gpu.surface,
        &PresentConfig::default(),
        vk::SwapchainKHR::null(),
        SurfaceTransform::Identity,
    )
    .unwrap();

    assert!(chain.is_valid());
    assert!(chain.image_count() >= 2);
    assert!(chain.width() > 0);
    assert!(chain.height() > 0);
    assert!(chain.context().is_some());

    drop(chain);
    unsafe { gpu.teardown() };
}

// ============================================================================
// ACQUIRE / PRESENT TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_vulkan_acquire_and_present_cycle() {
    let (window, _event_loop) = create_test_window();
    let gpu = create_test_gpu(&window);

    let chain = VulkanSwapchain::new(
        &gpu.context,
        gpu.surface,
        &PresentConfig::default(),
        vk::SwapchainKHR::null(),
        SurfaceTransform::Identity,
    )
    .unwrap();

    let drawable = acquire_drawable(&chain);
    assert!((drawable.image_index() as usize) < chain.image_count());
    assert_eq!(drawable.format(), chain.surface_format());
    assert!(drawable.width() > 0);

    // Drop presents the image; the empty submission stands in for rendering
    submit_empty_render(&gpu.context, &drawable);
    drop(drawable);

    chain.wait_idle().unwrap();
    drop(chain);
    unsafe { gpu.teardown() };
}

#[test]
#[ignore] // Requires GPU
fn test_vulkan_pipelined_frames() {
    let (window, _event_loop) = create_test_window();
    let gpu = create_test_gpu(&window);

    let chain = VulkanSwapchain::new(
        &gpu.context,
        gpu.surface,
        &PresentConfig::default(),
        vk::SwapchainKHR::null(),
        SurfaceTransform::Identity,
    )
    .unwrap();

    let image_count = chain.image_count();

    // More frames than synchronizer slots, so slots are reused and the
    // fence gate is exercised
    for _ in 0..7 {
        let drawable = acquire_drawable(&chain);
        submit_empty_render(&gpu.context, &drawable);
        drop(drawable);
    }

    // Image count never changes without full recreation
    assert_eq!(chain.image_count(), image_count);

    chain.wait_idle().unwrap();
    drop(chain);
    unsafe { gpu.teardown() };
}

// ============================================================================
// TEARDOWN / RECREATION TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_vulkan_destroy_returns_handles_and_blocks_reuse() {
    let (window, _event_loop) = create_test_window();
    let gpu = create_test_gpu(&window);

    let chain = VulkanSwapchain::new(
        &gpu.context,
        gpu.surface,
        &PresentConfig::default(),
        vk::SwapchainKHR::null(),
        SurfaceTransform::Identity,
    )
    .unwrap();

    let (surface, old_chain) = chain.destroy_swapchain().unwrap();
    assert_ne!(surface, vk::SurfaceKHR::null());
    assert_ne!(old_chain, vk::SwapchainKHR::null());
    assert!(!chain.is_valid());

    // The torn-down manager refuses further use
    match chain.acquire_next_drawable() {
        Err(Error::InvalidOperation(_)) => {}
        Err(other) => panic!("expected InvalidOperation, got {:?}", other),
        Ok(_) => panic!("acquire succeeded on a destroyed swapchain"),
    }
    assert!(chain.destroy_swapchain().is_err());

    // The returned handles feed the replacement generation
    let last_transform = chain.last_transform();
    drop(chain);

    let replacement =
        VulkanSwapchain::new(
            &gpu.context,
            surface,
            &PresentConfig::default(),
            old_chain,
            last_transform,
        )
        .unwrap();
    assert!(replacement.is_valid());

    let drawable = acquire_drawable(&replacement);
    submit_empty_render(&gpu.context, &drawable);
    drop(drawable);

    replacement.wait_idle().unwrap();
    drop(replacement);
    unsafe { gpu.teardown() };
}

#[test]
#[ignore] // Requires GPU
fn test_vulkan_drawable_outliving_chain_is_harmless() {
    let (window, _event_loop) = create_test_window();
    let gpu = create_test_gpu(&window);

    let chain = VulkanSwapchain::new(
        &gpu.context,
        gpu.surface,
        &PresentConfig::default(),
        vk::SwapchainKHR::null(),
        SurfaceTransform::Identity,
    )
    .unwrap();

    let drawable = acquire_drawable(&chain);
    submit_empty_render(&gpu.context, &drawable);

    // Tear down while the drawable is still alive; its release must not
    // touch the moved-out handles
    chain.wait_idle().unwrap();
    let (surface, old_chain) = chain.destroy_swapchain().unwrap();
    drop(drawable);
    drop(chain);

    unsafe {
        gpu.context.swapchain_loader.destroy_swapchain(old_chain, None);
        gpu.context.surface_loader.destroy_surface(surface, None);
        gpu.teardown();
    }
}
