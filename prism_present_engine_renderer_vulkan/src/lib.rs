/*!
# Prism Present Engine - Vulkan Backend

Vulkan implementation of the Prism presentation traits.

This crate manages a `VkSwapchainKHR` bound to a caller-provided
`VkSurfaceKHR` using the Ash library: fence-gated image acquisition across
multiple frames in flight, debounced surface-transform staleness detection,
presentation triggered by drawable release, and an ownership-transfer
teardown path so a replacement chain can reuse the still-valid surface.

Instance, device and surface construction stay with the embedding renderer;
this crate only consumes their handles through [`VulkanContext`].
*/

// Vulkan implementation modules
mod vulkan_context;
mod vulkan_format;
mod vulkan_frame_synchronizer;
mod vulkan_swapchain_image;
mod vulkan_drawable;
mod vulkan_swapchain;

pub use vulkan_context::VulkanContext;
pub use vulkan_frame_synchronizer::FrameSynchronizer;
pub use vulkan_swapchain_image::SwapchainImage;
pub use vulkan_drawable::Drawable as VulkanDrawable;
pub use vulkan_swapchain::Swapchain as VulkanSwapchain;

// Re-export the pure conversion helpers for embedding renderers
pub use vulkan_format::{
    pixel_format_from_vk, pixel_format_to_vk, transform_from_vk, transform_to_vk,
};
