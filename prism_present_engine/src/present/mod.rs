/// Present module - all presentation-related types and traits

// Module declarations
pub mod config;
pub mod format;
pub mod transform;
pub mod drawable;
pub mod swapchain;
pub mod mock_swapchain;

// Re-export everything from the leaf modules
pub use config::*;
pub use format::*;
pub use transform::*;
pub use drawable::*;
pub use swapchain::*;
