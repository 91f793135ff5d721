/*!
# Prism Present Engine

Core traits and types for the Prism presentation engine.

This crate provides the platform-agnostic API for managing a presentable
image chain bound to a native windowing surface. Backend implementations
(Vulkan today) provide concrete types for these traits.

## Architecture

- **Swapchain**: the chain manager trait — acquire drawables, report
  staleness, expose chain metadata
- **Drawable**: a short-lived wrapper over one presentable image; dropping
  it triggers presentation
- **AcquireResult**: two-variant outcome of an acquisition — a drawable or
  an out-of-date signal, never both
- **TransformDebouncer**: the explicit state machine that absorbs
  single-frame surface-rotation flaps
- **PresentConfig**: frames-in-flight and staleness/timeout policy

Backend implementations provide concrete types that implement these traits.
*/

// Internal modules
mod error;
mod presenter;
pub mod log;
pub mod present;

// Main prism namespace module
pub mod prism {
    // Error types
    pub use crate::error::{PrismError as Error, PrismResult as Result};

    // Presenter singleton
    pub use crate::presenter::Presenter;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: present_* macros are NOT re-exported here - they are exported at the crate root
    }

    // Present sub-module with all presentation types
    pub mod present {
        pub use crate::present::*;
    }
}
