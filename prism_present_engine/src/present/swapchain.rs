/// Swapchain trait - the presentable image chain manager

use crate::error::PrismResult;
use crate::present::{Drawable, PixelFormat, SurfaceTransform};

/// Outcome of one acquisition attempt
///
/// Exactly two variants so the "drawable AND out-of-date" state is not
/// representable. `OutOfDate` means the surface and chain no longer agree
/// (resize, rotation, surface destruction); the caller must abandon this
/// manager and build a replacement before presenting again.
pub enum AcquireResult {
    /// An image safe to render into; dropping it presents
    Drawable(Box<dyn Drawable>),

    /// The chain must be recreated; no image was acquired
    OutOfDate,
}

impl AcquireResult {
    /// Whether this result signals chain recreation
    pub fn is_out_of_date(&self) -> bool {
        matches!(self, AcquireResult::OutOfDate)
    }

    /// Extract the drawable on the success path
    pub fn into_drawable(self) -> Option<Box<dyn Drawable>> {
        match self {
            AcquireResult::Drawable(drawable) => Some(drawable),
            AcquireResult::OutOfDate => None,
        }
    }
}

/// Manager of a presentable image chain bound to one surface generation
///
/// Driven cooperatively by the caller's render loop in strict
/// acquire/render/release alternation; frames pipeline up to the
/// frames-in-flight limit. One instance manages exactly one chain; on
/// `OutOfDate` the caller builds a new instance, optionally transplanting
/// the still-valid native surface.
pub trait Swapchain: Send + Sync {
    /// Whether the chain is usable
    ///
    /// False once the manager has been torn down or its context has gone
    /// away; an invalid manager refuses acquisition.
    fn is_valid(&self) -> bool;

    /// Acquire the next image safe to render into
    ///
    /// # Returns
    ///
    /// `Ok(AcquireResult::Drawable(..))` on success,
    /// `Ok(AcquireResult::OutOfDate)` when the chain must be recreated.
    ///
    /// # Errors
    ///
    /// Fatal conditions only: fence-wait timeout, device loss, or use after
    /// teardown. Transient staleness is never an error.
    fn acquire_next_drawable(&self) -> PrismResult<AcquireResult>;

    /// Pixel format the chain was built with
    fn surface_format(&self) -> PixelFormat;

    /// Transform the chain was built for
    fn last_transform(&self) -> SurfaceTransform;

    /// Number of presentable images in the chain; fixed for its lifetime
    fn image_count(&self) -> usize;
}

#[cfg(test)]
#[path = "swapchain_tests.rs"]
mod tests;
