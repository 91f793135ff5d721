/// Mock Swapchain for unit tests (no GPU required)
///
/// This mock mirrors the acquire/present state machine of a real backend
/// chain — round-robin frame slots gated by simulated fences, a transform
/// debouncer fed from a scripted surface, drawables that present on drop —
/// so the lifecycle properties can be tested without a GPU or a window.

#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::sync::{Arc, Condvar, Mutex, Weak};
#[cfg(test)]
use std::time::Duration;

#[cfg(test)]
use crate::error::{PrismError, PrismResult};
#[cfg(test)]
use crate::present::{
    AcquireResult, Drawable, PixelFormat, PresentConfig, SurfaceTransform, Swapchain,
    TransformDebouncer,
};

// ============================================================================
// Mock Frame Synchronizer
// ============================================================================

/// Simulated fence for one frame slot
///
/// Starts signaled, like a native fence created pre-signaled so the first
/// pass over each slot never blocks. The test plays the role of the GPU by
/// calling `signal()`.
#[cfg(test)]
pub struct MockFrameSynchronizer {
    signaled: Mutex<bool>,
    cond: Condvar,
}

#[cfg(test)]
impl MockFrameSynchronizer {
    pub fn new() -> Self {
        Self {
            signaled: Mutex::new(true),
            cond: Condvar::new(),
        }
    }

    /// Block until signaled, bounded by `timeout`
    pub fn wait(&self, timeout: Duration) -> PrismResult<()> {
        let signaled = self.signaled.lock().unwrap();
        let (signaled, result) = self
            .cond
            .wait_timeout_while(signaled, timeout, |s| !*s)
            .unwrap();
        drop(signaled);
        if result.timed_out() {
            return Err(PrismError::DeviceLost(format!(
                "frame fence wait exceeded {:?}",
                timeout
            )));
        }
        Ok(())
    }

    /// Unsignal the fence; the slot is in flight again
    pub fn reset(&self) {
        *self.signaled.lock().unwrap() = false;
    }

    /// Simulate GPU completion of the slot's work
    pub fn signal(&self) {
        *self.signaled.lock().unwrap() = true;
        self.cond.notify_all();
    }
}

// ============================================================================
// Mock Swapchain
// ============================================================================

#[cfg(test)]
struct MockChainState {
    current_frame: usize,
    next_image: u32,
    acquired: usize,
    valid: bool,
    /// Image indices in the order present requests were issued
    presented: Vec<u32>,
}

#[cfg(test)]
pub struct MockSwapchain {
    image_count: usize,
    format: PixelFormat,
    fence_wait_timeout: Duration,
    synchronizers: Vec<MockFrameSynchronizer>,
    debouncer: Mutex<TransformDebouncer>,
    /// Scripted surface: each acquisition polls the next entry; when the
    /// script runs dry the surface keeps reporting the baseline
    transform_feed: Mutex<VecDeque<SurfaceTransform>>,
    state: Mutex<MockChainState>,
    self_ref: Weak<MockSwapchain>,
}

#[cfg(test)]
impl MockSwapchain {
    pub fn new(
        config: &PresentConfig,
        image_count: usize,
        baseline: SurfaceTransform,
    ) -> Arc<Self> {
        let synchronizers = (0..config.frames_in_flight)
            .map(|_| MockFrameSynchronizer::new())
            .collect();

        Arc::new_cyclic(|weak| Self {
            image_count,
            format: PixelFormat::B8G8R8A8_SRGB,
            fence_wait_timeout: config.fence_wait_timeout,
            synchronizers,
            debouncer: Mutex::new(TransformDebouncer::new(
                baseline,
                config.transform_debounce_threshold,
            )),
            transform_feed: Mutex::new(VecDeque::new()),
            state: Mutex::new(MockChainState {
                current_frame: 0,
                next_image: 0,
                acquired: 0,
                valid: true,
                presented: Vec::new(),
            }),
            self_ref: weak.clone(),
        })
    }

    /// Script the transforms the fake surface will report, one per poll
    pub fn feed_transforms(&self, transforms: &[SurfaceTransform]) {
        self.transform_feed.lock().unwrap().extend(transforms);
    }

    /// Simulate the GPU finishing the work submitted against a frame slot
    pub fn complete_frame(&self, frame_slot: usize) {
        self.synchronizers[frame_slot].signal();
    }

    /// Tear the chain down; mirrors a backend's destroy/handle-transfer path
    pub fn destroy(&self) {
        self.state.lock().unwrap().valid = false;
    }

    pub fn synchronizer_count(&self) -> usize {
        self.synchronizers.len()
    }

    pub fn current_frame(&self) -> usize {
        self.state.lock().unwrap().current_frame
    }

    pub fn acquired_count(&self) -> usize {
        self.state.lock().unwrap().acquired
    }

    /// Image indices presented so far, in present-request order
    pub fn presented(&self) -> Vec<u32> {
        self.state.lock().unwrap().presented.clone()
    }

    fn next_transform(&self) -> SurfaceTransform {
        let mut feed = self.transform_feed.lock().unwrap();
        feed.pop_front()
            .unwrap_or_else(|| self.debouncer.lock().unwrap().baseline())
    }

    /// Present request issued by a drawable being dropped
    ///
    /// Returns a success boolean like the real present path; an index
    /// outside the chain is rejected without being recorded.
    pub fn present(&self, image_index: u32, _frame_slot: usize) -> bool {
        let mut state = self.state.lock().unwrap();
        if !state.valid {
            return false;
        }
        if image_index as usize >= self.image_count {
            return false;
        }
        state.presented.push(image_index);
        true
    }
}

#[cfg(test)]
impl Swapchain for MockSwapchain {
    fn is_valid(&self) -> bool {
        self.state.lock().unwrap().valid
    }

    fn acquire_next_drawable(&self) -> PrismResult<AcquireResult> {
        // Select the frame slot being reused
        let frame_slot = {
            let state = self.state.lock().unwrap();
            if !state.valid {
                return Err(PrismError::InvalidOperation(
                    "acquire on a destroyed swapchain".to_string(),
                ));
            }
            state.current_frame
        };

        // Gate on the slot's fence; the lock is NOT held while blocking
        self.synchronizers[frame_slot].wait(self.fence_wait_timeout)?;

        // Debounced transform poll
        let observed = self.next_transform();
        if self.debouncer.lock().unwrap().poll(observed) {
            return Ok(AcquireResult::OutOfDate);
        }

        let mut state = self.state.lock().unwrap();
        if !state.valid {
            return Err(PrismError::InvalidOperation(
                "swapchain destroyed during acquisition".to_string(),
            ));
        }

        // The slot is committed to a new frame now; unsignal its fence
        self.synchronizers[frame_slot].reset();

        let image_index = state.next_image;
        state.next_image = (state.next_image + 1) % self.image_count as u32;
        state.acquired += 1;
        state.current_frame = (state.current_frame + 1) % self.synchronizers.len();
        drop(state);

        Ok(AcquireResult::Drawable(Box::new(MockDrawable {
            width: 800,
            height: 600,
            format: self.format,
            image_index,
            frame_slot,
            swapchain: self.self_ref.clone(),
        })))
    }

    fn surface_format(&self) -> PixelFormat {
        self.format
    }

    fn last_transform(&self) -> SurfaceTransform {
        self.debouncer.lock().unwrap().baseline()
    }

    fn image_count(&self) -> usize {
        self.image_count
    }
}

// ============================================================================
// Mock Drawable
// ============================================================================

#[cfg(test)]
pub struct MockDrawable {
    width: u32,
    height: u32,
    format: PixelFormat,
    image_index: u32,
    frame_slot: usize,
    swapchain: Weak<MockSwapchain>,
}

#[cfg(test)]
impl Drawable for MockDrawable {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    fn image_index(&self) -> u32 {
        self.image_index
    }
}

#[cfg(test)]
impl Drop for MockDrawable {
    fn drop(&mut self) {
        if let Some(swapchain) = self.swapchain.upgrade() {
            swapchain.present(self.image_index, self.frame_slot);
        }
    }
}

#[cfg(test)]
#[path = "mock_swapchain_tests.rs"]
mod tests;
