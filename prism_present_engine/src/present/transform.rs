/// SurfaceTransform and the transform-change debouncer

/// Orientation of a surface relative to the presentation engine's natural
/// orientation
///
/// Mirrors the transform set native windowing systems report. A chain is
/// built for exactly one of these; when the surface starts reporting a
/// different one, the chain must eventually be recreated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceTransform {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    HorizontalMirror,
    HorizontalMirrorRotate90,
    HorizontalMirrorRotate180,
    HorizontalMirrorRotate270,
    /// The surface inherits its transform from the windowing system
    Inherit,
}

/// Debouncer state, exposed so the staleness policy is auditable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// Last poll matched the transform the chain was built for
    Stable,

    /// A differing transform has been observed on recent consecutive polls
    Pending {
        /// The differing transform being tracked
        candidate: SurfaceTransform,
        /// How many consecutive polls reported it
        polls: usize,
    },

    /// The change is confirmed; the chain is permanently stale
    Confirmed,
}

/// Debounces surface-transform changes across acquisition polls
///
/// Some platforms report spurious single-frame transform flaps during
/// rotation animations. Declaring the chain stale on one differing poll
/// would churn through recreations, so staleness requires the *same*
/// differing transform on `threshold` consecutive polls. Observing the
/// baseline transform again resets the pending count. `Confirmed` is
/// terminal: a confirmed chain can only be recreated, not rehabilitated.
#[derive(Debug, Clone)]
pub struct TransformDebouncer {
    baseline: SurfaceTransform,
    threshold: usize,
    state: DebounceState,
}

impl TransformDebouncer {
    /// Create a debouncer for a chain built with `baseline`
    ///
    /// # Arguments
    ///
    /// * `baseline` - The transform the chain was created for
    /// * `threshold` - Consecutive differing polls required to confirm;
    ///   clamped to at least 1
    pub fn new(baseline: SurfaceTransform, threshold: usize) -> Self {
        Self {
            baseline,
            threshold: threshold.max(1),
            state: DebounceState::Stable,
        }
    }

    /// The transform the chain was built for
    pub fn baseline(&self) -> SurfaceTransform {
        self.baseline
    }

    /// Current debouncer state
    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Whether a transform change has been confirmed
    pub fn is_confirmed(&self) -> bool {
        matches!(self.state, DebounceState::Confirmed)
    }

    /// Feed one observed transform
    ///
    /// # Returns
    ///
    /// `true` once the change is confirmed (and on every poll thereafter)
    pub fn poll(&mut self, observed: SurfaceTransform) -> bool {
        if matches!(self.state, DebounceState::Confirmed) {
            return true;
        }

        if observed == self.baseline {
            self.state = DebounceState::Stable;
            return false;
        }

        let polls = match self.state {
            DebounceState::Pending { candidate, polls } if candidate == observed => polls + 1,
            // First differing poll, or the differing transform itself changed
            _ => 1,
        };

        if polls >= self.threshold {
            self.state = DebounceState::Confirmed;
            true
        } else {
            self.state = DebounceState::Pending {
                candidate: observed,
                polls,
            };
            false
        }
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
