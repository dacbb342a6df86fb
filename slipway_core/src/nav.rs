// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation state and the arrow-disabled rule.

use crate::backend::TransitionId;

/// Tolerance, in CSS pixels, when deciding that the viewport sits at the far
/// end of the strip. Absorbs sub-pixel rounding of scroll offsets.
pub const END_TOLERANCE: f64 = 2.0;

/// Disabled state of the previous/next arrow controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ArrowState {
    /// The previous arrow is disabled.
    pub prev_disabled: bool,
    /// The next arrow is disabled.
    pub next_disabled: bool,
}

impl ArrowState {
    /// Derives arrow state from the scroll position.
    ///
    /// Previous is disabled at offset zero. Next is disabled once the offset
    /// is within [`END_TOLERANCE`] of `total_width - viewport_width`, which
    /// includes every offset when the strip fits inside the viewport.
    #[must_use]
    pub fn from_scroll(offset: f64, total_width: f64, viewport_width: f64) -> Self {
        let max_offset = total_width - viewport_width;
        Self {
            prev_disabled: offset <= 0.0,
            next_disabled: max_offset - offset <= END_TOLERANCE,
        }
    }
}

/// A tween currently driving the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InFlight {
    /// Driver handle; only this handle's completion may commit.
    pub id: TransitionId,
    /// Live-sequence position the tween is heading to.
    pub target: usize,
}

/// Position bookkeeping owned by the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    /// Position of the committed current slide.
    pub current: usize,
    /// The tween in the single in-flight slot, if any.
    pub in_flight: Option<InFlight>,
    /// Set by loop-boundary correction so the commit step keeps the corrected
    /// position instead of the clone it animated to.
    pub pending_current_override: Option<usize>,
}

impl NavState {
    /// Position new relative moves start from: the in-flight target if a
    /// tween is running, otherwise the committed current slide.
    #[must_use]
    pub fn intent(&self) -> usize {
        self.in_flight.map_or(self.current, |f| f.target)
    }
}
