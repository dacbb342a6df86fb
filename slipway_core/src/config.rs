// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration.
//!
//! [`Config`] is fixed for the lifetime of a
//! [`SlideController`](crate::controller::SlideController). Start from
//! [`Config::new`] (or `Default`) and adjust with the chained `with_*`
//! setters.

use crate::time::Duration;

/// Options recognized by the carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Advance automatically every [`autoplay_interval`](Self::autoplay_interval).
    pub autoplay: bool,
    /// Delay between autoplay advances.
    pub autoplay_interval: Duration,
    /// Length of the scroll tween for one navigation.
    pub transition_duration: Duration,
    /// Wire the previous/next arrow controls.
    pub arrows: bool,
    /// Generate one position dot per original slide.
    pub dots: bool,
    /// Suppress the dots when there is only a single slide.
    pub hide_single_dot: bool,
    /// Wrap around at both ends using clone regions.
    pub loop_enabled: bool,
    /// Defer images marked as pending until their slide is near the current one.
    pub lazy_load: bool,
    /// Pause autoplay while the pointer is over the carousel.
    pub pause_on_hover: bool,
    /// Map the left/right arrow keys to navigation.
    pub keyboard: bool,
    /// 1-based index of the slide shown first.
    pub first_element: u32,
}

impl Config {
    /// Default autoplay interval, in milliseconds.
    pub const DEFAULT_AUTOPLAY_MS: u64 = 3000;
    /// Default transition duration, in milliseconds.
    pub const DEFAULT_TRANSITION_MS: u64 = 200;

    /// Returns the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            autoplay: false,
            autoplay_interval: Duration::from_millis(Self::DEFAULT_AUTOPLAY_MS),
            transition_duration: Duration::from_millis(Self::DEFAULT_TRANSITION_MS),
            arrows: true,
            dots: true,
            hide_single_dot: true,
            loop_enabled: false,
            lazy_load: false,
            pause_on_hover: true,
            keyboard: true,
            first_element: 1,
        }
    }

    /// Sets [`autoplay`](Self::autoplay).
    #[must_use]
    pub const fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Sets [`autoplay_interval`](Self::autoplay_interval).
    #[must_use]
    pub const fn with_autoplay_interval(mut self, interval: Duration) -> Self {
        self.autoplay_interval = interval;
        self
    }

    /// Sets [`transition_duration`](Self::transition_duration).
    #[must_use]
    pub const fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    /// Sets [`arrows`](Self::arrows).
    #[must_use]
    pub const fn with_arrows(mut self, arrows: bool) -> Self {
        self.arrows = arrows;
        self
    }

    /// Sets [`dots`](Self::dots).
    #[must_use]
    pub const fn with_dots(mut self, dots: bool) -> Self {
        self.dots = dots;
        self
    }

    /// Sets [`hide_single_dot`](Self::hide_single_dot).
    #[must_use]
    pub const fn with_hide_single_dot(mut self, hide: bool) -> Self {
        self.hide_single_dot = hide;
        self
    }

    /// Sets [`loop_enabled`](Self::loop_enabled).
    #[must_use]
    pub const fn with_loop(mut self, loop_enabled: bool) -> Self {
        self.loop_enabled = loop_enabled;
        self
    }

    /// Sets [`lazy_load`](Self::lazy_load).
    #[must_use]
    pub const fn with_lazy_load(mut self, lazy_load: bool) -> Self {
        self.lazy_load = lazy_load;
        self
    }

    /// Sets [`pause_on_hover`](Self::pause_on_hover).
    #[must_use]
    pub const fn with_pause_on_hover(mut self, pause: bool) -> Self {
        self.pause_on_hover = pause;
        self
    }

    /// Sets [`keyboard`](Self::keyboard).
    #[must_use]
    pub const fn with_keyboard(mut self, keyboard: bool) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Sets [`first_element`](Self::first_element).
    #[must_use]
    pub const fn with_first_element(mut self, index: u32) -> Self {
        self.first_element = index;
        self
    }

    /// Returns the number of dots to generate for `slide_count` original
    /// slides, or zero when dots are off.
    #[must_use]
    pub const fn dot_count(&self, slide_count: usize) -> usize {
        if !self.dots || slide_count == 0 || (self.hide_single_dot && slide_count == 1) {
            0
        } else {
            slide_count
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
