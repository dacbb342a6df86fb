// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! The controller never touches a platform API directly. A backend provides
//! two collaborators:
//!
//! - **[`Host`]**: The DOM adapter. Measures items and the viewport, mutates
//!   the element tree (clones, dots, active flags, arrow state), registers
//!   input listeners, schedules timers and loads images.
//!
//! - **[`AnimationDriver`]**: Tweens the viewport scroll offset towards a
//!   target over a duration and reports completion.
//!
//! # Event delivery
//!
//! Outcomes of asynchronous work (clicks, key presses, hover, timer expiry,
//! tween completion, image loads) are not delivered through callbacks
//! registered with the controller. The backend turns them into
//! [`Event`](crate::event::Event) values and feeds them to
//! [`SlideController::handle`](crate::controller::SlideController::handle).
//!
//! Implementations must never deliver an event synchronously from inside a
//! `Host` or `AnimationDriver` method; the controller is mid-update at that
//! point.
//!
//! # Crate boundaries
//!
//! `slipway_core` owns the data model, the state machine and this contract.
//! Backend crates depend on `slipway_core` and provide platform glue.
//! Application code depends on both and wires them together.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;

use crate::nav::ArrowState;
use crate::slide::Slide;
use crate::time::{Duration, HostTime};

/// Handle to a tween started with [`AnimationDriver::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(pub u64);

/// Handle to a timer scheduled with [`Host::set_timeout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Handle to a listener group registered with [`Host::listen`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Groups of input listeners the controller can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Clicks on the previous/next arrow controls.
    Arrows,
    /// Clicks on the generated dots.
    Dots,
    /// Left/right arrow keys, page-wide, for the lifetime of the widget.
    Keyboard,
    /// Pointer entering and leaving the carousel.
    Hover,
}

/// The DOM adapter.
///
/// Positions passed to and from the host are indices into the live
/// [`SlideSequence`](crate::slide::SlideSequence), clones included.
pub trait Host {
    /// Current time on the host's monotonic clock.
    fn now(&self) -> HostTime;

    /// Outer sizes, margins included, of the original items in document
    /// order. Empty if the host element has no list or no items.
    fn item_sizes(&self) -> Vec<Size>;

    /// Size of the visible scrolling frame.
    fn viewport_size(&self) -> Size;

    /// Current horizontal scroll offset of the viewport.
    fn scroll_offset(&self) -> f64;

    /// Jumps the viewport to `offset` without animating.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Fixes the width of the list element holding the live sequence.
    fn set_list_width(&mut self, width: f64);

    /// Prepends one full copy of the originals as the before region and
    /// appends one as the after region. Clones keep their origin's slide index
    /// and are marked non-canonical.
    fn install_clones(&mut self);

    /// Generates `count` position dots.
    fn create_dots(&mut self, count: usize);

    /// Marks the slide at `position` active and all its siblings inactive.
    fn set_active_slide(&mut self, position: usize);

    /// Marks the 0-based dot active and all other dots inactive.
    fn set_active_dot(&mut self, dot: usize);

    /// Applies the disabled state of the arrow controls.
    fn set_arrows(&mut self, state: ArrowState);

    /// Emits the "slide changed" notification for external subscribers.
    fn slide_changed(&mut self, slide: &Slide, position: usize);

    /// Registers a group of input listeners.
    fn listen(&mut self, kind: ListenerKind) -> ListenerId;

    /// Removes a listener group registered with [`listen`](Self::listen).
    fn unlisten(&mut self, id: ListenerId);

    /// Schedules a one-shot timer. Expiry arrives as
    /// [`Event::AutoplayTick`](crate::event::Event::AutoplayTick).
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancels a timer. Cancelling an expired timer is a no-op.
    fn clear_timeout(&mut self, id: TimerId);

    /// Distinct deferred image references still pending under the slide at
    /// `position`. Elements whose marker was cleared are not reported.
    fn pending_images(&self, position: usize) -> Vec<String>;

    /// Starts loading `src` off-DOM. The outcome arrives as
    /// [`Event::ImageLoaded`](crate::event::Event::ImageLoaded) or
    /// [`Event::ImageFailed`](crate::event::Event::ImageFailed).
    fn load_image(&mut self, src: &str);

    /// Swaps `src` into every element of the sequence (clones included) whose
    /// pending marker references it, then clears those markers.
    fn swap_image(&mut self, src: &str);

    /// Drops references to DOM collections held for the widget.
    fn release(&mut self);
}

/// Tweens the viewport scroll offset.
pub trait AnimationDriver {
    /// Starts a tween from `from` to `to` over `duration` and returns its
    /// handle. Completion arrives as
    /// [`Event::TransitionComplete`](crate::event::Event::TransitionComplete).
    fn start(&mut self, from: f64, to: f64, duration: Duration) -> TransitionId;

    /// Cancels a tween. A cancelled tween never reports completion.
    fn cancel(&mut self, id: TransitionId);
}
