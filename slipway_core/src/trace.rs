// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the controller.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! controller calls at each step of its lifecycle. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] owns an optional boxed sink. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: Enables the `Tracer` method bodies (one branch per call).

use alloc::boxed::Box;

use crate::autoplay::AutoplayState;
use crate::backend::{TimerId, TransitionId};
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What asked for a navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavCause {
    /// An arrow control was clicked.
    Arrow,
    /// A dot was clicked.
    Dot,
    /// An arrow key was pressed.
    Keyboard,
    /// An autoplay tick fired.
    Autoplay,
    /// Application code called the controller directly.
    Api,
}

/// Outcome stage of a deferred image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImagePhase {
    /// An off-DOM load was started.
    Requested,
    /// The load succeeded and the image was swapped in.
    Loaded,
    /// The load failed; the pending marker stays.
    Failed,
}

/// A callback that arrived too late to act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StaleKind {
    /// Completion of a tween that is no longer in the in-flight slot.
    Transition(TransitionId),
    /// A timer that is no longer the pending autoplay tick.
    Timer(TimerId),
    /// An image outcome nobody asked for.
    Image,
    /// Any event delivered after `destroy()`.
    AfterDestroy,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once initialization has committed the first slide.
#[derive(Clone, Copy, Debug)]
pub struct InitEvent {
    /// Host time.
    pub at: HostTime,
    /// Slides in the live sequence, clones included.
    pub slides: usize,
    /// Width of the whole strip.
    pub total_width: f64,
    /// Whether clone regions were installed.
    pub looping: bool,
    /// Position of the first current slide.
    pub current: usize,
}

/// Emitted when a navigation request resolves to a target.
#[derive(Clone, Copy, Debug)]
pub struct NavigateEvent {
    /// Host time.
    pub at: HostTime,
    /// Source of the request.
    pub cause: NavCause,
    /// Position the move is relative to.
    pub from: usize,
    /// Target position.
    pub to: usize,
}

/// Emitted when a tween is started.
#[derive(Clone, Copy, Debug)]
pub struct TransitionEvent {
    /// Host time.
    pub at: HostTime,
    /// Driver handle.
    pub id: TransitionId,
    /// Scroll offset at start.
    pub from_offset: f64,
    /// Scroll offset at completion.
    pub to_offset: f64,
    /// Tween length.
    pub duration: Duration,
}

/// Emitted when an in-flight tween is cancelled.
#[derive(Clone, Copy, Debug)]
pub struct CancelEvent {
    /// Host time.
    pub at: HostTime,
    /// Driver handle.
    pub id: TransitionId,
}

/// Emitted after a navigation commits.
#[derive(Clone, Copy, Debug)]
pub struct CommitEvent {
    /// Host time.
    pub at: HostTime,
    /// The tween that led here, `None` for the initial commit.
    pub id: Option<TransitionId>,
    /// Position of the new current slide.
    pub position: usize,
    /// 1-based slide index of the new current slide.
    pub slide_index: u32,
    /// Viewport scroll offset after the commit.
    pub offset: f64,
}

/// Emitted when a clone is re-centered onto its original.
#[derive(Clone, Copy, Debug)]
pub struct LoopCorrectionEvent {
    /// Host time.
    pub at: HostTime,
    /// Clone position the tween landed on.
    pub from: usize,
    /// Canonical position jumped to.
    pub to: usize,
    /// Scroll offset after the jump.
    pub offset: f64,
}

/// Emitted on every autoplay state change.
#[derive(Clone, Copy, Debug)]
pub struct AutoplayEvent {
    /// Host time.
    pub at: HostTime,
    /// New state.
    pub state: AutoplayState,
}

/// Emitted for each stage of a deferred image.
#[derive(Clone, Copy, Debug)]
pub struct ImageEvent<'a> {
    /// Host time.
    pub at: HostTime,
    /// Image reference.
    pub src: &'a str,
    /// Stage.
    pub phase: ImagePhase,
}

/// Emitted when a callback is discarded.
#[derive(Clone, Copy, Debug)]
pub struct StaleEvent {
    /// Host time.
    pub at: HostTime,
    /// What was discarded.
    pub kind: StaleKind,
}

/// Emitted when the widget is torn down.
#[derive(Clone, Copy, Debug)]
pub struct DestroyEvent {
    /// Host time.
    pub at: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the controller.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called once initialization completes.
    fn on_init(&mut self, e: &InitEvent) {
        _ = e;
    }

    /// Called when a navigation request resolves.
    fn on_navigate(&mut self, e: &NavigateEvent) {
        _ = e;
    }

    /// Called when a tween starts.
    fn on_transition_start(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called when a tween is cancelled.
    fn on_transition_cancel(&mut self, e: &CancelEvent) {
        _ = e;
    }

    /// Called after each commit.
    fn on_commit(&mut self, e: &CommitEvent) {
        _ = e;
    }

    /// Called on loop-boundary correction.
    fn on_loop_correction(&mut self, e: &LoopCorrectionEvent) {
        _ = e;
    }

    /// Called on autoplay state changes.
    fn on_autoplay(&mut self, e: &AutoplayEvent) {
        _ = e;
    }

    /// Called for deferred image stages.
    fn on_image(&mut self, e: &ImageEvent<'_>) {
        _ = e;
    }

    /// Called when a callback is discarded.
    fn on_stale(&mut self, e: &StaleEvent) {
        _ = e;
    }

    /// Called on teardown.
    fn on_destroy(&mut self, e: &DestroyEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owning wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing and
/// the sink passed to [`new`](Self::new) is dropped immediately.
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::none()
    }
}

macro_rules! dispatch {
    ($(#[$doc:meta])* $name:ident => $method:ident($ty:ty)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$ty) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$method(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {}
        }
    }

    /// Returns `true` if events reach a sink.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    dispatch!(
        /// Emits an [`InitEvent`].
        init => on_init(InitEvent)
    );
    dispatch!(
        /// Emits a [`NavigateEvent`].
        navigate => on_navigate(NavigateEvent)
    );
    dispatch!(
        /// Emits a [`TransitionEvent`].
        transition_start => on_transition_start(TransitionEvent)
    );
    dispatch!(
        /// Emits a [`CancelEvent`].
        transition_cancel => on_transition_cancel(CancelEvent)
    );
    dispatch!(
        /// Emits a [`CommitEvent`].
        commit => on_commit(CommitEvent)
    );
    dispatch!(
        /// Emits a [`LoopCorrectionEvent`].
        loop_correction => on_loop_correction(LoopCorrectionEvent)
    );
    dispatch!(
        /// Emits an [`AutoplayEvent`].
        autoplay => on_autoplay(AutoplayEvent)
    );
    dispatch!(
        /// Emits an [`ImageEvent`].
        image => on_image(ImageEvent<'_>)
    );
    dispatch!(
        /// Emits a [`StaleEvent`].
        stale => on_stale(StaleEvent)
    );
    dispatch!(
        /// Emits a [`DestroyEvent`].
        destroy => on_destroy(DestroyEvent)
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
