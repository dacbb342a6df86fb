// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and appends every event to a
//! shared buffer as an owned [`RecordedEvent`]. The sink is cheap to clone;
//! clones share the buffer, so keep one clone and hand the other to the
//! controller:
//!
//! ```
//! use slipway_debug::recorder::RecorderSink;
//!
//! let recorder = RecorderSink::new();
//! let sink = Box::new(recorder.clone());
//! # drop(sink);
//! // ... SlideController::with_sink(host, driver, config, sink) ...
//! assert!(recorder.events().is_empty());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use slipway_core::trace::{
    AutoplayEvent, CancelEvent, CommitEvent, DestroyEvent, ImageEvent, ImagePhase, InitEvent,
    LoopCorrectionEvent, NavigateEvent, StaleEvent, TraceSink, TransitionEvent,
};
use slipway_core::time::HostTime;

/// An owned copy of one trace event.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// See [`TraceSink::on_init`].
    Init(InitEvent),
    /// See [`TraceSink::on_navigate`].
    Navigate(NavigateEvent),
    /// See [`TraceSink::on_transition_start`].
    TransitionStart(TransitionEvent),
    /// See [`TraceSink::on_transition_cancel`].
    TransitionCancel(CancelEvent),
    /// See [`TraceSink::on_commit`].
    Commit(CommitEvent),
    /// See [`TraceSink::on_loop_correction`].
    LoopCorrection(LoopCorrectionEvent),
    /// See [`TraceSink::on_autoplay`].
    Autoplay(AutoplayEvent),
    /// See [`TraceSink::on_image`].
    Image {
        /// Host time.
        at: HostTime,
        /// Image reference.
        src: String,
        /// Stage.
        phase: ImagePhase,
    },
    /// See [`TraceSink::on_stale`].
    Stale(StaleEvent),
    /// See [`TraceSink::on_destroy`].
    Destroy(DestroyEvent),
}

impl RecordedEvent {
    /// Host time the event was emitted at.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::Init(e) => e.at,
            Self::Navigate(e) => e.at,
            Self::TransitionStart(e) => e.at,
            Self::TransitionCancel(e) => e.at,
            Self::Commit(e) => e.at,
            Self::LoopCorrection(e) => e.at,
            Self::Autoplay(e) => e.at,
            Self::Image { at, .. } => *at,
            Self::Stale(e) => e.at,
            Self::Destroy(e) => e.at,
        }
    }
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    events: Rc<RefCell<Vec<RecordedEvent>>>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    /// Number of events recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Drops every recorded event.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: RecordedEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl TraceSink for RecorderSink {
    fn on_init(&mut self, e: &InitEvent) {
        self.push(RecordedEvent::Init(*e));
    }

    fn on_navigate(&mut self, e: &NavigateEvent) {
        self.push(RecordedEvent::Navigate(*e));
    }

    fn on_transition_start(&mut self, e: &TransitionEvent) {
        self.push(RecordedEvent::TransitionStart(*e));
    }

    fn on_transition_cancel(&mut self, e: &CancelEvent) {
        self.push(RecordedEvent::TransitionCancel(*e));
    }

    fn on_commit(&mut self, e: &CommitEvent) {
        self.push(RecordedEvent::Commit(*e));
    }

    fn on_loop_correction(&mut self, e: &LoopCorrectionEvent) {
        self.push(RecordedEvent::LoopCorrection(*e));
    }

    fn on_autoplay(&mut self, e: &AutoplayEvent) {
        self.push(RecordedEvent::Autoplay(*e));
    }

    fn on_image(&mut self, e: &ImageEvent<'_>) {
        self.push(RecordedEvent::Image {
            at: e.at,
            src: e.src.to_owned(),
            phase: e.phase,
        });
    }

    fn on_stale(&mut self, e: &StaleEvent) {
        self.push(RecordedEvent::Stale(*e));
    }

    fn on_destroy(&mut self, e: &DestroyEvent) {
        self.push(RecordedEvent::Destroy(*e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slipway_core::autoplay::AutoplayState;
    use slipway_core::trace::StaleKind;

    #[test]
    fn clones_share_the_buffer() {
        let recorder = RecorderSink::new();
        let mut sink = recorder.clone();
        sink.on_autoplay(&AutoplayEvent {
            at: HostTime(10),
            state: AutoplayState::Running,
        });
        sink.on_image(&ImageEvent {
            at: HostTime(20),
            src: "a.jpg",
            phase: ImagePhase::Requested,
        });

        assert_eq!(recorder.len(), 2);
        let events = recorder.events();
        assert!(matches!(
            events[0],
            RecordedEvent::Autoplay(AutoplayEvent {
                state: AutoplayState::Running,
                ..
            })
        ));
        match &events[1] {
            RecordedEvent::Image { src, phase, .. } => {
                assert_eq!(src, "a.jpg");
                assert_eq!(*phase, ImagePhase::Requested);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(events[1].at(), HostTime(20));
    }

    #[test]
    fn clear_empties_every_clone() {
        let recorder = RecorderSink::new();
        let mut sink = recorder.clone();
        sink.on_stale(&StaleEvent {
            at: HostTime(0),
            kind: StaleKind::AfterDestroy,
        });
        sink.on_destroy(&DestroyEvent { at: HostTime(1) });
        assert!(!recorder.is_empty());
        recorder.clear();
        assert!(sink.events().is_empty());
    }
}
