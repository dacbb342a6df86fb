// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplay state machine.
//!
//! ```text
//!            play()                pause() / pointer enter
//!   Stopped ───────► Running ◄───────────────────────────► Paused
//!      ▲                │          play() / pointer leave     │
//!      └────────────────┴──────────── stop() ────────────────┘
//! ```
//!
//! [`Autoplay`] only tracks state and the pending timer handle; the controller
//! talks to the host.

use crate::backend::TimerId;

/// Observable autoplay state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AutoplayState {
    /// No tick is scheduled and none will be.
    #[default]
    Stopped,
    /// A forward tick is scheduled.
    Running,
    /// Temporarily halted; resumable.
    Paused,
}

/// Why autoplay is paused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PauseCause {
    /// Paused through the public API.
    Explicit,
    /// Paused because the pointer is over the carousel.
    Hover,
}

/// Autoplay bookkeeping.
#[derive(Clone, Copy, Debug, Default)]
pub struct Autoplay {
    state: AutoplayState,
    timer: Option<TimerId>,
    cause: Option<PauseCause>,
}

impl Autoplay {
    /// Current state.
    #[must_use]
    pub fn state(&self) -> AutoplayState {
        self.state
    }

    /// Cause of the current pause, if paused.
    #[must_use]
    pub fn pause_cause(&self) -> Option<PauseCause> {
        self.cause
    }

    /// Records that `timer` is the pending tick and enters `Running`.
    pub fn scheduled(&mut self, timer: TimerId) {
        self.state = AutoplayState::Running;
        self.timer = Some(timer);
        self.cause = None;
    }

    /// Consumes a fired tick. Returns `false` for ticks that are not the
    /// pending one (cancelled or superseded), which must be ignored.
    pub fn take_tick(&mut self, timer: TimerId) -> bool {
        if self.state == AutoplayState::Running && self.timer == Some(timer) {
            self.timer = None;
            true
        } else {
            false
        }
    }

    /// Enters `Paused` from `Running` and returns the timer to cancel.
    ///
    /// An explicit pause overrides a hover pause, so leaving the carousel
    /// afterwards does not resume.
    pub fn pause(&mut self, cause: PauseCause) -> Option<TimerId> {
        match self.state {
            AutoplayState::Running => {
                self.state = AutoplayState::Paused;
                self.cause = Some(cause);
                self.timer.take()
            }
            AutoplayState::Paused if cause == PauseCause::Explicit => {
                self.cause = Some(cause);
                None
            }
            _ => None,
        }
    }

    /// Returns `true` if a pointer leave should resume playback.
    #[must_use]
    pub fn resumes_on_leave(&self) -> bool {
        self.state == AutoplayState::Paused && self.cause == Some(PauseCause::Hover)
    }

    /// Enters `Stopped` unconditionally and returns the timer to cancel.
    pub fn stop(&mut self) -> Option<TimerId> {
        self.state = AutoplayState::Stopped;
        self.cause = None;
        self.timer.take()
    }
}
