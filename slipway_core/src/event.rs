// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inputs delivered to the controller.
//!
//! Everything asynchronous that can happen to a carousel arrives as an
//! [`Event`] passed to
//! [`SlideController::handle`](crate::controller::SlideController::handle):
//! user input, tween completion, timer expiry and image loads. Events may
//! interleave in any order.

use alloc::string::String;

use crate::backend::{TimerId, TransitionId};

/// Direction of a relative move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the start of the sequence.
    Prev,
    /// Towards the end of the sequence.
    Next,
}

/// Keys the carousel reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Self::ArrowLeft),
            "ArrowRight" | "Right" => Some(Self::ArrowRight),
            _ => None,
        }
    }

    /// Direction this key navigates in.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::ArrowLeft => Direction::Prev,
            Self::ArrowRight => Direction::Next,
        }
    }
}

/// An asynchronous input to the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A previous/next arrow control was clicked.
    ArrowClicked(Direction),
    /// The dot at this 0-based position was clicked.
    DotClicked(usize),
    /// A navigation key was pressed.
    KeyPressed(Key),
    /// The pointer entered the carousel.
    PointerEnter,
    /// The pointer left the carousel.
    PointerLeave,
    /// A scroll tween ran to completion.
    TransitionComplete(TransitionId),
    /// A scheduled autoplay timer fired.
    AutoplayTick(TimerId),
    /// An off-DOM image load succeeded.
    ImageLoaded(String),
    /// An off-DOM image load failed.
    ImageFailed(String),
}
