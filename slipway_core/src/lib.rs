// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide-position state machine for horizontal carousels.
//!
//! `slipway_core` holds the platform-independent half of a carousel widget:
//! which slide is current, where the viewport should scroll to, when a
//! navigation commits, and how an infinite loop is faked with clones. It is
//! `no_std` compatible (with `alloc`) and never touches a platform API.
//!
//! # Architecture
//!
//! ```text
//!   Backend (DOM listeners, timers, tweens, image loads)
//!       │
//!       ▼
//!   Event ──► SlideController::handle() ──► Host / AnimationDriver calls
//!                      │                              │
//!                      │          ┌───────────────────┘
//!                      ▼          ▼
//!                SlideSequence   Event::TransitionComplete
//!                (positions,          │
//!                 offsets)            ▼
//!                              commit ──► TraceSink
//! ```
//!
//! **[`controller`]**: [`SlideController`](controller::SlideController), the
//! state machine. Owns navigation, autoplay and lazy-load state.
//!
//! **[`slide`]**: The live sequence: originals plus before/after clone
//! regions, with precomputed left offsets.
//!
//! **[`backend`]**: The [`Host`](backend::Host) and
//! [`AnimationDriver`](backend::AnimationDriver) traits that platform
//! backends implement.
//!
//! **[`event`]**: Everything asynchronous arrives as an
//! [`Event`](event::Event).
//!
//! **[`config`]**: Widget options with their defaults.
//!
//! **[`nav`]**, **[`autoplay`]**, **[`lazy`]**: Sub-state owned by the
//! controller.
//!
//! **[`time`]**: Host timestamps and durations.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! controller instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod autoplay;
pub mod backend;
pub mod config;
pub mod controller;
pub mod event;
pub mod lazy;
pub mod nav;
pub mod slide;
pub mod time;
pub mod trace;

#[cfg(test)]
mod testing;
