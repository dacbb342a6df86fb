// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace sink writing to the browser console.

use alloc::format;
use alloc::string::String;

use slipway_core::trace::{
    AutoplayEvent, CancelEvent, CommitEvent, DestroyEvent, ImageEvent, InitEvent,
    LoopCorrectionEvent, NavigateEvent, StaleEvent, TraceSink, TransitionEvent,
};
use wasm_bindgen::JsValue;

/// A [`TraceSink`] that logs one `console.log` line per event.
///
/// Only useful with the `trace` feature; without it the controller never
/// calls into a sink.
#[derive(Clone, Debug)]
pub struct ConsoleSink {
    prefix: String,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new("slipway")
    }
}

impl ConsoleSink {
    /// Creates a sink whose lines start with `[prefix]`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: String::from(prefix),
        }
    }

    fn log(&self, line: &str) {
        web_sys::console::log_1(&JsValue::from_str(&format!("[{}] {line}", self.prefix)));
    }
}

impl TraceSink for ConsoleSink {
    fn on_init(&mut self, e: &InitEvent) {
        self.log(&format!(
            "{:?} init slides={} width={} loop={} current={}",
            e.at, e.slides, e.total_width, e.looping, e.current
        ));
    }

    fn on_navigate(&mut self, e: &NavigateEvent) {
        self.log(&format!(
            "{:?} navigate {:?} {} -> {}",
            e.at, e.cause, e.from, e.to
        ));
    }

    fn on_transition_start(&mut self, e: &TransitionEvent) {
        self.log(&format!(
            "{:?} tween #{} {} -> {} over {:?}",
            e.at, e.id.0, e.from_offset, e.to_offset, e.duration
        ));
    }

    fn on_transition_cancel(&mut self, e: &CancelEvent) {
        self.log(&format!("{:?} tween #{} cancelled", e.at, e.id.0));
    }

    fn on_commit(&mut self, e: &CommitEvent) {
        self.log(&format!(
            "{:?} commit slide {} at position {} (offset {})",
            e.at, e.slide_index, e.position, e.offset
        ));
    }

    fn on_loop_correction(&mut self, e: &LoopCorrectionEvent) {
        self.log(&format!(
            "{:?} loop {} -> {} (offset {})",
            e.at, e.from, e.to, e.offset
        ));
    }

    fn on_autoplay(&mut self, e: &AutoplayEvent) {
        self.log(&format!("{:?} autoplay {:?}", e.at, e.state));
    }

    fn on_image(&mut self, e: &ImageEvent<'_>) {
        self.log(&format!("{:?} image {:?} {}", e.at, e.phase, e.src));
    }

    fn on_stale(&mut self, e: &StaleEvent) {
        self.log(&format!("{:?} stale {:?}", e.at, e.kind));
    }

    fn on_destroy(&mut self, e: &DestroyEvent) {
        self.log(&format!("{:?} destroy", e.at));
    }
}
