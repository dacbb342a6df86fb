// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Host times
//! are printed in milliseconds.

use std::io::Write;

use slipway_core::time::HostTime;
use slipway_core::trace::{
    AutoplayEvent, CancelEvent, CommitEvent, DestroyEvent, ImageEvent, ImagePhase, InitEvent,
    LoopCorrectionEvent, NavCause, NavigateEvent, StaleEvent, StaleKind, TraceSink,
    TransitionEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.ticks() as f64 / 1000.0
}

fn cause_name(cause: NavCause) -> &'static str {
    match cause {
        NavCause::Arrow => "arrow",
        NavCause::Dot => "dot",
        NavCause::Keyboard => "key",
        NavCause::Autoplay => "autoplay",
        NavCause::Api => "api",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_init(&mut self, e: &InitEvent) {
        let _ = writeln!(
            self.writer,
            "[init] {:.1}ms slides={} width={:.0}px loop={} current={}",
            ms(e.at),
            e.slides,
            e.total_width,
            e.looping,
            e.current,
        );
    }

    fn on_navigate(&mut self, e: &NavigateEvent) {
        let _ = writeln!(
            self.writer,
            "[nav] {:.1}ms {} {} -> {}",
            ms(e.at),
            cause_name(e.cause),
            e.from,
            e.to,
        );
    }

    fn on_transition_start(&mut self, e: &TransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[tween:start] {:.1}ms #{} {:.1} -> {:.1} over {}ms",
            ms(e.at),
            e.id.0,
            e.from_offset,
            e.to_offset,
            e.duration.as_millis(),
        );
    }

    fn on_transition_cancel(&mut self, e: &CancelEvent) {
        let _ = writeln!(self.writer, "[tween:cancel] {:.1}ms #{}", ms(e.at), e.id.0);
    }

    fn on_commit(&mut self, e: &CommitEvent) {
        let tween = e.id.map_or_else(|| "init".to_owned(), |id| format!("#{}", id.0));
        let _ = writeln!(
            self.writer,
            "[commit] {:.1}ms {tween} slide={} position={} offset={:.1}",
            ms(e.at),
            e.slide_index,
            e.position,
            e.offset,
        );
    }

    fn on_loop_correction(&mut self, e: &LoopCorrectionEvent) {
        let _ = writeln!(
            self.writer,
            "[loop] {:.1}ms {} -> {} offset={:.1}",
            ms(e.at),
            e.from,
            e.to,
            e.offset,
        );
    }

    fn on_autoplay(&mut self, e: &AutoplayEvent) {
        let _ = writeln!(self.writer, "[autoplay] {:.1}ms {:?}", ms(e.at), e.state);
    }

    fn on_image(&mut self, e: &ImageEvent<'_>) {
        let phase = match e.phase {
            ImagePhase::Requested => "requested",
            ImagePhase::Loaded => "loaded",
            ImagePhase::Failed => "FAILED",
        };
        let _ = writeln!(self.writer, "[image] {:.1}ms {phase} {}", ms(e.at), e.src);
    }

    fn on_stale(&mut self, e: &StaleEvent) {
        let what = match e.kind {
            StaleKind::Transition(id) => format!("tween #{}", id.0),
            StaleKind::Timer(id) => format!("timer #{}", id.0),
            StaleKind::Image => "image".to_owned(),
            StaleKind::AfterDestroy => "after destroy".to_owned(),
        };
        let _ = writeln!(self.writer, "[stale] {:.1}ms {what}", ms(e.at));
    }

    fn on_destroy(&mut self, e: &DestroyEvent) {
        let _ = writeln!(self.writer, "[destroy] {:.1}ms", ms(e.at));
    }
}
