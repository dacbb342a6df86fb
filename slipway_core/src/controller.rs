// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slide-position state machine.
//!
//! [`SlideController`] owns every piece of carousel state and drives a
//! [`Host`] and an [`AnimationDriver`]. Its lifecycle:
//!
//! ```text
//!   new() ── measure, clone, wire listeners, commit first slide
//!     │
//!     ▼
//!   handle(Event) ── navigation request ──► AnimationDriver::start
//!     ▲                                          │
//!     └──────── Event::TransitionComplete ◄──────┘
//!                    │
//!                    ▼
//!               commit: active flags, dot, loop correction,
//!                       current slide, arrows, notify, lazy load
//!     │
//!     ▼
//!   destroy() ── cancel tween and timer, unlisten, release
//! ```
//!
//! # Races
//!
//! There is one in-flight slot. Starting a tween cancels the one in the slot,
//! and a completion only commits if its handle matches the slot. Completions
//! of superseded tweens are discarded even if a driver delivers them anyway.
//! After [`destroy`](SlideController::destroy), every event is discarded.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::autoplay::{Autoplay, AutoplayState, PauseCause};
use crate::backend::{AnimationDriver, Host, ListenerId, ListenerKind, TimerId, TransitionId};
use crate::config::Config;
use crate::event::{Direction, Event};
use crate::lazy::LazyImages;
use crate::nav::{ArrowState, InFlight, NavState};
use crate::slide::{Slide, SlideSequence};
use crate::time::HostTime;
use crate::trace::{
    AutoplayEvent, CancelEvent, CommitEvent, DestroyEvent, ImageEvent, ImagePhase, InitEvent,
    LoopCorrectionEvent, NavCause, NavigateEvent, StaleEvent, StaleKind, TraceSink, Tracer,
    TransitionEvent,
};

/// Carousel state machine.
///
/// Construct with [`new`](Self::new), feed backend events through
/// [`handle`](Self::handle), and tear down with [`destroy`](Self::destroy).
pub struct SlideController<H, A> {
    host: H,
    driver: A,
    config: Config,
    sequence: SlideSequence,
    nav: NavState,
    arrows: ArrowState,
    autoplay: Autoplay,
    images: LazyImages,
    listeners: Vec<ListenerId>,
    dot_count: usize,
    destroyed: bool,
    tracer: Tracer,
}

impl<H, A> core::fmt::Debug for SlideController<H, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SlideController")
            .field("config", &self.config)
            .field("slides", &self.sequence.len())
            .field("nav", &self.nav)
            .field("arrows", &self.arrows)
            .field("autoplay", &self.autoplay.state())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl<H: Host, A: AnimationDriver> SlideController<H, A> {
    /// Initializes a carousel over the items the host exposes.
    ///
    /// A host with no items yields a zero-width carousel on which every
    /// navigation is a no-op.
    #[must_use]
    pub fn new(host: H, driver: A, config: Config) -> Self {
        Self::with_tracer(host, driver, config, Tracer::none())
    }

    /// Like [`new`](Self::new), reporting to `sink` from the first event on.
    #[must_use]
    pub fn with_sink(host: H, driver: A, config: Config, sink: Box<dyn TraceSink>) -> Self {
        Self::with_tracer(host, driver, config, Tracer::new(sink))
    }

    fn with_tracer(mut host: H, driver: A, config: Config, tracer: Tracer) -> Self {
        let widths: Vec<f64> = host.item_sizes().iter().map(|s| s.width).collect();
        let sequence = SlideSequence::new(&widths, config.loop_enabled);

        host.set_list_width(sequence.total_width());
        if sequence.is_looping() {
            host.install_clones();
        }

        let dot_count = config.dot_count(sequence.original_len());
        let mut this = Self {
            host,
            driver,
            config,
            sequence,
            nav: NavState::default(),
            arrows: ArrowState::default(),
            autoplay: Autoplay::default(),
            images: LazyImages::default(),
            listeners: Vec::new(),
            dot_count,
            destroyed: false,
            tracer,
        };

        if this.sequence.is_empty() {
            this.sync_arrows();
            this.trace_init();
            return this;
        }

        if this.config.arrows {
            this.listen(ListenerKind::Arrows);
            this.sync_arrows();
        }
        if this.dot_count > 0 {
            this.host.create_dots(this.dot_count);
            this.listen(ListenerKind::Dots);
        }

        let first = this
            .sequence
            .canonical_position(this.config.first_element)
            .unwrap_or_else(|| this.sequence.originals_start());
        this.nav.current = first;
        this.commit(first, None);

        if this.config.autoplay {
            this.play();
            if this.config.pause_on_hover {
                this.listen(ListenerKind::Hover);
            }
        }
        if this.config.keyboard {
            this.listen(ListenerKind::Keyboard);
        }

        this.trace_init();
        this
    }

    // -- Accessors --

    /// The configuration this carousel was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The live slide sequence. Empty after [`destroy`](Self::destroy).
    #[must_use]
    pub fn sequence(&self) -> &SlideSequence {
        &self.sequence
    }

    /// Position of the committed current slide.
    #[must_use]
    pub fn current_position(&self) -> usize {
        self.nav.current
    }

    /// The committed current slide.
    #[must_use]
    pub fn current(&self) -> Option<&Slide> {
        self.sequence.get(self.nav.current)
    }

    /// Width of the whole strip, clone regions included.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.sequence.total_width()
    }

    /// The tween occupying the in-flight slot, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<InFlight> {
        self.nav.in_flight
    }

    /// Arrow state as last applied.
    #[must_use]
    pub fn arrows(&self) -> ArrowState {
        self.arrows
    }

    /// Number of generated dots.
    #[must_use]
    pub fn dot_count(&self) -> usize {
        self.dot_count
    }

    /// Autoplay state.
    #[must_use]
    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    /// Returns `true` once [`destroy`](Self::destroy) has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The animation driver.
    #[must_use]
    pub fn driver(&self) -> &A {
        &self.driver
    }

    /// Replaces the trace sink.
    pub fn set_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.tracer = Tracer::new(sink);
    }

    // -- Event entry point --

    /// Processes one backend event.
    pub fn handle(&mut self, event: Event) {
        if self.destroyed {
            self.trace_stale(StaleKind::AfterDestroy);
            return;
        }
        match event {
            Event::ArrowClicked(direction) => {
                if self.config.arrows {
                    self.move_by(direction, NavCause::Arrow);
                }
            }
            Event::DotClicked(dot) => {
                if dot < self.dot_count
                    && let Ok(index) = u32::try_from(dot + 1)
                {
                    self.move_to_index(index, NavCause::Dot);
                }
            }
            Event::KeyPressed(key) => {
                if self.config.keyboard {
                    self.move_by(key.direction(), NavCause::Keyboard);
                }
            }
            Event::PointerEnter => {
                if self.config.pause_on_hover {
                    self.pause_with(PauseCause::Hover);
                }
            }
            Event::PointerLeave => {
                if self.config.pause_on_hover && self.autoplay.resumes_on_leave() {
                    self.schedule_tick();
                }
            }
            Event::TransitionComplete(id) => self.transition_complete(id),
            Event::AutoplayTick(timer) => self.autoplay_tick(timer),
            Event::ImageLoaded(src) => self.image_finished(&src, true),
            Event::ImageFailed(src) => self.image_finished(&src, false),
        }
    }

    // -- Navigation --

    /// Moves one slide in `direction`.
    ///
    /// Relative to the in-flight target if a tween is running, otherwise to
    /// the current slide. A no-op at a non-looping boundary.
    pub fn request_directional_move(&mut self, direction: Direction) {
        self.move_by(direction, NavCause::Api);
    }

    /// Animates to the slide at `position` in the live sequence.
    pub fn request_move_to(&mut self, position: usize) {
        if self.destroyed || position >= self.sequence.len() {
            return;
        }
        let from = self.nav.intent();
        self.start_transition(from, position, NavCause::Api);
    }

    /// Animates to the canonical slide with the given 1-based index.
    pub fn request_move_to_index(&mut self, index: u32) {
        self.move_to_index(index, NavCause::Api);
    }

    fn move_by(&mut self, direction: Direction, cause: NavCause) {
        if self.destroyed {
            return;
        }
        let mut from = self.nav.intent();
        if self.sequence.neighbor(from, direction).is_none() {
            match self.shift_to_originals(from) {
                Some(shifted) => from = shifted,
                None => return,
            }
        }
        if let Some(to) = self.sequence.neighbor(from, direction) {
            self.start_transition(from, to, cause);
        }
    }

    /// Moves the viewport by one region so that the clone at `position` is
    /// replaced by its original. Clone content is identical, so the jump is
    /// invisible. Returns the original's position.
    fn shift_to_originals(&mut self, position: usize) -> Option<usize> {
        let canonical = self.sequence.canonical_counterpart(position)?;
        let delta = self.sequence.offset(canonical)? - self.sequence.offset(position)?;
        let scroll = self.host.scroll_offset();
        self.host.set_scroll_offset(scroll + delta);
        Some(canonical)
    }

    fn move_to_index(&mut self, index: u32, cause: NavCause) {
        if let Some(to) = self.sequence.canonical_position(index) {
            let from = self.nav.intent();
            self.start_transition(from, to, cause);
        }
    }

    fn start_transition(&mut self, from: usize, to: usize, cause: NavCause) {
        let Some(to_offset) = self.sequence.offset(to) else {
            return;
        };
        let at = self.now();
        self.tracer.navigate(&NavigateEvent {
            at,
            cause,
            from,
            to,
        });

        if let Some(prev) = self.nav.in_flight.take() {
            self.driver.cancel(prev.id);
            self.tracer.transition_cancel(&CancelEvent { at, id: prev.id });
        }

        let from_offset = self.host.scroll_offset();
        let duration = self.config.transition_duration;
        let id = self.driver.start(from_offset, to_offset, duration);
        self.nav.in_flight = Some(InFlight { id, target: to });
        self.tracer.transition_start(&TransitionEvent {
            at,
            id,
            from_offset,
            to_offset,
            duration,
        });
    }

    fn transition_complete(&mut self, id: TransitionId) {
        match self.nav.in_flight {
            Some(flight) if flight.id == id => {
                self.nav.in_flight = None;
                self.commit(flight.target, Some(id));
            }
            _ => self.trace_stale(StaleKind::Transition(id)),
        }
    }

    /// Commits `target` as the current slide.
    fn commit(&mut self, target: usize, id: Option<TransitionId>) {
        let (Some(slide), Some(offset)) = (
            self.sequence.get(target).copied(),
            self.sequence.offset(target),
        ) else {
            return;
        };

        self.host.set_scroll_offset(offset);
        self.host.set_active_slide(target);
        if self.dot_count > 0 {
            self.host.set_active_dot(dot_for(&slide));
        }

        self.process_loop_boundary(target);
        self.nav.current = self.nav.pending_current_override.take().unwrap_or(target);
        self.sync_arrows();

        let current = self.nav.current;
        if let Some(slide) = self.sequence.get(current) {
            self.host.slide_changed(slide, current);
        }
        let at = self.now();
        self.tracer.commit(&CommitEvent {
            at,
            id,
            position: current,
            slide_index: slide.index,
            offset: self.host.scroll_offset(),
        });

        self.lazy_load();
    }

    /// Re-centers from a clone onto its canonical slide without animating.
    fn process_loop_boundary(&mut self, target: usize) {
        if !self.sequence.is_looping() {
            return;
        }
        let Some(canonical) = self.sequence.canonical_counterpart(target) else {
            return;
        };
        let Some(offset) = self.sequence.offset(canonical) else {
            return;
        };
        self.host.set_active_slide(canonical);
        self.host.set_scroll_offset(offset);
        self.nav.pending_current_override = Some(canonical);

        let at = self.now();
        self.tracer.loop_correction(&LoopCorrectionEvent {
            at,
            from: target,
            to: canonical,
            offset,
        });
    }

    fn sync_arrows(&mut self) {
        if !self.config.arrows {
            return;
        }
        let viewport = self.host.viewport_size().width;
        self.arrows = ArrowState::from_scroll(
            self.host.scroll_offset(),
            self.sequence.total_width(),
            viewport,
        );
        self.host.set_arrows(self.arrows);
    }

    // -- Lazy load --

    fn lazy_load(&mut self) {
        if !self.config.lazy_load {
            return;
        }
        let current = self.nav.current;
        let around = [
            self.sequence.neighbor(current, Direction::Prev),
            Some(current),
            self.sequence.neighbor(current, Direction::Next),
        ];
        for position in around.into_iter().flatten() {
            for src in self.host.pending_images(position) {
                if self.images.begin(&src) {
                    self.host.load_image(&src);
                    let at = self.now();
                    self.tracer.image(&ImageEvent {
                        at,
                        src: &src,
                        phase: ImagePhase::Requested,
                    });
                }
            }
        }
    }

    fn image_finished(&mut self, src: &str, loaded: bool) {
        if !self.images.finish(src) {
            self.trace_stale(StaleKind::Image);
            return;
        }
        if loaded {
            self.host.swap_image(src);
        }
        let at = self.now();
        self.tracer.image(&ImageEvent {
            at,
            src,
            phase: if loaded {
                ImagePhase::Loaded
            } else {
                ImagePhase::Failed
            },
        });
    }

    // -- Autoplay --

    /// Starts or resumes autoplay.
    ///
    /// No-op on an empty or destroyed carousel, or when already running.
    pub fn play(&mut self) {
        if self.destroyed
            || self.sequence.is_empty()
            || self.autoplay.state() == AutoplayState::Running
        {
            return;
        }
        self.schedule_tick();
    }

    /// Pauses autoplay. An in-flight tween still completes.
    pub fn pause(&mut self) {
        if !self.destroyed {
            self.pause_with(PauseCause::Explicit);
        }
    }

    fn pause_with(&mut self, cause: PauseCause) {
        let before = self.autoplay.state();
        if let Some(timer) = self.autoplay.pause(cause) {
            self.host.clear_timeout(timer);
        }
        if self.autoplay.state() != before {
            self.trace_autoplay();
        }
    }

    fn schedule_tick(&mut self) {
        let before = self.autoplay.state();
        let timer = self.host.set_timeout(self.config.autoplay_interval);
        self.autoplay.scheduled(timer);
        if before != AutoplayState::Running {
            self.trace_autoplay();
        }
    }

    fn autoplay_tick(&mut self, timer: TimerId) {
        if !self.autoplay.take_tick(timer) {
            self.trace_stale(StaleKind::Timer(timer));
            return;
        }
        self.move_by(Direction::Next, NavCause::Autoplay);
        self.schedule_tick();
    }

    // -- Teardown --

    /// Tears the carousel down. Idempotent.
    ///
    /// Cancels the in-flight tween and the pending autoplay tick, removes
    /// every registered listener and releases the host's DOM references.
    /// Events that arrive afterwards are discarded.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        let at = self.now();

        if let Some(flight) = self.nav.in_flight.take() {
            self.driver.cancel(flight.id);
            self.tracer.transition_cancel(&CancelEvent { at, id: flight.id });
        }
        if let Some(timer) = self.autoplay.stop() {
            self.host.clear_timeout(timer);
        }
        for id in self.listeners.drain(..) {
            self.host.unlisten(id);
        }
        self.images.clear();
        self.nav.pending_current_override = None;
        self.host.release();
        self.sequence = SlideSequence::default();

        self.tracer.destroy(&DestroyEvent { at });
    }

    // -- Helpers --

    fn listen(&mut self, kind: ListenerKind) {
        let id = self.host.listen(kind);
        self.listeners.push(id);
    }

    fn now(&self) -> HostTime {
        self.host.now()
    }

    fn trace_stale(&mut self, kind: StaleKind) {
        if self.tracer.is_enabled() {
            let at = self.now();
            self.tracer.stale(&StaleEvent { at, kind });
        }
    }

    fn trace_autoplay(&mut self) {
        let at = self.now();
        self.tracer.autoplay(&AutoplayEvent {
            at,
            state: self.autoplay.state(),
        });
    }

    fn trace_init(&mut self) {
        let at = self.now();
        self.tracer.init(&InitEvent {
            at,
            slides: self.sequence.len(),
            total_width: self.sequence.total_width(),
            looping: self.sequence.is_looping(),
            current: self.nav.current,
        });
    }
}

/// 0-based dot for a slide.
fn dot_for(slide: &Slide) -> usize {
    usize::try_from(slide.index.saturating_sub(1)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::*;
    use crate::event::Key;
    use crate::testing::{FakeHost, ManualDriver};
    use crate::time::Duration;

    type Ctl = SlideController<FakeHost, ManualDriver>;

    fn carousel(widths: &[f64], viewport: f64, config: Config) -> Ctl {
        SlideController::new(FakeHost::new(widths, viewport), ManualDriver::default(), config)
    }

    /// Completes whatever tween is in flight.
    fn settle(ctl: &mut Ctl) {
        if let Some(flight) = ctl.in_flight() {
            ctl.handle(Event::TransitionComplete(flight.id));
        }
    }

    fn index(ctl: &Ctl) -> Option<u32> {
        ctl.current().map(|s| s.index)
    }

    #[test]
    fn init_example_three_slides() {
        let ctl = carousel(&[100.0, 150.0, 100.0], 120.0, Config::new());
        assert!((ctl.total_width() - 350.0).abs() < f64::EPSILON);
        assert!((ctl.host().list_width - 350.0).abs() < f64::EPSILON);
        assert!(ctl.host().scroll.abs() < f64::EPSILON);
        assert_eq!(ctl.current_position(), 0);
        assert_eq!(index(&ctl), Some(1));
        assert!(ctl.arrows().prev_disabled);
        assert!(!ctl.arrows().next_disabled);
        assert_eq!(ctl.host().arrows, Some(ctl.arrows()));
        assert_eq!(ctl.host().active_slide, Some(0));
        assert_eq!(ctl.host().active_dot, Some(0));
        assert_eq!(ctl.host().dots, 3);
        assert_eq!(ctl.host().changed, vec![(1, 0)]);
        assert!(ctl.in_flight().is_none());
        assert!(ctl.driver().started.is_empty(), "init must not animate");
    }

    #[test]
    fn narrow_strip_disables_both_arrows() {
        let ctl = carousel(&[40.0, 40.0], 200.0, Config::new());
        assert!(ctl.arrows().prev_disabled);
        assert!(ctl.arrows().next_disabled);
    }

    #[test]
    fn first_element_is_committed_without_animation() {
        let ctl = carousel(
            &[100.0, 100.0, 100.0, 100.0],
            100.0,
            Config::new().with_first_element(3),
        );
        assert_eq!(ctl.current_position(), 2);
        assert!((ctl.host().scroll - 200.0).abs() < f64::EPSILON);
        assert!(ctl.driver().started.is_empty());
        assert!(!ctl.arrows().prev_disabled);
    }

    #[test]
    fn out_of_range_first_element_falls_back_to_first() {
        let ctl = carousel(&[100.0, 100.0], 100.0, Config::new().with_first_element(9));
        assert_eq!(index(&ctl), Some(1));
        let ctl = carousel(&[100.0, 100.0], 100.0, Config::new().with_first_element(0));
        assert_eq!(index(&ctl), Some(1));
    }

    #[test]
    fn empty_host_is_degenerate_but_safe() {
        let mut ctl = carousel(&[], 300.0, Config::new().with_autoplay(true).with_loop(true));
        assert!(ctl.total_width().abs() < f64::EPSILON);
        assert!(ctl.current().is_none());
        assert_eq!(ctl.host().dots, 0);
        assert!(!ctl.host().clones_installed);
        assert_eq!(ctl.autoplay_state(), AutoplayState::Stopped);

        ctl.request_directional_move(Direction::Next);
        ctl.handle(Event::KeyPressed(Key::ArrowRight));
        ctl.handle(Event::DotClicked(0));
        ctl.request_move_to(0);
        assert!(ctl.driver().started.is_empty());
        ctl.destroy();
    }

    #[test]
    fn next_commits_only_on_completion() {
        let mut ctl = carousel(&[100.0, 150.0, 100.0], 100.0, Config::new());
        ctl.handle(Event::ArrowClicked(Direction::Next));

        let flight = ctl.in_flight().expect("tween started");
        assert_eq!(flight.target, 1);
        assert_eq!(ctl.current_position(), 0, "current moves only at commit");
        let (_, from, to, duration) = ctl.driver().started[0];
        assert!(from.abs() < f64::EPSILON);
        assert!((to - 100.0).abs() < f64::EPSILON);
        assert_eq!(duration, Duration::from_millis(200));

        settle(&mut ctl);
        assert_eq!(ctl.current_position(), 1);
        assert_eq!(ctl.host().active_slide, Some(1));
        assert_eq!(ctl.host().active_dot, Some(1));
        assert!(!ctl.arrows().prev_disabled);
        assert_eq!(ctl.host().changed.last(), Some(&(2, 1)));
    }

    #[test]
    fn next_at_last_slide_is_noop_without_loop() {
        let mut ctl = carousel(
            &[100.0, 100.0, 100.0],
            100.0,
            Config::new().with_first_element(3),
        );
        ctl.request_directional_move(Direction::Next);
        assert!(ctl.in_flight().is_none());
        assert!(ctl.driver().started.is_empty());
        assert_eq!(ctl.current_position(), 2);
        assert!(ctl.arrows().next_disabled);

        ctl.request_directional_move(Direction::Prev);
        assert_eq!(ctl.in_flight().map(|f| f.target), Some(1));
    }

    #[test]
    fn prev_at_first_slide_is_noop_without_loop() {
        let mut ctl = carousel(&[100.0, 100.0], 100.0, Config::new());
        ctl.handle(Event::ArrowClicked(Direction::Prev));
        assert!(ctl.driver().started.is_empty());
    }

    #[test]
    fn newer_navigation_supersedes_in_flight_one() {
        let mut ctl = carousel(&[100.0; 5], 100.0, Config::new());
        ctl.request_directional_move(Direction::Next);
        let a = ctl.in_flight().expect("a").id;
        ctl.handle(Event::DotClicked(3));
        let b = ctl.in_flight().expect("b");
        assert_ne!(a, b.id);
        assert_eq!(b.target, 3);
        assert_eq!(ctl.driver().cancelled, vec![a]);

        // A driver that ignored the cancel must not be able to commit.
        ctl.handle(Event::TransitionComplete(a));
        assert_eq!(ctl.current_position(), 0);
        assert_eq!(ctl.host().changed.len(), 1);

        ctl.handle(Event::TransitionComplete(b.id));
        assert_eq!(index(&ctl), Some(4));
        assert_eq!(ctl.host().changed.len(), 2);
    }

    #[test]
    fn rapid_next_advances_from_in_flight_target() {
        let mut ctl = carousel(&[100.0; 4], 100.0, Config::new());
        ctl.handle(Event::KeyPressed(Key::ArrowRight));
        ctl.handle(Event::KeyPressed(Key::ArrowRight));
        ctl.handle(Event::KeyPressed(Key::ArrowRight));
        assert_eq!(ctl.in_flight().map(|f| f.target), Some(3));
        assert_eq!(ctl.driver().cancelled.len(), 2);
        settle(&mut ctl);
        assert_eq!(ctl.current_position(), 3);
    }

    #[test]
    fn dot_click_commits_matching_index() {
        let mut ctl = carousel(&[80.0, 90.0, 100.0, 110.0], 100.0, Config::new().with_loop(true));
        for dot in [2, 0, 3, 1] {
            ctl.handle(Event::DotClicked(dot));
            settle(&mut ctl);
            let current = ctl.current().expect("current");
            assert!(current.is_canonical());
            assert_eq!(current.index as usize, dot + 1);
        }
        ctl.handle(Event::DotClicked(4));
        assert!(ctl.in_flight().is_none(), "no such dot");
    }

    #[test]
    fn looping_installs_clones_and_starts_on_originals() {
        let ctl = carousel(&[100.0, 150.0, 100.0], 100.0, Config::new().with_loop(true));
        assert!(ctl.host().clones_installed);
        assert!((ctl.total_width() - 1050.0).abs() < f64::EPSILON);
        assert_eq!(ctl.current_position(), 3);
        assert!((ctl.host().scroll - 350.0).abs() < f64::EPSILON);
        assert!(!ctl.arrows().prev_disabled);
        assert_eq!(ctl.host().dots, 3);
    }

    #[test]
    fn forward_wrap_recenters_on_first_original() {
        let mut ctl = carousel(&[100.0, 150.0, 100.0], 100.0, Config::new().with_loop(true));
        for _ in 0..3 {
            ctl.request_directional_move(Direction::Next);
            settle(&mut ctl);
        }
        // Landed on the first after-clone, corrected to the first original.
        assert_eq!(ctl.current_position(), 3);
        assert_eq!(index(&ctl), Some(1));
        assert!(ctl.current().is_some_and(Slide::is_canonical));
        assert!((ctl.host().scroll - 350.0).abs() < f64::EPSILON);
        assert_eq!(ctl.host().active_slide, Some(3));
        assert_eq!(ctl.driver().started.len(), 3, "correction is not animated");

        ctl.request_directional_move(Direction::Next);
        settle(&mut ctl);
        assert_eq!(index(&ctl), Some(2));
    }

    #[test]
    fn backward_wrap_recenters_on_last_original() {
        let mut ctl = carousel(&[100.0, 150.0, 100.0], 100.0, Config::new().with_loop(true));
        ctl.handle(Event::ArrowClicked(Direction::Prev));
        assert_eq!(ctl.in_flight().map(|f| f.target), Some(2));
        settle(&mut ctl);

        assert_eq!(ctl.current_position(), 5);
        assert_eq!(index(&ctl), Some(3));
        assert!((ctl.host().scroll - 600.0).abs() < f64::EPSILON);
        assert_eq!(ctl.host().changed.last(), Some(&(3, 5)));
    }

    #[test]
    fn looping_never_hits_a_boundary() {
        let mut ctl = carousel(&[100.0, 100.0], 100.0, Config::new().with_loop(true));
        for _ in 0..7 {
            ctl.handle(Event::ArrowClicked(Direction::Next));
            settle(&mut ctl);
            assert!(ctl.current().is_some_and(Slide::is_canonical));
        }
        for _ in 0..9 {
            ctl.handle(Event::ArrowClicked(Direction::Prev));
            settle(&mut ctl);
            assert!(ctl.current().is_some_and(Slide::is_canonical));
        }
        assert_eq!(ctl.driver().started.len(), 16);
    }

    #[test]
    fn unsettled_next_presses_wrap_past_the_clone_region() {
        let mut ctl = carousel(&[100.0; 3], 100.0, Config::new().with_loop(true));
        assert_eq!(ctl.current_position(), 3);
        for press in 1..=7 {
            let scroll_before = ctl.host().scroll;
            ctl.request_directional_move(Direction::Next);
            assert_eq!(ctl.driver().started.len(), press, "press {press} was dropped");
            if press == 6 {
                // Intent sat on the last after-clone; the viewport jumped back
                // one region and the tween left from the matching original.
                assert_eq!(ctl.in_flight().map(|f| f.target), Some(6));
                let (_, from, to, _) = ctl.driver().started[5];
                assert!((from - (scroll_before - 300.0)).abs() < f64::EPSILON);
                assert!((to - 600.0).abs() < f64::EPSILON);
            }
        }
        settle(&mut ctl);
        // Seven steps forward from slide 1 of 3.
        assert_eq!(index(&ctl), Some(2));
        assert!(ctl.current().is_some_and(Slide::is_canonical));
        assert!((ctl.host().scroll - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unsettled_prev_presses_wrap_past_the_clone_region() {
        let mut ctl = carousel(&[100.0; 3], 100.0, Config::new().with_loop(true));
        for press in 1..=5 {
            ctl.request_directional_move(Direction::Prev);
            assert_eq!(ctl.driver().started.len(), press, "press {press} was dropped");
        }
        let (_, from, _, _) = ctl.driver().started[3];
        assert!((from - 600.0).abs() < f64::EPSILON, "jumped forward one region");
        settle(&mut ctl);
        // Five steps back from slide 1 of 3.
        assert_eq!(index(&ctl), Some(2));
        assert!(ctl.current().is_some_and(Slide::is_canonical));
    }

    #[test]
    fn init_writes_the_first_offset_once() {
        let ctl = carousel(&[100.0; 3], 100.0, Config::new().with_first_element(2));
        assert_eq!(ctl.host().scroll_writes, 1);
        assert!((ctl.host().scroll - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn arrows_and_dots_respect_config() {
        let mut ctl = carousel(
            &[100.0, 100.0],
            100.0,
            Config::new().with_arrows(false).with_dots(false),
        );
        assert_eq!(ctl.host().arrows, None);
        assert_eq!(ctl.host().dots, 0);
        assert!(!ctl.host().is_listening(ListenerKind::Arrows));
        assert!(!ctl.host().is_listening(ListenerKind::Dots));
        ctl.handle(Event::ArrowClicked(Direction::Next));
        ctl.handle(Event::DotClicked(1));
        assert!(ctl.in_flight().is_none());
    }

    #[test]
    fn single_slide_dot_suppression_is_configurable() {
        let ctl = carousel(&[100.0], 100.0, Config::new());
        assert_eq!(ctl.host().dots, 0);
        let ctl = carousel(&[100.0], 100.0, Config::new().with_hide_single_dot(false));
        assert_eq!(ctl.host().dots, 1);
    }

    #[test]
    fn keyboard_can_be_disabled() {
        let mut ctl = carousel(&[100.0, 100.0], 100.0, Config::new().with_keyboard(false));
        assert!(!ctl.host().is_listening(ListenerKind::Keyboard));
        ctl.handle(Event::KeyPressed(Key::ArrowRight));
        assert!(ctl.in_flight().is_none());
    }

    #[test]
    fn keyboard_listener_is_registered_once_and_removed() {
        let mut ctl = carousel(&[100.0, 100.0], 100.0, Config::new());
        assert_eq!(ctl.host().count_listening(ListenerKind::Keyboard), 1);
        ctl.destroy();
        assert_eq!(ctl.host().count_listening(ListenerKind::Keyboard), 0);
    }

    #[test]
    fn autoplay_ticks_forward_and_reschedules() {
        let mut ctl = carousel(&[100.0; 3], 100.0, Config::new().with_autoplay(true));
        assert_eq!(ctl.autoplay_state(), AutoplayState::Running);
        let t1 = ctl.host().last_timer().expect("tick scheduled");
        assert_eq!(ctl.host().timer_delay(t1), Some(Duration::from_millis(3000)));

        ctl.handle(Event::AutoplayTick(t1));
        assert_eq!(ctl.in_flight().map(|f| f.target), Some(1));
        let t2 = ctl.host().last_timer().expect("rescheduled");
        assert_ne!(t1, t2);
        settle(&mut ctl);
        assert_eq!(ctl.current_position(), 1);

        // Replaying the old tick does nothing.
        ctl.handle(Event::AutoplayTick(t1));
        assert!(ctl.in_flight().is_none());
    }

    #[test]
    fn hover_pauses_and_leave_resumes() {
        let mut ctl = carousel(&[100.0; 3], 100.0, Config::new().with_autoplay(true));
        assert!(ctl.host().is_listening(ListenerKind::Hover));
        let t1 = ctl.host().last_timer().expect("tick");

        ctl.request_directional_move(Direction::Next);
        ctl.handle(Event::PointerEnter);
        assert_eq!(ctl.autoplay_state(), AutoplayState::Paused);
        assert!(!ctl.host().timers.contains_key(&t1));
        assert!(ctl.in_flight().is_some(), "pause keeps the tween");

        ctl.handle(Event::AutoplayTick(t1));
        assert_eq!(ctl.driver().started.len(), 1);

        ctl.handle(Event::PointerLeave);
        assert_eq!(ctl.autoplay_state(), AutoplayState::Running);
        assert_eq!(ctl.host().timers.len(), 1);
    }

    #[test]
    fn hover_is_ignored_without_pause_on_hover() {
        let mut ctl = carousel(
            &[100.0; 3],
            100.0,
            Config::new().with_autoplay(true).with_pause_on_hover(false),
        );
        assert!(!ctl.host().is_listening(ListenerKind::Hover));
        ctl.handle(Event::PointerEnter);
        assert_eq!(ctl.autoplay_state(), AutoplayState::Running);
    }

    #[test]
    fn explicit_pause_survives_pointer_leave() {
        let mut ctl = carousel(&[100.0; 3], 100.0, Config::new().with_autoplay(true));
        ctl.pause();
        ctl.handle(Event::PointerEnter);
        ctl.handle(Event::PointerLeave);
        assert_eq!(ctl.autoplay_state(), AutoplayState::Paused);
        ctl.play();
        assert_eq!(ctl.autoplay_state(), AutoplayState::Running);
        assert_eq!(ctl.host().timers.len(), 1);
    }

    #[test]
    fn lazy_load_requests_each_image_once() {
        let host = FakeHost::new(&[100.0; 4], 100.0).with_markup(vec![
            vec!["a.jpg"],
            vec!["a.jpg", "b.jpg"],
            vec!["c.jpg"],
            vec!["d.jpg"],
        ]);
        let mut ctl = SlideController::new(
            host,
            ManualDriver::default(),
            Config::new().with_loop(true).with_lazy_load(true).with_first_element(2),
        );
        // Current is original #2 (position 5); neighbors are #1 and #3.
        let mut loads = ctl.host().loads.clone();
        loads.sort();
        assert_eq!(loads, ["a.jpg", "b.jpg", "c.jpg"]);

        ctl.handle(Event::ImageLoaded(String::from("a.jpg")));
        // Swapped everywhere, clone regions included.
        assert!(ctl.host().pending.iter().all(|p| !p.iter().any(|s| s == "a.jpg")));
        assert_eq!(ctl.host().swapped, ["a.jpg"]);

        // Re-running the pass (via a commit) must not reload anything swapped
        // or still loading.
        ctl.handle(Event::DotClicked(1));
        settle(&mut ctl);
        assert_eq!(ctl.host().loads.len(), 3);
    }

    #[test]
    fn failed_image_keeps_marker_and_does_not_block_others() {
        let host = FakeHost::new(&[100.0; 2], 100.0)
            .with_markup(vec![vec!["bad.jpg"], vec!["good.jpg"]]);
        let mut ctl = SlideController::new(
            host,
            ManualDriver::default(),
            Config::new().with_lazy_load(true),
        );
        ctl.handle(Event::ImageFailed(String::from("bad.jpg")));
        ctl.handle(Event::ImageLoaded(String::from("good.jpg")));
        assert_eq!(ctl.host().swapped, ["good.jpg"]);
        assert!(ctl.host().pending[0].iter().any(|s| s == "bad.jpg"));

        // A later pass may retry the failed one.
        ctl.request_directional_move(Direction::Next);
        settle(&mut ctl);
        assert_eq!(
            ctl.host().loads.iter().filter(|s| *s == "bad.jpg").count(),
            2
        );
    }

    #[test]
    fn lazy_load_off_requests_nothing() {
        let host = FakeHost::new(&[100.0; 2], 100.0).with_markup(vec![vec!["a.jpg"], vec![]]);
        let ctl = SlideController::new(host, ManualDriver::default(), Config::new());
        assert!(ctl.host().loads.is_empty());
    }

    #[test]
    fn destroy_releases_everything() {
        let mut ctl = carousel(
            &[100.0; 3],
            100.0,
            Config::new().with_autoplay(true).with_loop(true),
        );
        ctl.request_directional_move(Direction::Next);
        let flight = ctl.in_flight().expect("in flight");

        ctl.destroy();
        assert!(ctl.is_destroyed());
        assert_eq!(ctl.autoplay_state(), AutoplayState::Stopped);
        assert!(ctl.host().timers.is_empty());
        assert!(ctl.host().listeners.is_empty());
        assert!(ctl.host().released);
        assert!(ctl.sequence().is_empty());
        assert_eq!(ctl.driver().cancelled, vec![flight.id]);
    }

    #[test]
    fn late_callbacks_after_destroy_are_discarded() {
        let host = FakeHost::new(&[100.0; 3], 100.0).with_markup(vec![vec!["a.jpg"], vec![], vec![]]);
        let mut ctl = SlideController::new(
            host,
            ManualDriver::default(),
            Config::new().with_autoplay(true).with_lazy_load(true),
        );
        ctl.request_directional_move(Direction::Next);
        let flight = ctl.in_flight().expect("in flight");
        let timer = ctl.host().last_timer().expect("timer");
        let changed = ctl.host().changed.len();
        let scroll_writes = ctl.host().scroll_writes;

        ctl.destroy();
        ctl.destroy();
        ctl.handle(Event::TransitionComplete(flight.id));
        ctl.handle(Event::AutoplayTick(timer));
        ctl.handle(Event::ImageLoaded(String::from("a.jpg")));
        ctl.handle(Event::KeyPressed(Key::ArrowRight));
        ctl.request_directional_move(Direction::Next);
        ctl.play();

        assert_eq!(ctl.host().changed.len(), changed);
        assert_eq!(ctl.host().scroll_writes, scroll_writes);
        assert!(ctl.host().swapped.is_empty());
        assert_eq!(ctl.driver().started.len(), 1);
        assert_eq!(ctl.autoplay_state(), AutoplayState::Stopped);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_reports_loop_correction_and_stale_completion() {
        use alloc::rc::Rc;
        use core::cell::RefCell;

        #[derive(Default)]
        struct Log {
            corrections: Vec<(usize, usize)>,
            stale: Vec<StaleKind>,
            commits: usize,
        }
        struct Sink(Rc<RefCell<Log>>);
        impl TraceSink for Sink {
            fn on_loop_correction(&mut self, e: &LoopCorrectionEvent) {
                self.0.borrow_mut().corrections.push((e.from, e.to));
            }
            fn on_stale(&mut self, e: &StaleEvent) {
                self.0.borrow_mut().stale.push(e.kind);
            }
            fn on_commit(&mut self, _: &CommitEvent) {
                self.0.borrow_mut().commits += 1;
            }
        }

        let log = Rc::new(RefCell::new(Log::default()));
        let mut ctl = SlideController::with_sink(
            FakeHost::new(&[100.0, 100.0], 100.0),
            ManualDriver::default(),
            Config::new().with_loop(true),
            Box::new(Sink(Rc::clone(&log))),
        );
        ctl.request_directional_move(Direction::Prev);
        let a = ctl.in_flight().expect("a").id;
        ctl.request_directional_move(Direction::Next);
        ctl.handle(Event::TransitionComplete(a));
        settle(&mut ctl);

        let log = log.borrow();
        assert_eq!(log.commits, 2);
        assert_eq!(log.stale, [StaleKind::Transition(a)]);
        assert!(log.corrections.is_empty(), "landed back on an original");
    }
}
