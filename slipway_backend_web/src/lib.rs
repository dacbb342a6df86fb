// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for slipway.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`Carousel`]: initializes a carousel on a DOM element and owns it
//! - [`DomHost`]: the DOM adapter (`Host`)
//! - [`RafTween`]: `requestAnimationFrame` scroll tween (`AnimationDriver`)
//! - [`ConsoleSink`]: trace sink logging to the browser console
//! - [`config_from_js`]: reads options from a plain JS object
//!
//! After each committed navigation a `slideChanged` [`CustomEvent`] is
//! dispatched on the root element. Its `detail` carries the 1-based `index`,
//! the `position` in the live sequence and the current `element`.
//!
//! [`CustomEvent`]: web_sys::CustomEvent
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables controller tracing, so sinks
//!   passed to [`Carousel::initialize_with_sink`] receive events.

#![no_std]

extern crate alloc;

mod console;
mod dispatch;
mod dom;
mod host;
mod options;
mod tween;

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

pub use console::ConsoleSink;
pub use host::{DomHost, SLIDE_CHANGED};
pub use options::config_from_js;
pub use tween::RafTween;

use slipway_core::autoplay::AutoplayState;
use slipway_core::config::Config;
use slipway_core::controller::SlideController;
use slipway_core::time::HostTime;
use slipway_core::trace::TraceSink;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use dispatch::{Dispatcher, Op, WebController};

/// Returns the current host time from `performance.now()`, in microsecond
/// ticks.
#[must_use]
pub fn now() -> HostTime {
    let ms = tween::performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

/// A carousel running on a DOM element.
///
/// Dropping the handle destroys the carousel.
pub struct Carousel {
    controller: Rc<RefCell<WebController>>,
    dispatch: Rc<Dispatcher>,
}

impl core::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("Carousel");
        match self.controller.try_borrow() {
            Ok(controller) => s.field("controller", &*controller),
            Err(_) => s.field("controller", &"<busy>"),
        };
        s.field("dispatch", &self.dispatch).finish()
    }
}

impl Carousel {
    /// Initializes a carousel on `element`.
    ///
    /// Fails only if the element cannot be adopted (detached from a document,
    /// or a DOM call throws during setup). An element without a list yields a
    /// carousel with no slides.
    pub fn initialize(element: HtmlElement, config: Config) -> Result<Self, JsValue> {
        Self::build(element, config, None)
    }

    /// Like [`initialize`](Self::initialize), reporting to `sink` from the
    /// first event on.
    pub fn initialize_with_sink(
        element: HtmlElement,
        config: Config,
        sink: Box<dyn TraceSink>,
    ) -> Result<Self, JsValue> {
        Self::build(element, config, Some(sink))
    }

    fn build(
        element: HtmlElement,
        config: Config,
        sink: Option<Box<dyn TraceSink>>,
    ) -> Result<Self, JsValue> {
        let dispatch = Rc::new(Dispatcher::default());
        let host = DomHost::new(element, Rc::clone(&dispatch))?;
        let driver = RafTween::new(host.viewport().cloned(), Rc::clone(&dispatch));
        let controller = match sink {
            Some(sink) => SlideController::with_sink(host, driver, config, sink),
            None => SlideController::new(host, driver, config),
        };
        let controller = Rc::new(RefCell::new(controller));
        dispatch.attach(Rc::downgrade(&controller));
        Ok(Self {
            controller,
            dispatch,
        })
    }

    /// Starts or resumes autoplay.
    pub fn play(&self) {
        self.dispatch.send(Op::Play);
    }

    /// Pauses autoplay.
    pub fn pause(&self) {
        self.dispatch.send(Op::Pause);
    }

    /// Tears the carousel down. Idempotent.
    ///
    /// Generated dots and clones stay in the document; listeners, timers and
    /// pending callbacks are removed.
    pub fn destroy(&self) {
        self.dispatch.send(Op::Destroy);
    }

    /// 1-based index of the current slide, `None` when empty, destroyed, or
    /// called from inside a `slideChanged` listener.
    #[must_use]
    pub fn current_index(&self) -> Option<u32> {
        let controller = self.controller.try_borrow().ok()?;
        controller.current().map(|slide| slide.index)
    }

    /// Autoplay state, `None` if called from inside a `slideChanged`
    /// listener.
    #[must_use]
    pub fn autoplay_state(&self) -> Option<AutoplayState> {
        Some(self.controller.try_borrow().ok()?.autoplay_state())
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.destroy();
    }
}

