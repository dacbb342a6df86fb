// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` scroll tween.
//!
//! [`RafTween`] implements [`AnimationDriver`] by easing the viewport's
//! `scrollLeft` once per animation frame. The first frame after
//! [`start`](AnimationDriver::start) anchors the tween's clock to the
//! frame's [`DOMHighResTimeStamp`][mdn]; completion is dispatched from the
//! frame that reaches the end.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp
//! [`AnimationDriver`]: slipway_core::backend::AnimationDriver

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use slipway_core::backend::{AnimationDriver, TransitionId};
use slipway_core::event::Event;
use slipway_core::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::dispatch::Dispatcher;
use crate::dom;

// Direct global bindings instead of `web_sys::Window` methods, which would
// mean fetching (and unwrapping) the Window on every frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// jQuery's default `swing` easing.
pub(crate) fn swing(p: f64) -> f64 {
    0.5 - cos_pi(p) / 2.0
}

#[cfg(target_arch = "wasm32")]
fn cos_pi(p: f64) -> f64 {
    js_sys::Math::cos(p * core::f64::consts::PI)
}

// Native builds only run unit tests, which may link `std`.
#[cfg(not(target_arch = "wasm32"))]
fn cos_pi(p: f64) -> f64 {
    extern crate std;
    (p * core::f64::consts::PI).cos()
}

/// Linear progress through a tween, clamped to `0..=1`.
pub(crate) fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        1.0
    } else {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug)]
struct Active {
    id: TransitionId,
    from: f64,
    to: f64,
    duration_ms: f64,
    /// Timestamp of the first frame, set once it arrives.
    started_ms: Option<f64>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct TweenInner {
    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Created once and re-registered each frame while a tween runs.
    closure: RefCell<Option<RafClosure>>,

    /// The element whose `scrollLeft` is animated.
    target: Option<HtmlElement>,

    /// Receives `TransitionComplete`.
    dispatch: Rc<Dispatcher>,

    /// The running tween, if any.
    active: Cell<Option<Active>>,

    /// Handle of the pending frame request, if any.
    raf_id: Cell<Option<i32>>,

    next_id: Cell<u64>,
}

impl TweenInner {
    fn frame(&self, timestamp_ms: f64) {
        self.raf_id.set(None);
        let Some(mut active) = self.active.get() else {
            return;
        };
        let started = *active.started_ms.get_or_insert(timestamp_ms);
        let p = progress(timestamp_ms - started, active.duration_ms);
        let offset = active.from + (active.to - active.from) * swing(p);
        if let Some(target) = &self.target {
            dom::set_scroll_left(target, offset);
        }

        if p >= 1.0 {
            self.active.set(None);
            self.dispatch.event(Event::TransitionComplete(active.id));
        } else {
            self.active.set(Some(active));
            self.request();
        }
    }

    fn request(&self) {
        if self.raf_id.get().is_some() {
            return;
        }
        if let Some(ref closure) = *self.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.raf_id.set(Some(id));
        }
    }

    fn cancel_frame(&self) {
        if let Some(id) = self.raf_id.take() {
            cancel_animation_frame(id);
        }
    }
}

/// Eases a scroll offset over `requestAnimationFrame`.
///
/// At most one tween runs at a time; starting a new one replaces the old one
/// without reporting its completion.
pub struct RafTween {
    inner: Rc<TweenInner>,
}

impl RafTween {
    /// Creates a driver animating `target`'s `scrollLeft`.
    ///
    /// With no target, tweens still complete after one frame.
    pub(crate) fn new(target: Option<HtmlElement>, dispatch: Rc<Dispatcher>) -> Self {
        let inner = Rc::new(TweenInner {
            closure: RefCell::new(None),
            target,
            dispatch,
            active: Cell::new(None),
            raf_id: Cell::new(None),
            next_id: Cell::new(0),
        });
        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            if let Some(inner) = weak.upgrade() {
                inner.frame(timestamp_ms);
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);
        Self { inner }
    }

    /// Returns `true` while a tween is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.active.get().is_some()
    }
}

impl AnimationDriver for RafTween {
    fn start(&mut self, from: f64, to: f64, duration: Duration) -> TransitionId {
        let id = TransitionId(self.inner.next_id.get() + 1);
        self.inner.next_id.set(id.0);
        self.inner.active.set(Some(Active {
            id,
            from,
            to,
            duration_ms: duration.as_millis_f64(),
            started_ms: None,
        }));
        self.inner.request();
        id
    }

    fn cancel(&mut self, id: TransitionId) {
        if self.inner.active.get().is_some_and(|a| a.id == id) {
            self.inner.active.set(None);
            self.inner.cancel_frame();
        }
    }
}

impl Drop for RafTween {
    fn drop(&mut self) {
        self.inner.active.set(None);
        self.inner.cancel_frame();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafTween {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafTween")
            .field("active", &self.inner.active.get())
            .field("frame_pending", &self.inner.raf_id.get().is_some())
            .finish()
    }
}
