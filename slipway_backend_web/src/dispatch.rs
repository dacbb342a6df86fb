// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routes browser callbacks into the controller.
//!
//! Every listener, timer, image and tween callback holds an `Rc<Dispatcher>`
//! and calls [`Dispatcher::send`]. The dispatcher only holds a weak reference
//! to the controller, so callbacks that outlive the widget fall through.
//!
//! Some DOM calls run page code synchronously (a `slideChanged` listener can
//! call `pause()` or `destroy()` on the same carousel). Operations that arrive
//! while the controller is mid-update are queued and drained by the outer
//! `send` once the current one returns.

use alloc::collections::VecDeque;
use alloc::rc::Weak;
use core::cell::RefCell;

use slipway_core::controller::SlideController;
use slipway_core::event::Event;

use crate::host::DomHost;
use crate::tween::RafTween;

/// The controller type the web backend drives.
pub(crate) type WebController = SlideController<DomHost, RafTween>;

/// One unit of work for the controller.
#[derive(Debug)]
pub(crate) enum Op {
    Event(Event),
    Play,
    Pause,
    Destroy,
}

#[derive(Default)]
pub(crate) struct Dispatcher {
    target: RefCell<Weak<RefCell<WebController>>>,
    queue: RefCell<VecDeque<Op>>,
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("attached", &(self.target.borrow().strong_count() > 0))
            .field("queued", &self.queue.borrow().len())
            .finish()
    }
}

impl Dispatcher {
    /// Points the dispatcher at a controller. Ops sent before this are
    /// dropped.
    pub(crate) fn attach(&self, controller: Weak<RefCell<WebController>>) {
        *self.target.borrow_mut() = controller;
    }

    /// Shorthand for `send(Op::Event(event))`.
    pub(crate) fn event(&self, event: Event) {
        self.send(Op::Event(event));
    }

    pub(crate) fn send(&self, op: Op) {
        let Some(controller) = self.target.borrow().upgrade() else {
            self.queue.borrow_mut().clear();
            return;
        };
        self.queue.borrow_mut().push_back(op);

        // Already inside `handle`; the outer call drains the queue.
        let Ok(mut controller) = controller.try_borrow_mut() else {
            return;
        };
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(op) = next else {
                break;
            };
            match op {
                Op::Event(event) => controller.handle(event),
                Op::Play => controller.play(),
                Op::Pause => controller.pause(),
                Op::Destroy => controller.destroy(),
            }
        }
    }
}
