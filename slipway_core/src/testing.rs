// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host and driver for controller tests.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;

use crate::backend::{
    AnimationDriver, Host, ListenerId, ListenerKind, TimerId, TransitionId,
};
use crate::nav::ArrowState;
use crate::slide::Slide;
use crate::time::{Duration, HostTime};

/// Records every host call and keeps a minimal model of the DOM.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    widths: Vec<f64>,
    viewport: f64,
    markup: Vec<Vec<String>>,
    next_id: u64,

    pub(crate) scroll: f64,
    pub(crate) scroll_writes: usize,
    pub(crate) list_width: f64,
    pub(crate) clones_installed: bool,
    pub(crate) dots: usize,
    pub(crate) active_slide: Option<usize>,
    pub(crate) active_dot: Option<usize>,
    pub(crate) arrows: Option<ArrowState>,
    pub(crate) changed: Vec<(u32, usize)>,
    pub(crate) listeners: BTreeMap<ListenerId, ListenerKind>,
    pub(crate) timers: BTreeMap<TimerId, Duration>,
    pub(crate) pending: Vec<Vec<String>>,
    pub(crate) loads: Vec<String>,
    pub(crate) swapped: Vec<String>,
    pub(crate) released: bool,
}

impl FakeHost {
    pub(crate) fn new(widths: &[f64], viewport: f64) -> Self {
        Self {
            widths: widths.to_vec(),
            viewport,
            markup: widths.iter().map(|_| Vec::new()).collect(),
            pending: widths.iter().map(|_| Vec::new()).collect(),
            ..Self::default()
        }
    }

    /// Deferred image references per original item.
    pub(crate) fn with_markup(mut self, markup: Vec<Vec<&str>>) -> Self {
        self.markup = markup
            .into_iter()
            .map(|srcs| srcs.into_iter().map(String::from).collect())
            .collect();
        self.pending = self.markup.clone();
        self
    }

    pub(crate) fn is_listening(&self, kind: ListenerKind) -> bool {
        self.count_listening(kind) > 0
    }

    pub(crate) fn count_listening(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|k| **k == kind).count()
    }

    pub(crate) fn last_timer(&self) -> Option<TimerId> {
        self.timers.keys().next_back().copied()
    }

    pub(crate) fn timer_delay(&self, id: TimerId) -> Option<Duration> {
        self.timers.get(&id).copied()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for FakeHost {
    fn now(&self) -> HostTime {
        HostTime(0)
    }

    fn item_sizes(&self) -> Vec<Size> {
        self.widths.iter().map(|&w| Size::new(w, 50.0)).collect()
    }

    fn viewport_size(&self) -> Size {
        Size::new(self.viewport, 50.0)
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        let max = (self.list_width - self.viewport).max(0.0);
        self.scroll = offset.clamp(0.0, max);
        self.scroll_writes += 1;
    }

    fn set_list_width(&mut self, width: f64) {
        self.list_width = width;
    }

    fn install_clones(&mut self) {
        self.clones_installed = true;
        let one = self.markup.clone();
        self.pending = [one.clone(), one.clone(), one].concat();
    }

    fn create_dots(&mut self, count: usize) {
        self.dots = count;
    }

    fn set_active_slide(&mut self, position: usize) {
        self.active_slide = Some(position);
    }

    fn set_active_dot(&mut self, dot: usize) {
        self.active_dot = Some(dot);
    }

    fn set_arrows(&mut self, state: ArrowState) {
        self.arrows = Some(state);
    }

    fn slide_changed(&mut self, slide: &Slide, position: usize) {
        self.changed.push((slide.index, position));
    }

    fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.insert(id, kind);
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next());
        self.timers.insert(id, delay);
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn pending_images(&self, position: usize) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for src in self.pending.get(position).into_iter().flatten() {
            if !out.contains(src) {
                out.push(src.clone());
            }
        }
        out
    }

    fn load_image(&mut self, src: &str) {
        self.loads.push(String::from(src));
    }

    fn swap_image(&mut self, src: &str) {
        for srcs in &mut self.pending {
            srcs.retain(|s| s != src);
        }
        self.swapped.push(String::from(src));
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// A driver whose tweens only finish when a test says so.
#[derive(Debug, Default)]
pub(crate) struct ManualDriver {
    next_id: u64,
    pub(crate) started: Vec<(TransitionId, f64, f64, Duration)>,
    pub(crate) cancelled: Vec<TransitionId>,
}

impl AnimationDriver for ManualDriver {
    fn start(&mut self, from: f64, to: f64, duration: Duration) -> TransitionId {
        self.next_id += 1;
        let id = TransitionId(self.next_id);
        self.started.push((id, from, to, duration));
        id
    }

    fn cancel(&mut self, id: TransitionId) {
        self.cancelled.push(id);
    }
}
