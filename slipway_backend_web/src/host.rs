// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM adapter.
//!
//! [`DomHost`] implements [`Host`] over the widget markup:
//!
//! ```html
//! <div id="carousel">
//!   <ul>
//!     <li>…</li>
//!     <li><img data-slide-src="big.jpg"></li>
//!   </ul>
//!   <div class="nav-arrow"><span class="prev"></span><span class="next"></span></div>
//! </div>
//! ```
//!
//! On construction the `<ul>` is wrapped in a `div.slide-js-list` viewport,
//! which is the element that scrolls. Dots are appended to the root.
//!
//! Slide offsets are the running sum of item outer widths (margins
//! included). The host zeroes the list's own margin, padding and
//! `column-gap`; page CSS must not reintroduce space between items by other
//! means (borders on the list, absolutely positioned items).
//!
//! [`Host`]: slipway_core::backend::Host

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::cell::Cell;

use kurbo::Size;
use slipway_core::backend::{Host, ListenerId, ListenerKind, TimerId};
use slipway_core::event::{Direction, Event, Key};
use slipway_core::nav::ArrowState;
use slipway_core::slide::Slide;
use slipway_core::time::{Duration, HostTime};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    CustomEvent, CustomEventInit, Element, EventTarget, HtmlElement, HtmlImageElement,
    KeyboardEvent, Node,
};

use crate::dispatch::Dispatcher;
use crate::dom::{self, class};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn js_set_timeout(handler: &JsValue, ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn js_clear_timeout(id: i32);
}

/// Name of the notification dispatched on the root after each commit.
pub const SLIDE_CHANGED: &str = "slideChanged";

type DomCallback = Closure<dyn FnMut(web_sys::Event)>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: DomCallback,
}

impl Listener {
    fn remove(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(
                self.event,
                self.callback.as_ref().unchecked_ref(),
            );
    }
}

struct Timer {
    handle: i32,
    fired: Rc<Cell<bool>>,
    _callback: Closure<dyn FnMut()>,
}

struct ImageLoad {
    image: HtmlImageElement,
    done: Rc<Cell<bool>>,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl ImageLoad {
    fn detach(&self) {
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}

/// [`Host`](slipway_core::backend::Host) over a live DOM element.
pub struct DomHost {
    root: HtmlElement,
    list: Option<HtmlElement>,
    viewport: Option<HtmlElement>,
    originals: Vec<HtmlElement>,
    items: Vec<HtmlElement>,
    prev: Option<HtmlElement>,
    next: Option<HtmlElement>,
    dots: Vec<HtmlElement>,
    listeners: BTreeMap<ListenerId, Vec<Listener>>,
    timers: BTreeMap<TimerId, Timer>,
    images: BTreeMap<String, ImageLoad>,
    dispatch: Rc<Dispatcher>,
    next_id: u64,
}

impl core::fmt::Debug for DomHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomHost")
            .field("root", &"HtmlElement")
            .field("items", &self.items.len())
            .field("dots", &self.dots.len())
            .field("listeners", &self.listeners.len())
            .field("timers", &self.timers.len())
            .field("images", &self.images.len())
            .finish_non_exhaustive()
    }
}

impl DomHost {
    /// Adopts `root`: tags the items with their slide index and wraps the
    /// list in the scrolling viewport.
    ///
    /// A root without a `<ul>` yields a host with no items.
    pub(crate) fn new(root: HtmlElement, dispatch: Rc<Dispatcher>) -> Result<Self, JsValue> {
        let doc = root
            .owner_document()
            .ok_or_else(|| JsValue::from_str("element is not attached to a document"))?;
        root.class_list().add_1(class::WRAPPER)?;

        let list = root
            .query_selector("ul")?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let mut originals = Vec::new();
        let mut viewport = None;
        if let Some(list) = &list {
            originals = dom::children(list);
            for (i, item) in originals.iter().enumerate() {
                item.set_attribute(dom::SLIDE_INDEX_ATTR, &(i + 1).to_string())?;
            }

            let wrap = dom::element(&doc, "div")?;
            wrap.set_class_name(class::VIEWPORT);
            wrap.style().set_property("overflow", "hidden")?;
            let anchor: &Node = list;
            if let Some(parent) = list.parent_node() {
                parent.insert_before(&wrap, Some(anchor))?;
            }
            wrap.append_child(list)?;
            // Offsets are sums of item widths, so the list itself must not
            // add space before or between items.
            let style = list.style();
            for property in ["margin", "padding", "column-gap"] {
                style.set_property(property, "0")?;
            }
            viewport = Some(wrap);
        }

        let arrow = |side: &str| -> Result<Option<HtmlElement>, JsValue> {
            Ok(root
                .query_selector(&format!(".{} .{side}", class::ARROWS))?
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
        };
        let prev = arrow(class::PREV)?;
        let next = arrow(class::NEXT)?;

        Ok(Self {
            items: originals.clone(),
            root,
            list,
            viewport,
            originals,
            prev,
            next,
            dots: Vec::new(),
            listeners: BTreeMap::new(),
            timers: BTreeMap::new(),
            images: BTreeMap::new(),
            dispatch,
            next_id: 0,
        })
    }

    /// The element that scrolls, if the root had a list.
    #[must_use]
    pub fn viewport(&self) -> Option<&HtmlElement> {
        self.viewport.as_ref()
    }

    /// The root element the widget was initialized on.
    #[must_use]
    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn on(
        &self,
        target: &EventTarget,
        event: &'static str,
        make: impl Fn(&web_sys::Event) -> Option<Event> + 'static,
    ) -> Option<Listener> {
        let dispatch = Rc::clone(&self.dispatch);
        let callback = Closure::wrap(Box::new(move |e: web_sys::Event| {
            if let Some(event) = make(&e) {
                dispatch.event(event);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Listener {
            target: target.clone(),
            event,
            callback,
        })
    }

    fn arrow_listeners(&self) -> Vec<Listener> {
        [(&self.prev, Direction::Prev), (&self.next, Direction::Next)]
            .into_iter()
            .filter_map(|(el, direction)| {
                let el = el.as_ref()?;
                self.on(el, "click", move |_| Some(Event::ArrowClicked(direction)))
            })
            .collect()
    }

    fn dot_listeners(&self) -> Vec<Listener> {
        self.dots
            .iter()
            .enumerate()
            .filter_map(|(i, dot)| self.on(dot, "click", move |_| Some(Event::DotClicked(i))))
            .collect()
    }

    fn keyboard_listeners(&self) -> Vec<Listener> {
        let Some(window) = web_sys::window() else {
            return Vec::new();
        };
        self.on(&window, "keydown", |e| {
            let key = e.dyn_ref::<KeyboardEvent>()?.key();
            Key::from_dom_key(&key).map(Event::KeyPressed)
        })
        .into_iter()
        .collect()
    }

    fn hover_listeners(&self) -> Vec<Listener> {
        [
            self.on(&self.root, "mouseenter", |_| Some(Event::PointerEnter)),
            self.on(&self.root, "mouseleave", |_| Some(Event::PointerLeave)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Host for DomHost {
    fn now(&self) -> HostTime {
        crate::now()
    }

    fn item_sizes(&self) -> Vec<Size> {
        let window = web_sys::window();
        self.originals
            .iter()
            .map(|item| {
                let (left, right) = window
                    .as_ref()
                    .and_then(|w| w.get_computed_style(item).ok().flatten())
                    .map_or((0.0, 0.0), |style| {
                        let px = |p: &str| {
                            dom::parse_px(&style.get_property_value(p).unwrap_or_default())
                        };
                        (px("margin-left"), px("margin-right"))
                    });
                Size::new(
                    f64::from(item.offset_width()) + left + right,
                    f64::from(item.offset_height()),
                )
            })
            .collect()
    }

    fn viewport_size(&self) -> Size {
        let el = self.viewport.as_ref().unwrap_or(&self.root);
        Size::new(f64::from(el.client_width()), f64::from(el.client_height()))
    }

    fn scroll_offset(&self) -> f64 {
        self.viewport.as_ref().map_or(0.0, |v| dom::scroll_left(v))
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        if let Some(viewport) = &self.viewport {
            dom::set_scroll_left(viewport, offset);
        }
    }

    fn set_list_width(&mut self, width: f64) {
        if let Some(list) = &self.list {
            let _ = list.style().set_property("width", &format!("{width}px"));
        }
    }

    fn install_clones(&mut self) {
        let (Some(list), Some(first)) = (&self.list, self.originals.first()) else {
            return;
        };
        let clone = |item: &HtmlElement, kind: &str| -> Option<HtmlElement> {
            let copy = item.clone_node_with_deep(true).ok()?.dyn_into::<HtmlElement>().ok()?;
            copy.class_list().add_1(kind).ok()?;
            Some(copy)
        };

        let before: Vec<_> = self
            .originals
            .iter()
            .filter_map(|item| clone(item, class::BEFORE))
            .collect();
        let after: Vec<_> = self
            .originals
            .iter()
            .filter_map(|item| clone(item, class::AFTER))
            .collect();
        let anchor: &Node = first;
        for copy in &before {
            let _ = list.insert_before(copy, Some(anchor));
        }
        for copy in &after {
            let _ = list.append_child(copy);
        }

        self.items = before
            .into_iter()
            .chain(self.originals.iter().cloned())
            .chain(after)
            .collect();
    }

    fn create_dots(&mut self, count: usize) {
        let Some(doc) = self.root.owner_document() else {
            return;
        };
        let Ok(section) = dom::element(&doc, "div") else {
            return;
        };
        section.set_class_name(class::DOT_SECTION);
        for _ in 0..count {
            if let Ok(dot) = dom::element(&doc, "div") {
                dot.set_class_name(class::DOT);
                let _ = section.append_child(&dot);
                self.dots.push(dot);
            }
        }
        let _ = self.root.append_child(&section);
    }

    fn set_active_slide(&mut self, position: usize) {
        for (i, item) in self.items.iter().enumerate() {
            dom::set_class(item, class::ACTIVE, i == position);
        }
    }

    fn set_active_dot(&mut self, dot: usize) {
        for (i, el) in self.dots.iter().enumerate() {
            dom::set_class(el, class::ACTIVE, i == dot);
        }
    }

    fn set_arrows(&mut self, state: ArrowState) {
        if let Some(prev) = &self.prev {
            dom::set_class(prev, class::DISABLED, state.prev_disabled);
        }
        if let Some(next) = &self.next {
            dom::set_class(next, class::DISABLED, state.next_disabled);
        }
    }

    fn slide_changed(&mut self, slide: &Slide, position: usize) {
        let detail = js_sys::Object::new();
        let set = |key: &str, value: &JsValue| {
            let _ = js_sys::Reflect::set(&detail, &JsValue::from_str(key), value);
        };
        set("index", &JsValue::from(slide.index));
        set("position", &JsValue::from_f64(position as f64));
        if let Some(el) = self.items.get(position) {
            set("element", el);
        }

        let init = CustomEventInit::new();
        init.set_detail(&detail);
        if let Ok(event) = CustomEvent::new_with_event_init_dict(SLIDE_CHANGED, &init) {
            let _ = self.root.dispatch_event(&event);
        }
    }

    fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        let group = match kind {
            ListenerKind::Arrows => self.arrow_listeners(),
            ListenerKind::Dots => self.dot_listeners(),
            ListenerKind::Keyboard => self.keyboard_listeners(),
            ListenerKind::Hover => self.hover_listeners(),
        };
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, group);
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        for listener in self.listeners.remove(&id).into_iter().flatten() {
            listener.remove();
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.timers.retain(|_, timer| !timer.fired.get());

        let id = TimerId(self.next_id());
        let fired = Rc::new(Cell::new(false));
        let callback = {
            let fired = Rc::clone(&fired);
            let dispatch = Rc::clone(&self.dispatch);
            Closure::wrap(Box::new(move || {
                fired.set(true);
                dispatch.event(Event::AutoplayTick(id));
            }) as Box<dyn FnMut()>)
        };
        let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let handle = js_set_timeout(callback.as_ref().unchecked_ref(), ms);
        self.timers.insert(
            id,
            Timer {
                handle,
                fired,
                _callback: callback,
            },
        );
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        if let Some(timer) = self.timers.remove(&id) {
            js_clear_timeout(timer.handle);
        }
    }

    fn pending_images(&self, position: usize) -> Vec<String> {
        let Some(item) = self.items.get(position) else {
            return Vec::new();
        };
        let mut out: Vec<String> = Vec::new();
        for el in dom::select_all(item, &format!("[{}]", dom::PENDING_SRC_ATTR)) {
            if let Some(src) = el.get_attribute(dom::PENDING_SRC_ATTR)
                && !out.contains(&src)
            {
                out.push(src);
            }
        }
        out
    }

    fn load_image(&mut self, src: &str) {
        self.images.retain(|_, load| {
            let keep = !load.done.get();
            if !keep {
                load.detach();
            }
            keep
        });

        let Ok(image) = HtmlImageElement::new() else {
            return;
        };
        let done = Rc::new(Cell::new(false));
        let settle = |make: fn(String) -> Event| {
            let done = Rc::clone(&done);
            let dispatch = Rc::clone(&self.dispatch);
            let src = String::from(src);
            Closure::wrap(Box::new(move || {
                done.set(true);
                dispatch.event(make(src.clone()));
            }) as Box<dyn FnMut()>)
        };
        let onload = settle(Event::ImageLoaded);
        let onerror = settle(Event::ImageFailed);
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        image.set_src(src);

        self.images.insert(
            String::from(src),
            ImageLoad {
                image,
                done,
                _onload: onload,
                _onerror: onerror,
            },
        );
    }

    fn swap_image(&mut self, src: &str) {
        let Some(list) = &self.list else {
            return;
        };
        let selector = format!("[{}]", dom::PENDING_SRC_ATTR);
        for el in dom::select_all(list, &selector) {
            if el.get_attribute(dom::PENDING_SRC_ATTR).as_deref() != Some(src) {
                continue;
            }
            swap_one(&el, src);
        }
    }

    fn release(&mut self) {
        for (_, group) in core::mem::take(&mut self.listeners) {
            for listener in group {
                listener.remove();
            }
        }
        for (_, timer) in core::mem::take(&mut self.timers) {
            js_clear_timeout(timer.handle);
        }
        for (_, load) in core::mem::take(&mut self.images) {
            load.detach();
        }
        self.items.clear();
        self.originals.clear();
        self.dots.clear();
        self.prev = None;
        self.next = None;
        self.list = None;
    }
}

/// Swaps the image into one element and clears its pending marker.
fn swap_one(el: &Element, src: &str) {
    if el.tag_name().eq_ignore_ascii_case("img") {
        let _ = el.set_attribute("src", src);
    } else if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html
            .style()
            .set_property("background-image", &format!("url(\"{src}\")"));
    }
    let _ = el.remove_attribute(dom::PENDING_SRC_ATTR);
}
