// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Looping image carousel with lazily loaded slides.
//!
//! On start the demo builds a carousel of seven slides whose images are
//! deferred with `data-slide-src`, then wires play, pause and destroy buttons
//! and a status line fed by `slideChanged`. Controller traces go to the
//! browser console.
//!
//! The [`SlideJs`] class is also exported so pages can initialize their own
//! carousels from JavaScript:
//!
//! ```js
//! const slider = new SlideJs(document.getElementById("gallery"), { loop: true });
//! slider.pause();
//! ```
//!
//! Build with: `wasm-pack build --target web demos/web_carousel`
//! Then serve `demos/web_carousel/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;

use slipway_backend_web::{Carousel, ConsoleSink, SLIDE_CHANGED, config_from_js};
use slipway_core::config::Config;
use slipway_core::time::Duration;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, Document, Event, HtmlElement};

const SLIDES: u32 = 7;
const SLIDE_W: u32 = 640;
const SLIDE_H: u32 = 360;

/// A carousel handle for JavaScript callers.
#[wasm_bindgen]
#[derive(Debug)]
pub struct SlideJs {
    carousel: Carousel,
}

#[wasm_bindgen]
impl SlideJs {
    /// Initializes a carousel on `element` with a plain options object.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, options: JsValue) -> Result<Self, JsValue> {
        let carousel = Carousel::initialize(element, config_from_js(&options))?;
        Ok(Self { carousel })
    }

    /// Starts or resumes autoplay.
    pub fn play(&self) {
        self.carousel.play();
    }

    /// Pauses autoplay.
    pub fn pause(&self) {
        self.carousel.pause();
    }

    /// Removes listeners and timers. Safe to call more than once.
    pub fn destroy(&self) {
        self.carousel.destroy();
    }

    /// 1-based index of the current slide.
    #[wasm_bindgen(getter, js_name = "currentIndex")]
    pub fn current_index(&self) -> Option<u32> {
        self.carousel.current_index()
    }
}

#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let body = document.body().ok_or("no body")?;

    let root = build_markup(&document)?;
    body.append_child(&root)?;

    let status: HtmlElement = document.create_element("p")?.unchecked_into();
    status.set_class_name("status");
    body.append_child(&status)?;

    let config = Config {
        autoplay: true,
        autoplay_interval: Duration::from_millis(3000),
        loop_enabled: true,
        lazy_load: true,
        ..Config::default()
    };
    let carousel = Rc::new(Carousel::initialize_with_sink(
        root.clone(),
        config,
        Box::new(ConsoleSink::new("carousel")),
    )?);

    let on_change = Closure::<dyn FnMut(Event)>::new({
        let status = status.clone();
        move |event: Event| {
            let Some(event) = event.dyn_ref::<CustomEvent>() else {
                return;
            };
            let detail = event.detail();
            let field = |key: &str| {
                js_sys::Reflect::get(&detail, &JsValue::from_str(key))
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0)
            };
            status.set_text_content(Some(&format!(
                "slide {} of {SLIDES} (position {})",
                field("index"),
                field("position"),
            )));
        }
    });
    root.add_event_listener_with_callback(SLIDE_CHANGED, on_change.as_ref().unchecked_ref())?;
    on_change.forget();

    let controls: HtmlElement = document.create_element("div")?.unchecked_into();
    controls.set_class_name("controls");
    body.append_child(&controls)?;

    add_button(&document, &controls, "Play", {
        let carousel = Rc::clone(&carousel);
        move || carousel.play()
    })?;
    add_button(&document, &controls, "Pause", {
        let carousel = Rc::clone(&carousel);
        move || carousel.pause()
    })?;
    add_button(&document, &controls, "Destroy", {
        let carousel = Rc::clone(&carousel);
        let status = status.clone();
        move || {
            carousel.destroy();
            status.set_text_content(Some("destroyed"));
        }
    })?;

    Ok(())
}

/// Builds the widget markup: a list of slides with deferred images and the
/// arrow container.
fn build_markup(document: &Document) -> Result<HtmlElement, JsValue> {
    let root: HtmlElement = document.create_element("div")?.unchecked_into();
    root.set_id("carousel");
    let list = document.create_element("ul")?;
    for i in 1..=SLIDES {
        let item: HtmlElement = document.create_element("li")?.unchecked_into();
        item.style()
            .set_property("width", &format!("{SLIDE_W}px"))?;
        let image = document.create_element("img")?;
        image.set_attribute("alt", &format!("slide {i}"))?;
        image.set_attribute("width", &format!("{SLIDE_W}"))?;
        image.set_attribute("height", &format!("{SLIDE_H}"))?;
        image.set_attribute("data-slide-src", &image_url(i))?;
        item.append_child(&image)?;
        list.append_child(&item)?;
    }
    root.append_child(&list)?;

    let arrows = document.create_element("div")?;
    arrows.set_class_name("nav-arrow");
    for side in ["prev", "next"] {
        let arrow = document.create_element("span")?;
        arrow.set_class_name(side);
        arrows.append_child(&arrow)?;
    }
    root.append_child(&arrows)?;
    Ok(root)
}

fn image_url(i: u32) -> String {
    format!("https://picsum.photos/seed/slipway{i}/{SLIDE_W}/{SLIDE_H}")
}

fn add_button(
    document: &Document,
    parent: &HtmlElement,
    label: &str,
    mut on_click: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    let button: HtmlElement = document.create_element("button")?.unchecked_into();
    button.set_text_content(Some(label));
    let closure = Closure::<dyn FnMut()>::new(move || on_click());
    button.set_onclick(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
    parent.append_child(&button)?;
    Ok(())
}
