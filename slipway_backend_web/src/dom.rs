// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small DOM helpers shared by the host and the tween.

use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement};

/// Class names used in the widget markup.
pub(crate) mod class {
    pub(crate) const WRAPPER: &str = "slide-js-wrapper";
    pub(crate) const VIEWPORT: &str = "slide-js-list";
    pub(crate) const ARROWS: &str = "nav-arrow";
    pub(crate) const PREV: &str = "prev";
    pub(crate) const NEXT: &str = "next";
    pub(crate) const DOT_SECTION: &str = "nav-dot-section";
    pub(crate) const DOT: &str = "nav-dot";
    pub(crate) const ACTIVE: &str = "active";
    pub(crate) const DISABLED: &str = "disabled";
    pub(crate) const BEFORE: &str = "-before";
    pub(crate) const AFTER: &str = "-after";
}

/// Attribute carrying an item's 1-based slide index.
pub(crate) const SLIDE_INDEX_ATTR: &str = "data-slide-index";

/// Attribute marking an element whose image is deferred.
pub(crate) const PENDING_SRC_ATTR: &str = "data-slide-src";

pub(crate) fn element(doc: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element(tag)?.unchecked_into())
}

/// `scrollLeft` as a float. Browsers may report fractional offsets.
pub(crate) fn scroll_left(el: &Element) -> f64 {
    js_sys::Reflect::get(el, &JsValue::from_str("scrollLeft"))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub(crate) fn set_scroll_left(el: &Element, offset: f64) {
    let _ = js_sys::Reflect::set(
        el,
        &JsValue::from_str("scrollLeft"),
        &JsValue::from_f64(offset),
    );
}

pub(crate) fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

/// Element children of `parent` that are `HtmlElement`s, in document order.
pub(crate) fn children(parent: &Element) -> Vec<HtmlElement> {
    let list = parent.children();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Every element under `root` matching `selector`, `root` included.
pub(crate) fn select_all(root: &Element, selector: &str) -> Vec<Element> {
    let mut out = Vec::new();
    if root.matches(selector).unwrap_or(false) {
        out.push(root.clone());
    }
    if let Ok(nodes) = root.query_selector_all(selector) {
        out.extend(
            (0..nodes.length())
                .filter_map(|i| nodes.item(i))
                .filter_map(|node| node.dyn_into::<Element>().ok()),
        );
    }
    out
}

/// Parses a computed CSS length such as `"12px"`. Anything else is zero.
pub(crate) fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .strip_suffix("px")
        .and_then(|n| n.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_lengths() {
        assert!((parse_px("12px") - 12.0).abs() < f64::EPSILON);
        assert!((parse_px(" 0.5px ") - 0.5).abs() < f64::EPSILON);
        assert!((parse_px("-4px") + 4.0).abs() < f64::EPSILON);
        assert!(parse_px("auto").abs() < f64::EPSILON);
        assert!(parse_px("").abs() < f64::EPSILON);
        assert!(parse_px("1em").abs() < f64::EPSILON);
    }
}
