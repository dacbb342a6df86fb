// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading a [`Config`] from a JS options object.
//!
//! Recognized keys: `autoplay`, `autoplaySpeed`, `transitionSpeed`, `arrows`,
//! `dots`, `loop`, `lazyLoad`, `pauseOnHover`, `keyboard`, `firstElement`,
//! and `hideSingleDot`. Missing or ill-typed keys keep their defaults.

use slipway_core::config::Config;
use slipway_core::time::Duration;
use wasm_bindgen::JsValue;

/// Builds a [`Config`] from `options`.
///
/// `undefined`, `null` and non-objects yield [`Config::default`].
#[must_use]
pub fn config_from_js(options: &JsValue) -> Config {
    let mut config = Config::default();
    if !options.is_object() {
        return config;
    }
    let get = |key: &str| js_sys::Reflect::get(options, &JsValue::from_str(key)).ok();
    let flag = |key: &str| get(key).and_then(|v| v.as_bool());
    let number = |key: &str| get(key).and_then(|v| v.as_f64());

    if let Some(v) = flag("autoplay") {
        config.autoplay = v;
    }
    if let Some(v) = millis(number("autoplaySpeed")) {
        config.autoplay_interval = v;
    }
    if let Some(v) = millis(number("transitionSpeed")) {
        config.transition_duration = v;
    }
    if let Some(v) = flag("arrows") {
        config.arrows = v;
    }
    if let Some(v) = flag("dots") {
        config.dots = v;
    }
    if let Some(v) = flag("hideSingleDot") {
        config.hide_single_dot = v;
    }
    if let Some(v) = flag("loop") {
        config.loop_enabled = v;
    }
    if let Some(v) = flag("lazyLoad") {
        config.lazy_load = v;
    }
    if let Some(v) = flag("pauseOnHover") {
        config.pause_on_hover = v;
    }
    if let Some(v) = flag("keyboard") {
        config.keyboard = v;
    }
    if let Some(v) = slide_index(number("firstElement")) {
        config.first_element = v;
    }
    config
}

/// A non-negative, finite millisecond count, rounded to the nearest
/// millisecond.
pub(crate) fn millis(value: Option<f64>) -> Option<Duration> {
    let ms = value.filter(|v| v.is_finite() && *v >= 0.0)?;
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is finite and non-negative; `as` saturates"
    )]
    let ms = (ms + 0.5) as u64;
    Some(Duration::from_millis(ms))
}

/// A 1-based slide index. Zero and fractions are rejected.
pub(crate) fn slide_index(value: Option<f64>) -> Option<u32> {
    let n = value.filter(|v| v.is_finite() && *v >= 1.0)?;
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is finite and positive; `as` saturates"
    )]
    let index = n as u32;
    (f64::from(index) == n).then_some(index)
}
