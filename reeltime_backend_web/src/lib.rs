// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for reeltime.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`TimeoutLoop`]: self-rearming `setTimeout` tick source
//! - [`after`]: one-shot `setTimeout`
//! - [`fetch_text`]: HTTP GET of a data file
//! - [`ClipPresenter`]: `<video>` element management
//! - [`ConsoleSink`]: trace events to the browser console
//! - [`load_page_config`]: inline JSON configuration

#![no_std]

extern crate alloc;

mod console;
mod error;
mod fetch;
mod page;
mod presenter;
mod timer;

pub use console::ConsoleSink;
pub use error::WebError;
pub use fetch::fetch_text;
pub use page::{CONFIG_ELEMENT_ID, load_page_config};
pub use presenter::{ClipPresenter, remove_element_by_id};
pub use timer::{TimeoutLoop, after};

use chrono::{DateTime, Utc};
use rand::SeedableRng as _;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Date, js_name = "now")]
    fn date_now() -> f64;

    #[wasm_bindgen(js_namespace = Math, js_name = "random")]
    fn math_random() -> f64;
}

/// Returns the current wall-clock time from `Date.now()`.
#[must_use]
pub fn now() -> DateTime<Utc> {
    from_epoch_millis(date_now())
}

/// Returns a small fast RNG seeded from `Math.random()`.
///
/// Placement and selection need uniformity, not unpredictability, so two
/// `Math.random()` draws are enough seed material.
#[must_use]
pub fn seeded_rng() -> SmallRng {
    SmallRng::seed_from_u64(seed_from_units(math_random(), math_random()))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Date.now() is an integral millisecond count well inside i64"
)]
fn from_epoch_millis(ms: f64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms as i64).unwrap_or_default()
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "unit samples are in [0, 1); scaling to 2^32 keeps them in u32 range"
)]
fn seed_from_units(a: f64, b: f64) -> u64 {
    let hi = (a * 4_294_967_296.0) as u32;
    let lo = (b * 4_294_967_296.0) as u32;
    (u64::from(hi) << 32) | u64::from(lo)
}
