// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Random looping player.
//!
//! Fetches the locator list once, picks one entry uniformly at random and
//! plays it muted and looping in the container for the life of the page.
//!
//! Build with: `wasm-pack build --target web demos/random_loop`
//! Then serve `demos/random_loop/` next to `video_list.json` and open
//! `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use reeltime_backend_web::{
    CONFIG_ELEMENT_ID, ClipPresenter, ConsoleSink, WebError, fetch_text, load_page_config,
};
use reeltime_core::config::LoopConfig;
use reeltime_core::instance::LoopSpec;
use reeltime_core::pick::pick;
use reeltime_core::record::parse_locators;
use reeltime_core::trace::{FaultEvent, FaultKind, PickEvent, RecordsLoadedEvent, Tracer};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Entry point for the random looping player.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    spawn_local(async {
        let mut sink = ConsoleSink::new();
        let mut tracer = Tracer::new(&mut sink);
        let config = load_page_config(CONFIG_ELEMENT_ID, LoopConfig::from_json, &mut tracer);
        run(&config, &mut tracer).await;
    });
}

async fn run(config: &LoopConfig, tracer: &mut Tracer<'_>) {
    let path = &config.locators_path;
    let locators = match fetch_text(path).await {
        Ok(text) => match parse_locators(&text) {
            Ok(locators) => locators,
            Err(err) => return WebError::from(err).report(tracer, FaultKind::Parse, path),
        },
        Err(err) => return err.report(tracer, FaultKind::Fetch, path),
    };
    tracer.records_loaded(&RecordsLoadedEvent {
        source: path,
        count: locators.len(),
        skipped: 0,
    });

    let mut rng = reeltime_backend_web::seeded_rng();
    let Some((index, locator)) = pick(&locators, &mut rng) else {
        tracer.fault(&FaultEvent {
            kind: FaultKind::Parse,
            subject: path,
            message: "locator list is empty",
        });
        return;
    };
    tracer.pick(&PickEvent {
        index,
        count: locators.len(),
        locator,
    });

    let selector = &config.container_selector;
    let presenter = match ClipPresenter::from_selector(selector) {
        Ok(presenter) => presenter,
        Err(err) => return err.report(tracer, FaultKind::MissingElement, selector),
    };
    if let Err(err) = presenter.attach_loop(&LoopSpec::new(locator.as_str())) {
        err.report(tracer, FaultKind::Present, locator);
    }
}
