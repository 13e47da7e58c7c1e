// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-matched player.
//!
//! Once a second, reads the New York wall clock and plays every clip from the
//! metadata document whose recording time shows the same hour, minute and
//! second. Each clip is placed at a random spot in the container, plays once
//! muted, and removes itself when it ends. A disclaimer banner is dismissed
//! after a configurable delay.
//!
//! Build with: `wasm-pack build --target web demos/time_matched`
//! Then serve `demos/time_matched/` next to `video_metadata.json` and open
//! `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::cell::RefCell;

use chrono::{DateTime, Utc};
use rand::rngs::SmallRng;
use reeltime_backend_web::{
    CONFIG_ELEMENT_ID, ClipPresenter, ConsoleSink, TimeoutLoop, WebError, after, fetch_text,
    load_page_config, remove_element_by_id,
};
use reeltime_core::config::{BannerConfig, PlayerConfig};
use reeltime_core::instance::{InstanceId, Spawner};
use reeltime_core::record::parse_records;
use reeltime_core::schedule::{MatchScheduler, TickPlan};
use reeltime_core::trace::{
    BannerEvent, CueEvent, FaultEvent, FaultKind, RecordsLoadedEvent, RemoveEvent, SpawnEvent,
    TickEvent, Tracer,
};
use reeltime_core::zone::HourCycle;
use wasm_bindgen::prelude::*;

struct Player {
    config: PlayerConfig,
    scheduler: MatchScheduler,
    spawner: Spawner,
    /// Looked up on the first cue, so a page without the container still
    /// ticks and reports.
    presenter: Option<ClipPresenter>,
    rng: SmallRng,
    sink: ConsoleSink,
}

/// Entry point for the time-matched player.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    let mut sink = ConsoleSink::new();
    let config = load_page_config(
        CONFIG_ELEMENT_ID,
        PlayerConfig::from_json,
        &mut Tracer::new(&mut sink),
    );

    if let Some(banner) = config.banner.clone() {
        dismiss_banner_later(banner, sink);
    }

    let scheduler = MatchScheduler::new(config.scheduler, config.clock_format());
    let spawner = Spawner::new(config.placement).with_max_live(config.max_live);
    let period_ms = config.scheduler.tick_period_ms;
    let player = Rc::new(RefCell::new(Player {
        config,
        scheduler,
        spawner,
        presenter: None,
        rng: reeltime_backend_web::seeded_rng(),
        sink,
    }));

    let timer = TimeoutLoop::new(period_ms, move || tick(Rc::clone(&player)));
    timer.start();

    // Keep the loop alive for the lifetime of the page.
    core::mem::forget(timer);
}

fn dismiss_banner_later(banner: BannerConfig, mut sink: ConsoleSink) {
    after(banner.delay_ms, move || {
        let found = remove_element_by_id(&banner.element_id);
        Tracer::new(&mut sink).banner(&BannerEvent {
            element_id: &banner.element_id,
            found,
        });
    });
}

async fn tick(player: Rc<RefCell<Player>>) {
    // Sampled before the fetch: the clip list is compared with the second in
    // which the tick started.
    let now = reeltime_backend_web::now();

    let refresh = {
        let p = player.borrow();
        p.scheduler
            .needs_refresh(now)
            .then(|| p.config.metadata_path.clone())
    };
    if let Some(path) = refresh {
        let fetched = fetch_text(&path).await;
        reload(&mut player.borrow_mut(), &path, fetched, now);
    }

    let plan = player.borrow_mut().scheduler.tick(now);
    play(&player, &plan);
}

fn reload(
    p: &mut Player,
    path: &str,
    fetched: Result<String, WebError>,
    now: DateTime<Utc>,
) {
    let zone = p.scheduler.format().zone;
    let mut tracer = Tracer::new(&mut p.sink);
    let parsed = fetched.and_then(|text| parse_records(&text, &zone).map_err(WebError::from));
    match parsed {
        Ok(set) => {
            tracer.records_loaded(&RecordsLoadedEvent {
                source: path,
                count: set.records.len(),
                skipped: set.skipped,
            });
            p.scheduler.install(set.records, now);
        }
        Err(err) => {
            err.report(&mut tracer, FaultKind::Fetch, path);
            p.scheduler.refresh_failed();
        }
    }
}

fn play(player: &Rc<RefCell<Player>>, plan: &TickPlan) {
    let mut guard = player.borrow_mut();
    let p = &mut *guard;
    let hour_cycle: HourCycle = p.config.hour_cycle;
    let mut tracer = Tracer::new(&mut p.sink);

    tracer.tick(&TickEvent {
        tick_index: plan.tick_index,
        clock: plan.clock,
        hour_cycle,
    });
    if plan.cues.is_empty() {
        return;
    }

    if p.presenter.is_none() {
        match ClipPresenter::from_selector(&p.config.container_selector) {
            Ok(presenter) => p.presenter = Some(presenter),
            Err(err) => {
                err.report(
                    &mut tracer,
                    FaultKind::MissingElement,
                    &p.config.container_selector,
                );
                return;
            }
        }
    }
    let Some(presenter) = &p.presenter else {
        return;
    };

    for cue in &plan.cues {
        tracer.cue(&CueEvent {
            tick_index: plan.tick_index,
            clock: cue.clock,
            hour_cycle,
            locator: &cue.locator,
        });

        let Some(spec) = p.spawner.spawn(&cue.locator, &mut p.rng) else {
            tracer.fault(&FaultEvent {
                kind: FaultKind::LiveLimit,
                subject: &cue.locator,
                message: "live clip limit reached, cue dropped",
            });
            continue;
        };
        let weak = Rc::downgrade(player);
        match presenter.spawn(&spec, move |id, found| clip_ended(&weak, id, found)) {
            Ok(()) => tracer.spawn(&SpawnEvent {
                id: spec.id,
                locator: &spec.locator,
                placement: spec.placement,
                live: p.spawner.live(),
            }),
            Err(err) => {
                p.spawner.release(spec.id);
                err.report(&mut tracer, FaultKind::Present, &spec.locator);
            }
        }
    }
}

fn clip_ended(player: &Weak<RefCell<Player>>, id: InstanceId, found: bool) {
    let Some(player) = player.upgrade() else {
        return;
    };
    let mut guard = player.borrow_mut();
    let p = &mut *guard;
    p.spawner.release(id);
    Tracer::new(&mut p.sink).remove(&RemoveEvent {
        id,
        found,
        live: p.spawner.live(),
    });
}
