// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace events to the browser console.

use alloc::format;
use alloc::string::String;

use reeltime_core::trace::{
    BannerEvent, CueEvent, FaultEvent, PickEvent, RecordsLoadedEvent, RemoveEvent, SpawnEvent,
    TickEvent, TraceSink,
};
use wasm_bindgen::JsValue;
use web_sys::console;

const PREFIX: &str = "[reeltime]";

/// A [`TraceSink`] that writes one console line per event.
///
/// Faults go to `console.warn`, ticks to `console.debug` (hidden by default
/// in most devtools), everything else to `console.log`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    /// Skip tick lines entirely.
    pub quiet_ticks: bool,
}

impl ConsoleSink {
    /// Creates a sink that logs every event.
    #[must_use]
    pub const fn new() -> Self {
        Self { quiet_ticks: false }
    }
}

fn log(line: &str) {
    console::log_1(&JsValue::from_str(line));
}

impl TraceSink for ConsoleSink {
    fn on_tick(&mut self, e: &TickEvent) {
        if !self.quiet_ticks {
            console::debug_1(&JsValue::from_str(&tick_line(e)));
        }
    }

    fn on_records_loaded(&mut self, e: &RecordsLoadedEvent<'_>) {
        log(&format!(
            "{PREFIX} loaded {} records from {} ({} skipped)",
            e.count, e.source, e.skipped
        ));
    }

    fn on_fault(&mut self, e: &FaultEvent<'_>) {
        console::warn_1(&JsValue::from_str(&fault_line(e)));
    }

    fn on_cue(&mut self, e: &CueEvent<'_>) {
        log(&format!(
            "{PREFIX} {} matches {}",
            e.locator,
            e.clock.display(e.hour_cycle)
        ));
    }

    fn on_spawn(&mut self, e: &SpawnEvent<'_>) {
        log(&format!(
            "{PREFIX} spawned #{} {} at {} {} ({} live)",
            e.id.0,
            e.locator,
            e.placement.css_top(),
            e.placement.css_left(),
            e.live
        ));
    }

    fn on_remove(&mut self, e: &RemoveEvent) {
        if e.found {
            log(&format!("{PREFIX} removed #{} ({} live)", e.id.0, e.live));
        } else {
            log(&format!("{PREFIX} #{} was already gone", e.id.0));
        }
    }

    fn on_pick(&mut self, e: &PickEvent<'_>) {
        log(&format!(
            "{PREFIX} picked {} ({} of {})",
            e.locator,
            e.index + 1,
            e.count
        ));
    }

    fn on_banner(&mut self, e: &BannerEvent<'_>) {
        if e.found {
            log(&format!("{PREFIX} dismissed #{}", e.element_id));
        }
    }
}

fn tick_line(e: &TickEvent) -> String {
    format!(
        "{PREFIX} tick {} {}",
        e.tick_index,
        e.clock.display(e.hour_cycle)
    )
}

fn fault_line(e: &FaultEvent<'_>) -> String {
    format!(
        "{PREFIX} {} failed for {}: {}",
        e.kind.as_str(),
        e.subject,
        e.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use reeltime_core::trace::FaultKind;
    use reeltime_core::zone::{ClockTime, HourCycle};

    #[test]
    fn tick_line_renders_the_clock() {
        let line = tick_line(&TickEvent {
            tick_index: 7,
            clock: ClockTime::MIDNIGHT,
            hour_cycle: HourCycle::H24,
        });
        assert_eq!(line, "[reeltime] tick 7 24:00:00");
    }

    #[test]
    fn fault_line_names_kind_and_subject() {
        let line = fault_line(&FaultEvent {
            kind: FaultKind::Fetch,
            subject: "./video_metadata.json",
            message: "HTTP 404",
        });
        assert_eq!(
            line,
            "[reeltime] fetch failed for ./video_metadata.json: HTTP 404"
        );
    }
}
