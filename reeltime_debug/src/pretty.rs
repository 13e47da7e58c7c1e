// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use reeltime_core::trace::{
    BannerEvent, CueEvent, FaultEvent, PickEvent, RecordsLoadedEvent, RemoveEvent, SpawnEvent,
    TickEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    quiet_ticks: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("quiet_ticks", &self.quiet_ticks)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            quiet_ticks: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            quiet_ticks: false,
        }
    }

    /// Suppresses `[tick]` lines, which dominate a day-long simulation.
    #[must_use]
    pub fn quiet_ticks(mut self, quiet: bool) -> Self {
        self.quiet_ticks = quiet;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_tick(&mut self, e: &TickEvent) {
        if self.quiet_ticks {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[tick] #{} clock={}",
            e.tick_index,
            e.clock.display(e.hour_cycle),
        );
    }

    fn on_records_loaded(&mut self, e: &RecordsLoadedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[load] {} records={} skipped={}",
            e.source, e.count, e.skipped,
        );
    }

    fn on_fault(&mut self, e: &FaultEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[fault:{}] {}: {}",
            e.kind.as_str(),
            e.subject,
            e.message,
        );
    }

    fn on_cue(&mut self, e: &CueEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[cue] #{} {} matches {}",
            e.tick_index,
            e.locator,
            e.clock.display(e.hour_cycle),
        );
    }

    fn on_spawn(&mut self, e: &SpawnEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[spawn] id={} {} top={:.2}vh left={:.2}vw live={}",
            e.id.0, e.locator, e.placement.top_vh, e.placement.left_vw, e.live,
        );
    }

    fn on_remove(&mut self, e: &RemoveEvent) {
        let found = if e.found { "removed" } else { "absent" };
        let _ = writeln!(
            self.writer,
            "[remove] id={} {found} live={}",
            e.id.0, e.live,
        );
    }

    fn on_pick(&mut self, e: &PickEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[pick] {} ({}/{})",
            e.locator, e.index, e.count,
        );
    }

    fn on_banner(&mut self, e: &BannerEvent<'_>) {
        let found = if e.found { "removed" } else { "absent" };
        let _ = writeln!(self.writer, "[banner] #{} {found}", e.element_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reeltime_core::instance::InstanceId;
    use reeltime_core::placement::Placement;
    use reeltime_core::trace::FaultKind;
    use reeltime_core::zone::{ClockTime, HourCycle};

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_tick() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_tick(&TickEvent {
            tick_index: 4,
            clock: ClockTime::MIDNIGHT,
            hour_cycle: HourCycle::H24,
        });
        let out = output(sink);
        assert_eq!(out, "[tick] #4 clock=24:00:00\n");
    }

    #[test]
    fn quiet_ticks_drops_only_ticks() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new()).quiet_ticks(true);
        sink.on_tick(&TickEvent {
            tick_index: 0,
            clock: ClockTime::MIDNIGHT,
            hour_cycle: HourCycle::H23,
        });
        sink.on_cue(&CueEvent {
            tick_index: 0,
            clock: ClockTime::new(10, 0, 0).unwrap(),
            hour_cycle: HourCycle::H23,
            locator: "a.mp4",
        });
        let out = output(sink);
        assert_eq!(out, "[cue] #0 a.mp4 matches 10:00:00\n");
    }

    #[test]
    fn pretty_print_spawn_and_fault() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_spawn(&SpawnEvent {
            id: InstanceId(7),
            locator: "a.mp4",
            placement: Placement {
                top_vh: 1.5,
                left_vw: -3.0,
            },
            live: 2,
        });
        sink.on_fault(&FaultEvent {
            kind: FaultKind::Fetch,
            subject: "./video_metadata.json",
            message: "HTTP 404",
        });
        let out = output(sink);
        assert!(
            out.contains("[spawn] id=7 a.mp4 top=1.50vh left=-3.00vw live=2"),
            "got: {out}"
        );
        assert!(
            out.contains("[fault:fetch] ./video_metadata.json: HTTP 404"),
            "got: {out}"
        );
    }

    #[test]
    fn pretty_print_dropped_cue() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_fault(&FaultEvent {
            kind: FaultKind::LiveLimit,
            subject: "b.mp4",
            message: "live clip limit reached, cue dropped",
        });
        let out = output(sink);
        assert_eq!(
            out,
            "[fault:live-limit] b.mp4: live clip limit reached, cue dropped\n"
        );
    }
}
