// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps an owned copy of every
//! event as a [`RecordedEvent`], in arrival order.

use reeltime_core::instance::InstanceId;
use reeltime_core::placement::Placement;
use reeltime_core::trace::{
    BannerEvent, CueEvent, FaultEvent, FaultKind, PickEvent, RecordsLoadedEvent, RemoveEvent,
    SpawnEvent, TickEvent, TraceSink,
};
use reeltime_core::zone::{ClockTime, HourCycle};

/// An owned trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// See [`TickEvent`].
    Tick {
        /// Tick counter.
        tick_index: u64,
        /// Clock time.
        clock: ClockTime,
        /// Hour rendering.
        hour_cycle: HourCycle,
    },
    /// See [`RecordsLoadedEvent`].
    RecordsLoaded {
        /// Data file path.
        source: String,
        /// Usable entries.
        count: usize,
        /// Dropped entries.
        skipped: usize,
    },
    /// See [`FaultEvent`].
    Fault {
        /// Failure category.
        kind: FaultKind,
        /// What was being attempted.
        subject: String,
        /// Cause.
        message: String,
    },
    /// See [`CueEvent`].
    Cue {
        /// Tick counter.
        tick_index: u64,
        /// Matching clock time.
        clock: ClockTime,
        /// Hour rendering.
        hour_cycle: HourCycle,
        /// Clip locator.
        locator: String,
    },
    /// See [`SpawnEvent`].
    Spawn {
        /// Clip handle.
        id: InstanceId,
        /// Clip locator.
        locator: String,
        /// Placement.
        placement: Placement,
        /// Clips on screen.
        live: usize,
    },
    /// See [`RemoveEvent`].
    Remove {
        /// Clip handle.
        id: InstanceId,
        /// Whether an element was detached.
        found: bool,
        /// Clips on screen.
        live: usize,
    },
    /// See [`PickEvent`].
    Pick {
        /// Chosen index.
        index: usize,
        /// Candidates.
        count: usize,
        /// Chosen locator.
        locator: String,
    },
    /// See [`BannerEvent`].
    Banner {
        /// Banner element id.
        element_id: String,
        /// Whether it was present.
        found: bool,
    },
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Number of cue events recorded.
    #[must_use]
    pub fn cue_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::Cue { .. }))
            .count()
    }
}

impl TraceSink for RecorderSink {
    fn on_tick(&mut self, e: &TickEvent) {
        self.events.push(RecordedEvent::Tick {
            tick_index: e.tick_index,
            clock: e.clock,
            hour_cycle: e.hour_cycle,
        });
    }

    fn on_records_loaded(&mut self, e: &RecordsLoadedEvent<'_>) {
        self.events.push(RecordedEvent::RecordsLoaded {
            source: e.source.into(),
            count: e.count,
            skipped: e.skipped,
        });
    }

    fn on_fault(&mut self, e: &FaultEvent<'_>) {
        self.events.push(RecordedEvent::Fault {
            kind: e.kind,
            subject: e.subject.into(),
            message: e.message.into(),
        });
    }

    fn on_cue(&mut self, e: &CueEvent<'_>) {
        self.events.push(RecordedEvent::Cue {
            tick_index: e.tick_index,
            clock: e.clock,
            hour_cycle: e.hour_cycle,
            locator: e.locator.into(),
        });
    }

    fn on_spawn(&mut self, e: &SpawnEvent<'_>) {
        self.events.push(RecordedEvent::Spawn {
            id: e.id,
            locator: e.locator.into(),
            placement: e.placement,
            live: e.live,
        });
    }

    fn on_remove(&mut self, e: &RemoveEvent) {
        self.events.push(RecordedEvent::Remove {
            id: e.id,
            found: e.found,
            live: e.live,
        });
    }

    fn on_pick(&mut self, e: &PickEvent<'_>) {
        self.events.push(RecordedEvent::Pick {
            index: e.index,
            count: e.count,
            locator: e.locator.into(),
        });
    }

    fn on_banner(&mut self, e: &BannerEvent<'_>) {
        self.events.push(RecordedEvent::Banner {
            element_id: e.element_id.into(),
            found: e.found,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_arrival_order() {
        let mut rec = RecorderSink::new();
        rec.on_records_loaded(&RecordsLoadedEvent {
            source: "./video_metadata.json",
            count: 3,
            skipped: 1,
        });
        rec.on_cue(&CueEvent {
            tick_index: 9,
            clock: ClockTime::new(10, 0, 0).unwrap(),
            hour_cycle: HourCycle::H24,
            locator: "a.mp4",
        });
        rec.on_remove(&RemoveEvent {
            id: InstanceId(1),
            found: true,
            live: 0,
        });

        assert_eq!(rec.cue_count(), 1);
        let events = rec.into_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            RecordedEvent::RecordsLoaded { count: 3, skipped: 1, .. }
        ));
        assert_eq!(
            events[1],
            RecordedEvent::Cue {
                tick_index: 9,
                clock: ClockTime::new(10, 0, 0).unwrap(),
                hour_cycle: HourCycle::H24,
                locator: "a.mp4".into(),
            }
        );
        assert!(matches!(
            events[2],
            RecordedEvent::Remove { found: true, .. }
        ));
    }
}
