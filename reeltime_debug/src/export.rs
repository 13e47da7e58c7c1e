// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded events.
//!
//! [`export_json`] writes the events of a [`RecorderSink`](super::recorder::RecorderSink)
//! as a JSON array with one object per event. Every object carries an
//! `"event"` name; clock times are rendered the way the player shows them.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::RecordedEvent;

/// Writes `events` as a pretty-printed JSON array.
pub fn export_json(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events.iter().map(to_value).collect();
    serde_json::to_writer_pretty(writer, &values)?;
    Ok(())
}

fn to_value(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Tick {
            tick_index,
            clock,
            hour_cycle,
        } => json!({
            "event": "tick",
            "tick": tick_index,
            "clock": clock.display(*hour_cycle).to_string(),
        }),
        RecordedEvent::RecordsLoaded {
            source,
            count,
            skipped,
        } => json!({
            "event": "records_loaded",
            "source": source,
            "count": count,
            "skipped": skipped,
        }),
        RecordedEvent::Fault {
            kind,
            subject,
            message,
        } => json!({
            "event": "fault",
            "kind": kind.as_str(),
            "subject": subject,
            "message": message,
        }),
        RecordedEvent::Cue {
            tick_index,
            clock,
            hour_cycle,
            locator,
        } => json!({
            "event": "cue",
            "tick": tick_index,
            "clock": clock.display(*hour_cycle).to_string(),
            "locator": locator,
        }),
        RecordedEvent::Spawn {
            id,
            locator,
            placement,
            live,
        } => json!({
            "event": "spawn",
            "id": id.0,
            "locator": locator,
            "top": placement.css_top(),
            "left": placement.css_left(),
            "live": live,
        }),
        RecordedEvent::Remove { id, found, live } => json!({
            "event": "remove",
            "id": id.0,
            "found": found,
            "live": live,
        }),
        RecordedEvent::Pick {
            index,
            count,
            locator,
        } => json!({
            "event": "pick",
            "index": index,
            "count": count,
            "locator": locator,
        }),
        RecordedEvent::Banner { element_id, found } => json!({
            "event": "banner",
            "element_id": element_id,
            "found": found,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use reeltime_core::trace::{CueEvent, FaultEvent, FaultKind, TickEvent, TraceSink};
    use reeltime_core::zone::{ClockTime, HourCycle};

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_tick(&TickEvent {
            tick_index: 0,
            clock: ClockTime::new(10, 0, 0).unwrap(),
            hour_cycle: HourCycle::H24,
        });
        rec.on_cue(&CueEvent {
            tick_index: 0,
            clock: ClockTime::new(10, 0, 0).unwrap(),
            hour_cycle: HourCycle::H24,
            locator: "a.mp4",
        });
        rec.on_fault(&FaultEvent {
            kind: FaultKind::Parse,
            subject: "./video_metadata.json",
            message: "expected a JSON array",
        });

        let mut out = Vec::new();
        export_json(rec.events(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["event"], "tick");
        assert_eq!(parsed[0]["clock"], "10:00:00");

        assert_eq!(parsed[1]["event"], "cue");
        assert_eq!(parsed[1]["locator"], "a.mp4");

        assert_eq!(parsed[2]["event"], "fault");
        assert_eq!(parsed[2]["kind"], "parse");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export_json(&[], &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
    }
}
