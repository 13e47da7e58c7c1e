// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Player data sources.
//!
//! The time-matched player reads a JSON array of objects like
//!
//! ```json
//! [{ "video": "./vid/a.webm", "creation_date": "2024-01-01T10:00:00", "location": "+40.76-073.92/" }]
//! ```
//!
//! and the looping player reads a JSON array of locator strings. Both are
//! parsed here into owned, immutable values.

use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;
use crate::zone::ZoneRule;

/// Formats accepted for recording times without a UTC offset.
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// One clip and the moment it was recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoRecord {
    /// Path or URL of the media resource.
    pub locator: String,
    /// Recording instant.
    pub recorded_at: DateTime<Utc>,
    /// Capture location as written by the metadata extractor, if any.
    pub location: Option<String>,
}

/// The parsed contents of a metadata document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordSet {
    /// Usable records, in document order.
    pub records: Vec<VideoRecord>,
    /// Number of entries dropped for a missing locator or an unusable
    /// recording time.
    pub skipped: usize,
}

#[derive(Deserialize)]
struct RawRecord {
    video: String,
    #[serde(default)]
    creation_date: Option<RawDate>,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Millis(i64),
}

/// Parses a metadata document into a [`RecordSet`].
///
/// Recording times without an offset are read as wall time in `zone`.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed JSON and
/// [`LoadError::NotAnArray`] when the top-level value is not an array.
pub fn parse_records(json: &str, zone: &ZoneRule) -> Result<RecordSet, LoadError> {
    let Value::Array(entries) = serde_json::from_str::<Value>(json)? else {
        return Err(LoadError::NotAnArray);
    };

    let mut set = RecordSet::default();
    for entry in entries {
        let record = RawRecord::deserialize(entry).ok().and_then(|raw| {
            let recorded_at = match raw.creation_date? {
                RawDate::Text(text) => parse_recorded_at(&text, zone)?,
                RawDate::Millis(ms) => DateTime::from_timestamp_millis(ms)?,
            };
            // Instants with no wall time in the zone cannot be matched.
            zone.to_local(recorded_at)?;
            Some(VideoRecord {
                locator: raw.video,
                recorded_at,
                location: raw.location,
            })
        });
        match record {
            Some(record) => set.records.push(record),
            None => set.skipped += 1,
        }
    }
    Ok(set)
}

/// Parses a recording timestamp.
///
/// Accepts RFC 3339 (`2024-01-01T15:00:00Z`, `2024-01-01T10:00:00-05:00`),
/// date-times without an offset (read as wall time in `zone`) and bare dates
/// (read as UTC midnight).
#[must_use]
pub fn parse_recorded_at(text: &str, zone: &ZoneRule) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(text, fmt) {
            return zone.from_local(local);
        }
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Parses a locator list.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed JSON, [`LoadError::NotAnArray`]
/// when the top-level value is not an array and [`LoadError::InvalidEntry`]
/// for the first entry that is not a string.
pub fn parse_locators(json: &str) -> Result<Vec<String>, LoadError> {
    let Value::Array(entries) = serde_json::from_str::<Value>(json)? else {
        return Err(LoadError::NotAnArray);
    };
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::String(locator) => Ok(locator),
            _ => Err(LoadError::InvalidEntry { index }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn ny() -> ZoneRule {
        ZoneRule::america_new_york()
    }

    #[test]
    fn parses_the_documented_shape() {
        let json = r#"[
            {"video": "./vid/a.webm", "creation_date": "2024-01-01T10:00:00", "location": "+40.7644-073.9235/"},
            {"video": "./vid/b.webm", "creation_date": "2024-01-01T15:00:01Z"}
        ]"#;
        let set = parse_records(json, &ny()).unwrap();
        assert_eq!(set.skipped, 0);
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.records[0].locator, "./vid/a.webm");
        assert_eq!(
            set.records[0].recorded_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap()
        );
        assert_eq!(set.records[0].location.as_deref(), Some("+40.7644-073.9235/"));
        assert_eq!(set.records[1].location, None);
    }

    #[test]
    fn skips_entries_without_usable_times() {
        let json = r#"[
            {"video": "a.mp4"},
            {"video": "b.mp4", "creation_date": "not a date"},
            {"creation_date": "2024-01-01T10:00:00"},
            {"video": "c.mp4", "creation_date": "2024-01-01T10:00:00"},
            42
        ]"#;
        let set = parse_records(json, &ny()).unwrap();
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.records[0].locator, "c.mp4");
        assert_eq!(set.skipped, 4);
    }

    #[test]
    fn ignores_unknown_fields() {
        let json = r#"[{"video": "a.mp4", "creation_date": "2024-01-01", "inside_polygon": true, "checksum": "ab"}]"#;
        let set = parse_records(json, &ny()).unwrap();
        assert_eq!(set.records.len(), 1);
    }

    #[test]
    fn accepts_millisecond_timestamps() {
        let json = r#"[{"video": "a.mp4", "creation_date": 1704121200000}]"#;
        let set = parse_records(json, &ny()).unwrap();
        assert_eq!(
            set.records[0].recorded_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn skips_millisecond_timestamps_without_a_wall_time() {
        let min = DateTime::<Utc>::MIN_UTC.timestamp_millis();
        let max = DateTime::<Utc>::MAX_UTC.timestamp_millis();
        let json = alloc::format!(
            r#"[{{"video": "a.mp4", "creation_date": {min}}}, {{"video": "b.mp4", "creation_date": {max}}}]"#
        );
        let set = parse_records(&json, &ny()).unwrap();
        assert_eq!(set.skipped, 1);
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.records[0].locator, "b.mp4");
    }

    #[test]
    fn rejects_non_array_documents() {
        assert!(matches!(
            parse_records(r#"{"video": "a.mp4"}"#, &ny()),
            Err(LoadError::NotAnArray)
        ));
        assert!(matches!(parse_records("[", &ny()), Err(LoadError::Json(_))));
    }

    #[test]
    fn timestamp_forms() {
        let zone = ny();
        let expected = Utc.with_ymd_and_hms(2024, 7, 1, 14, 0, 0).unwrap();
        for text in [
            "2024-07-01T10:00:00",
            "2024-07-01 10:00:00",
            "2024-07-01T10:00:00.000",
            "2024-07-01T10:00",
            "2024-07-01T14:00:00Z",
            "2024-07-01T14:00:00.000000Z",
            "2024-07-01T10:00:00-04:00",
            "  2024-07-01T10:00:00  ",
        ] {
            assert_eq!(parse_recorded_at(text, &zone), Some(expected), "{text}");
        }
        assert_eq!(
            parse_recorded_at("2024-07-01", &zone),
            Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_recorded_at("yesterday", &zone), None);
    }

    #[test]
    fn locator_lists() {
        assert_eq!(
            parse_locators(r#"["x.mp4", "y.mp4"]"#).unwrap(),
            ["x.mp4", "y.mp4"]
        );
        assert!(parse_locators("[]").unwrap().is_empty());
        assert!(matches!(
            parse_locators(r#"["x.mp4", 3]"#),
            Err(LoadError::InvalidEntry { index: 1 })
        ));
        assert!(matches!(
            parse_locators(r#""x.mp4""#),
            Err(LoadError::NotAnArray)
        ));
    }
}
