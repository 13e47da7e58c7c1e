// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-zone wall clock.
//!
//! Clips are cued against the wall clock of one named zone, whatever the
//! viewer's locale. [`ZoneRule`] wraps an IANA zone from the tz database, so
//! historical offsets (US daylight time before 2007, for instance) format the
//! way a browser formats them. [`ClockFormat`] reduces an instant to the
//! [`ClockTime`] shown on a 24-hour clock in the zone; two instants "match"
//! when their formatted clock times are equal.

use core::fmt;

use chrono::{DateTime, LocalResult, NaiveDateTime, Offset as _, TimeDelta, TimeZone as _, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

pub(crate) const SECONDS_PER_DAY: u32 = 86_400;

/// A named time zone from the tz database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ZoneRule {
    tz: Tz,
}

impl ZoneRule {
    /// Wraps a tz database zone.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// `America/New_York`, the players' zone.
    #[must_use]
    pub const fn america_new_york() -> Self {
        Self::new(Tz::America__New_York)
    }

    /// IANA name, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Returns the offset east of UTC, in seconds, in effect at `instant`.
    #[must_use]
    pub fn offset_at(&self, instant: DateTime<Utc>) -> i32 {
        self.tz
            .offset_from_utc_datetime(&instant.naive_utc())
            .fix()
            .local_minus_utc()
    }

    /// Converts a UTC instant to wall-clock date and time in this zone.
    ///
    /// Returns `None` when the wall time falls outside the representable
    /// range.
    #[must_use]
    pub fn to_local(&self, instant: DateTime<Utc>) -> Option<NaiveDateTime> {
        instant
            .naive_utc()
            .checked_add_signed(TimeDelta::seconds(i64::from(self.offset_at(instant))))
    }

    /// Interprets a wall-clock date and time in this zone as a UTC instant.
    ///
    /// Repeated fall-back times resolve to the earlier instant. Wall times
    /// skipped by a spring-forward gap are read with the offset in effect
    /// before the gap, so they land after it. This is how browsers parse
    /// offset-less timestamps.
    #[must_use]
    pub fn from_local(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
            LocalResult::None => {
                // Transitions are far more than a day apart.
                let before = local.checked_sub_signed(TimeDelta::days(1))?.and_utc();
                let offset = TimeDelta::seconds(i64::from(self.offset_at(before)));
                Some(local.checked_sub_signed(offset)?.and_utc())
            }
        }
    }

    /// Seconds after local midnight at `instant`. Total over every instant.
    fn seconds_of_day(&self, instant: DateTime<Utc>) -> u32 {
        let local = instant.timestamp() + i64::from(self.offset_at(instant));
        // rem_euclid keeps the value in [0, 86_400).
        u32::try_from(local.rem_euclid(i64::from(SECONDS_PER_DAY))).unwrap_or(0)
    }
}

/// How the hour is rendered on a 24-hour clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HourCycle {
    /// Hours 0–23; midnight is `00`.
    H23,
    /// Hours 1–24; midnight is `24`. This is what browsers produce for the
    /// `h24` hour cycle.
    #[default]
    H24,
}

/// Hour, minute and second of a wall-clock time.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl ClockTime {
    /// Midnight.
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Creates a clock time, or `None` if any field is out of range.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    /// Creates a clock time from seconds after midnight, wrapping at 24h.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "each component is reduced below 60 or 24 before the cast"
    )]
    pub const fn from_seconds_of_day(seconds: u32) -> Self {
        let s = seconds % SECONDS_PER_DAY;
        Self {
            hour: (s / 3600) as u8,
            minute: (s / 60 % 60) as u8,
            second: (s % 60) as u8,
        }
    }

    /// Seconds after midnight.
    #[must_use]
    pub const fn seconds_of_day(self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }

    /// Seconds elapsed from `earlier` to `self`, going forward around midnight.
    #[must_use]
    pub const fn seconds_since(self, earlier: Self) -> u32 {
        (self.seconds_of_day() + SECONDS_PER_DAY - earlier.seconds_of_day()) % SECONDS_PER_DAY
    }

    /// The clock time `seconds` before this one, wrapping around midnight.
    #[must_use]
    pub const fn earlier_by(self, seconds: u32) -> Self {
        Self::from_seconds_of_day(
            self.seconds_of_day() + SECONDS_PER_DAY - seconds % SECONDS_PER_DAY,
        )
    }

    /// Hour, 0–23.
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Minute, 0–59.
    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Second, 0–59.
    #[must_use]
    pub const fn second(self) -> u8 {
        self.second
    }

    /// Returns a value that renders as `HH:MM:SS` in the given hour cycle.
    #[must_use]
    pub const fn display(self, cycle: HourCycle) -> ClockDisplay {
        ClockDisplay { time: self, cycle }
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClockTime({:02}:{:02}:{:02})",
            self.hour, self.minute, self.second
        )
    }
}

/// `HH:MM:SS` rendering of a [`ClockTime`].
#[derive(Clone, Copy, Debug)]
pub struct ClockDisplay {
    time: ClockTime,
    cycle: HourCycle,
}

impl fmt::Display for ClockDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = match (self.cycle, self.time.hour) {
            (HourCycle::H24, 0) => 24,
            (_, h) => h,
        };
        write!(f, "{hour:02}:{:02}:{:02}", self.time.minute, self.time.second)
    }
}

/// Formats instants to clock times in a fixed zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockFormat {
    /// Zone whose wall clock is used.
    pub zone: ZoneRule,
    /// Hour rendering.
    pub hour_cycle: HourCycle,
}

impl ClockFormat {
    /// The players' clock: `America/New_York`, `h24` cycle.
    #[must_use]
    pub const fn fixed_zone() -> Self {
        Self {
            zone: ZoneRule::america_new_york(),
            hour_cycle: HourCycle::H24,
        }
    }

    /// Returns the wall-clock time of `instant` in the zone.
    #[must_use]
    pub fn clock_time(&self, instant: DateTime<Utc>) -> ClockTime {
        ClockTime::from_seconds_of_day(self.zone.seconds_of_day(instant))
    }

    /// Returns the rendering of `instant` as shown on the clock.
    #[must_use]
    pub fn display(&self, instant: DateTime<Utc>) -> ClockDisplay {
        self.clock_time(instant).display(self.hour_cycle)
    }
}

impl Default for ClockFormat {
    fn default() -> Self {
        Self::fixed_zone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use chrono::{NaiveDate, TimeZone as _};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn new_york_is_standard_in_winter() {
        let ny = ZoneRule::america_new_york();
        assert_eq!(ny.offset_at(utc(2024, 1, 15, 12, 0, 0)), -5 * 3600);
        assert_eq!(ny.name(), "America/New_York");
    }

    #[test]
    fn new_york_is_daylight_in_summer() {
        let ny = ZoneRule::america_new_york();
        assert_eq!(ny.offset_at(utc(2024, 7, 4, 12, 0, 0)), -4 * 3600);
    }

    #[test]
    fn spring_forward_happens_at_two_local() {
        // 2024-03-10 02:00 EST == 07:00 UTC.
        let ny = ZoneRule::america_new_york();
        assert_eq!(ny.offset_at(utc(2024, 3, 10, 6, 59, 59)), -5 * 3600);
        assert_eq!(ny.offset_at(utc(2024, 3, 10, 7, 0, 0)), -4 * 3600);
    }

    #[test]
    fn fall_back_happens_at_two_local_daylight() {
        // 2024-11-03 02:00 EDT == 06:00 UTC.
        let ny = ZoneRule::america_new_york();
        assert_eq!(ny.offset_at(utc(2024, 11, 3, 5, 59, 59)), -4 * 3600);
        assert_eq!(ny.offset_at(utc(2024, 11, 3, 6, 0, 0)), -5 * 3600);
    }

    #[test]
    fn rules_before_2007_use_april_to_october() {
        // In 2006 daylight time ran from April 2 to October 29.
        let fmt = ClockFormat::fixed_zone();
        assert_eq!(
            fmt.clock_time(utc(2006, 3, 20, 15, 0, 0)),
            ClockTime::new(10, 0, 0).unwrap()
        );
        assert_eq!(
            fmt.clock_time(utc(2006, 10, 30, 15, 0, 0)),
            ClockTime::new(10, 0, 0).unwrap()
        );
        assert_eq!(
            fmt.clock_time(utc(2006, 4, 3, 15, 0, 0)),
            ClockTime::new(11, 0, 0).unwrap()
        );
    }

    #[test]
    fn extreme_instants_do_not_overflow() {
        let ny = ZoneRule::america_new_york();
        let fmt = ClockFormat::fixed_zone();
        for instant in [DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC] {
            let _ = fmt.clock_time(instant);
            let _ = ny.to_local(instant);
        }
        assert_eq!(ny.to_local(DateTime::<Utc>::MIN_UTC), None);
        assert_eq!(ny.from_local(NaiveDateTime::MAX), None);
    }

    #[test]
    fn from_local_round_trips_outside_transitions() {
        let ny = ZoneRule::america_new_york();
        for local in [naive(2024, 1, 1, 10, 0, 0), naive(2024, 7, 1, 23, 59, 59)] {
            assert_eq!(ny.to_local(ny.from_local(local).unwrap()), Some(local), "{local}");
        }
    }

    #[test]
    fn from_local_in_spring_gap_lands_after_it() {
        let ny = ZoneRule::america_new_york();
        let instant = ny.from_local(naive(2024, 3, 10, 2, 30, 0)).unwrap();
        assert_eq!(instant, utc(2024, 3, 10, 7, 30, 0));
        assert_eq!(ny.to_local(instant), Some(naive(2024, 3, 10, 3, 30, 0)));
    }

    #[test]
    fn from_local_in_fall_back_overlap_takes_the_earlier_instant() {
        let ny = ZoneRule::america_new_york();
        let instant = ny.from_local(naive(2024, 11, 3, 1, 30, 0)).unwrap();
        assert_eq!(instant, utc(2024, 11, 3, 5, 30, 0));
    }

    #[test]
    fn clock_time_ignores_the_date() {
        let fmt = ClockFormat::fixed_zone();
        let a = fmt.clock_time(utc(2024, 1, 1, 15, 0, 0));
        let b = fmt.clock_time(utc(2025, 2, 9, 15, 0, 0));
        assert_eq!(a, b);
        assert_eq!(a, ClockTime::new(10, 0, 0).unwrap());
    }

    #[test]
    fn clock_time_before_the_epoch() {
        // 1969-12-31 23:00 EST.
        let fmt = ClockFormat::fixed_zone();
        assert_eq!(
            fmt.clock_time(utc(1970, 1, 1, 4, 0, 0)),
            ClockTime::new(23, 0, 0).unwrap()
        );
    }

    #[test]
    fn h24_renders_midnight_as_24() {
        let t = ClockTime::MIDNIGHT;
        assert_eq!(t.display(HourCycle::H24).to_string(), "24:00:00");
        assert_eq!(t.display(HourCycle::H23).to_string(), "00:00:00");
        let t = ClockTime::new(9, 5, 7).unwrap();
        assert_eq!(t.display(HourCycle::H24).to_string(), "09:05:07");
    }

    #[test]
    fn seconds_since_wraps_midnight() {
        let late = ClockTime::new(23, 59, 59).unwrap();
        let early = ClockTime::new(0, 0, 1).unwrap();
        assert_eq!(early.seconds_since(late), 2);
        assert_eq!(late.seconds_since(late), 0);
        assert_eq!(early.earlier_by(2), late);
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(ClockTime::new(24, 0, 0).is_none());
        assert!(ClockTime::new(0, 60, 0).is_none());
        assert!(ClockTime::new(0, 0, 60).is_none());
    }
}
