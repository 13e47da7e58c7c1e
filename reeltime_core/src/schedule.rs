// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clock matching for the time-matched player.
//!
//! The [`MatchScheduler`] keeps the parsed record list and, once per tick,
//! turns the current instant into a [`TickPlan`]: the clock time in the fixed
//! zone plus one [`Cue`] for every record whose recording time shows the same
//! hour, minute and second. Records are indexed by their formatted clock time
//! when installed, so a tick costs one lookup per matched second regardless
//! of list size.
//!
//! The scheduler itself never fetches. The backend asks
//! [`needs_refresh`](MatchScheduler::needs_refresh) at the top of each tick,
//! fetches and [`install`](MatchScheduler::install)s when told to (or
//! reports [`refresh_failed`](MatchScheduler::refresh_failed)), and then
//! calls [`tick`](MatchScheduler::tick) with the instant it sampled before
//! the fetch.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::record::VideoRecord;
use crate::zone::{ClockFormat, ClockTime, SECONDS_PER_DAY};

/// When the record list is fetched again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Fetch on every tick, so every comparison sees the latest file.
    EveryTick,
    /// Reuse the installed list until it is older than this many
    /// milliseconds.
    IntervalMs(u32),
}

/// Configuration for the [`MatchScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Delay between the end of one tick and the start of the next.
    pub tick_period_ms: u32,
    /// Record list refresh policy.
    pub refresh: RefreshPolicy,
    /// How many seconds skipped by a late tick are still matched on the next
    /// one. `0` matches only the current second.
    pub catch_up_limit: u32,
}

impl SchedulerConfig {
    /// One-second ticks, fetch on every tick, no catch-up.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            tick_period_ms: 1000,
            refresh: RefreshPolicy::EveryTick,
            catch_up_limit: 0,
        }
    }

    /// One-second ticks with the record list cached for `interval_ms`, and
    /// catch-up over short stalls.
    #[must_use]
    pub const fn cached(interval_ms: u32) -> Self {
        Self {
            tick_period_ms: 1000,
            refresh: RefreshPolicy::IntervalMs(interval_ms),
            catch_up_limit: 5,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::web()
    }
}

/// A record due to play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cue {
    /// Position of the record in the installed list.
    pub record_index: usize,
    /// Media locator.
    pub locator: String,
    /// Clock time the record matched.
    pub clock: ClockTime,
}

/// Result of one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickPlan {
    /// Monotonic tick counter.
    pub tick_index: u64,
    /// Current clock time in the fixed zone.
    pub clock: ClockTime,
    /// Matched records, earliest second first, document order within a
    /// second. Duplicates are kept.
    pub cues: Vec<Cue>,
}

/// Matches the wall clock against recording times.
#[derive(Clone, Debug)]
pub struct MatchScheduler {
    config: SchedulerConfig,
    format: ClockFormat,
    records: Vec<VideoRecord>,
    by_clock: BTreeMap<ClockTime, Vec<usize>>,
    loaded_at: Option<DateTime<Utc>>,
    last_clock: Option<ClockTime>,
    tick_index: u64,
}

impl MatchScheduler {
    /// Creates a scheduler with no records installed.
    #[must_use]
    pub fn new(config: SchedulerConfig, format: ClockFormat) -> Self {
        Self {
            config,
            format,
            records: Vec::new(),
            by_clock: BTreeMap::new(),
            loaded_at: None,
            last_clock: None,
            tick_index: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Returns the clock format used for matching.
    #[must_use]
    pub fn format(&self) -> &ClockFormat {
        &self.format
    }

    /// Returns the installed records.
    #[must_use]
    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    /// Returns `true` if the record list should be fetched before ticking at
    /// `now`.
    ///
    /// Always `true` until a list has been installed. A failed fetch leaves
    /// the previous list in place and this keeps returning `true`.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match (self.loaded_at, self.config.refresh) {
            (None, _) | (Some(_), RefreshPolicy::EveryTick) => true,
            (Some(at), RefreshPolicy::IntervalMs(ms)) => {
                // A clock that went backwards also forces a refresh.
                now < at || now - at >= TimeDelta::milliseconds(i64::from(ms))
            }
        }
    }

    /// Replaces the record list.
    pub fn install(&mut self, records: Vec<VideoRecord>, now: DateTime<Utc>) {
        self.by_clock.clear();
        for (index, record) in records.iter().enumerate() {
            let clock = self.format.clock_time(record.recorded_at);
            self.by_clock.entry(clock).or_default().push(index);
        }
        self.records = records;
        self.loaded_at = Some(now);
    }

    /// Records that fetching the list for this tick failed.
    ///
    /// Under [`RefreshPolicy::EveryTick`] the installed list is dropped, so
    /// the tick cues nothing. Under [`RefreshPolicy::IntervalMs`] the cached
    /// list keeps serving until a fetch succeeds.
    pub fn refresh_failed(&mut self) {
        if self.config.refresh == RefreshPolicy::EveryTick {
            self.records.clear();
            self.by_clock.clear();
        }
    }

    /// Runs one tick at `now`.
    ///
    /// A tick landing in the same clock second as the previous one yields no
    /// cues, so no record is cued twice for one second.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickPlan {
        let clock = self.format.clock_time(now);
        let span = match self.last_clock.map(|last| clock.seconds_since(last)) {
            None => 1,
            // The clock went backwards (fall-back hour or a corrected system
            // clock): only the current second is new.
            Some(elapsed) if elapsed >= SECONDS_PER_DAY / 2 => 1,
            Some(elapsed) => elapsed.min(self.config.catch_up_limit.saturating_add(1)),
        };

        let mut cues = Vec::new();
        for back in (0..span).rev() {
            let second = clock.earlier_by(back);
            let Some(indices) = self.by_clock.get(&second) else {
                continue;
            };
            cues.extend(indices.iter().map(|&record_index| Cue {
                record_index,
                locator: self.records[record_index].locator.clone(),
                clock: second,
            }));
        }

        let plan = TickPlan {
            tick_index: self.tick_index,
            clock,
            cues,
        };
        self.last_clock = Some(clock);
        self.tick_index += 1;
        plan
    }
}
