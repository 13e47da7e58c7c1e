// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the players.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! players emit. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Failures that the browser would otherwise surface as unhandled rejections
//! (unreachable data files, malformed payloads, missing page elements) are
//! reported as [`FaultEvent`]s, and the player carries on.

use crate::instance::InstanceId;
use crate::placement::Placement;
use crate::zone::{ClockTime, HourCycle};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Where a fault happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Fetching a data file failed (network error or non-2xx status).
    Fetch,
    /// A data file could not be parsed.
    Parse,
    /// A page element the player relies on is missing.
    MissingElement,
    /// Creating or attaching a media element failed.
    Present,
    /// The inline page configuration could not be parsed.
    Config,
    /// A cue was dropped because the live-clip bound was reached.
    LiveLimit,
}

impl FaultKind {
    /// Short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Parse => "parse",
            Self::MissingElement => "missing-element",
            Self::Present => "present",
            Self::Config => "config",
            Self::LiveLimit => "live-limit",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted at the start of each scheduler tick.
#[derive(Clone, Copy, Debug)]
pub struct TickEvent {
    /// Monotonic tick counter.
    pub tick_index: u64,
    /// Current clock time in the fixed zone.
    pub clock: ClockTime,
    /// How the clock is rendered.
    pub hour_cycle: HourCycle,
}

/// Emitted after a data file is parsed.
#[derive(Clone, Copy, Debug)]
pub struct RecordsLoadedEvent<'a> {
    /// Path the data came from.
    pub source: &'a str,
    /// Usable entries.
    pub count: usize,
    /// Entries dropped as unusable.
    pub skipped: usize,
}

/// Emitted when an operation fails and the player carries on without it.
#[derive(Clone, Copy, Debug)]
pub struct FaultEvent<'a> {
    /// Category of the failure.
    pub kind: FaultKind,
    /// What was being attempted (a path, selector or element id).
    pub subject: &'a str,
    /// Human-readable cause.
    pub message: &'a str,
}

/// Emitted for each record whose recording time matches the clock.
#[derive(Clone, Copy, Debug)]
pub struct CueEvent<'a> {
    /// Tick that produced the cue.
    pub tick_index: u64,
    /// The matching clock time.
    pub clock: ClockTime,
    /// How the clock is rendered.
    pub hour_cycle: HourCycle,
    /// Locator of the matched clip.
    pub locator: &'a str,
}

/// Emitted when a transient clip is put on screen.
#[derive(Clone, Copy, Debug)]
pub struct SpawnEvent<'a> {
    /// Handle of the new clip.
    pub id: InstanceId,
    /// Locator of the clip.
    pub locator: &'a str,
    /// Where it was placed.
    pub placement: Placement,
    /// Clips on screen after this one was added.
    pub live: usize,
}

/// Emitted when the removal handler runs for a finished clip.
#[derive(Clone, Copy, Debug)]
pub struct RemoveEvent {
    /// Handle being removed.
    pub id: InstanceId,
    /// Whether a matching element was found and detached.
    pub found: bool,
    /// Clips on screen afterwards.
    pub live: usize,
}

/// Emitted when the looping player chooses its clip.
#[derive(Clone, Copy, Debug)]
pub struct PickEvent<'a> {
    /// Chosen index.
    pub index: usize,
    /// Number of candidates.
    pub count: usize,
    /// Chosen locator.
    pub locator: &'a str,
}

/// Emitted when the disclaimer banner timer fires.
#[derive(Clone, Copy, Debug)]
pub struct BannerEvent<'a> {
    /// Element id of the banner.
    pub element_id: &'a str,
    /// Whether the banner was present and removed.
    pub found: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the players.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the start of each tick.
    fn on_tick(&mut self, e: &TickEvent) {
        _ = e;
    }

    /// Called after a data file is parsed.
    fn on_records_loaded(&mut self, e: &RecordsLoadedEvent<'_>) {
        _ = e;
    }

    /// Called when an operation fails.
    fn on_fault(&mut self, e: &FaultEvent<'_>) {
        _ = e;
    }

    /// Called for each matched record.
    fn on_cue(&mut self, e: &CueEvent<'_>) {
        _ = e;
    }

    /// Called when a clip is spawned.
    fn on_spawn(&mut self, e: &SpawnEvent<'_>) {
        _ = e;
    }

    /// Called when a clip is removed.
    fn on_remove(&mut self, e: &RemoveEvent) {
        _ = e;
    }

    /// Called when the looping player picks its clip.
    fn on_pick(&mut self, e: &PickEvent<'_>) {
        _ = e;
    }

    /// Called when the banner timer fires.
    fn on_banner(&mut self, e: &BannerEvent<'_>) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TickEvent`].
    #[inline]
    pub fn tick(&mut self, e: &TickEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tick(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RecordsLoadedEvent`].
    #[inline]
    pub fn records_loaded(&mut self, e: &RecordsLoadedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_records_loaded(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FaultEvent`].
    #[inline]
    pub fn fault(&mut self, e: &FaultEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fault(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CueEvent`].
    #[inline]
    pub fn cue(&mut self, e: &CueEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_cue(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SpawnEvent`].
    #[inline]
    pub fn spawn(&mut self, e: &SpawnEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_spawn(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RemoveEvent`].
    #[inline]
    pub fn remove(&mut self, e: &RemoveEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_remove(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PickEvent`].
    #[inline]
    pub fn pick(&mut self, e: &PickEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pick(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BannerEvent`].
    #[inline]
    pub fn banner(&mut self, e: &BannerEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_banner(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
