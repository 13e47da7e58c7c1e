// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core model for clock-cued video playback.
//!
//! `reeltime_core` holds everything about the players that does not touch a
//! browser: parsing the data files, formatting the wall clock in a fixed time
//! zone, matching recording times against it, drawing placements and handles
//! for spawned clips, and picking a random background loop. It is `no_std`
//! compatible (with `alloc`) so the same logic runs in the wasm players and in
//! native tools and tests.
//!
//! # Architecture
//!
//! The time-matched player is a once-per-second loop:
//!
//! ```text
//!   Backend (timer, wall clock)
//!       │
//!       ▼
//!   now ──► MatchScheduler::needs_refresh() ──► fetch ──► parse_records()
//!    │                                                        │
//!    │            ┌───────────────────────────────────────────┘
//!    ▼            ▼
//!   MatchScheduler::tick() ──► TickPlan { cues } ──► Spawner::spawn()
//!                                                        │
//!                 ┌──────────────────────────────────────┘
//!                 ▼
//!   PlaybackSpec ──► presenter (DOM) ──► `ended` ──► Spawner::release()
//! ```
//!
//! **[`zone`]**: Fixed-zone wall clock: [`ZoneRule`](zone::ZoneRule) with
//! tz-database rules, [`ClockTime`](zone::ClockTime) and
//! [`ClockFormat`](zone::ClockFormat).
//!
//! **[`record`]**: Data source parsing: video records with recording
//! timestamps, and plain locator lists.
//!
//! **[`schedule`]**: [`MatchScheduler`](schedule::MatchScheduler): record
//! cache, refresh policy and per-tick matching.
//!
//! **[`placement`]**: Viewport-relative placement ranges and sampling.
//!
//! **[`instance`]**: Playback handles and the [`Spawner`](instance::Spawner)
//! that creates and releases them.
//!
//! **[`pick`]**: Uniform selection of the background loop.
//!
//! **[`config`]**: Player configuration with serde defaults.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! **[`error`]**: Data source errors.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod error;
pub mod instance;
pub mod pick;
pub mod placement;
pub mod record;
pub mod schedule;
pub mod trace;
pub mod zone;
