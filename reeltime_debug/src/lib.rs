// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, recording and JSON export for reeltime diagnostics.
//!
//! This crate provides [`TraceSink`](reeltime_core::trace::TraceSink)
//! implementations for native tools and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory recording of owned events.
//! - [`export::export_json`]: writes a recording as a JSON array.

pub mod export;
pub mod pretty;
pub mod recorder;
