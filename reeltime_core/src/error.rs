// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data source errors.

use core::fmt;

/// Errors from parsing a player data source.
///
/// Individual malformed video records are skipped rather than reported here;
/// see [`RecordSet::skipped`](crate::record::RecordSet::skipped).
#[derive(Debug)]
pub enum LoadError {
    /// The payload is not valid JSON.
    Json(serde_json::Error),
    /// The payload is valid JSON but not an array.
    NotAnArray,
    /// A locator list entry is not a string.
    InvalidEntry {
        /// Position of the entry in the array.
        index: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed JSON: {err}"),
            Self::NotAnArray => f.write_str("expected a JSON array"),
            Self::InvalidEntry { index } => write!(f, "entry {index} is not a string"),
        }
    }
}

impl core::error::Error for LoadError {}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
