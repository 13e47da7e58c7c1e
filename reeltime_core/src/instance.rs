// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Playback instances and their handles.
//!
//! Every spawned clip gets an [`InstanceId`] from a monotonically increasing
//! counter, so two live clips never share a handle and the removal of one can
//! never reach another. The [`Spawner`] owns the counter and the set of live
//! handles; the presenter turns each [`PlaybackSpec`] it returns into a media
//! element and reports back through [`Spawner::release`] when playback ends.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use core::fmt;

use rand::Rng;

use crate::placement::{Placement, PlacementRange};

const DOM_ID_PREFIX: &str = "reeltime-clip-";

/// Handle of one spawned clip.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// The element id used for this instance in the page.
    #[must_use]
    pub fn dom_id(self) -> String {
        format!("{DOM_ID_PREFIX}{}", self.0)
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({})", self.0)
    }
}

/// Everything the presenter needs to create one transient clip.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackSpec {
    /// Handle used for removal.
    pub id: InstanceId,
    /// Media locator.
    pub locator: String,
    /// Position in the viewport.
    pub placement: Placement,
    /// Start as soon as enough data is buffered.
    pub autoplay: bool,
    /// Restart on end.
    pub looping: bool,
    /// Play without audio (browsers refuse unmuted autoplay).
    pub muted: bool,
    /// Play inline rather than full-screen on mobile platforms.
    pub plays_inline: bool,
}

/// Description of the persistent background loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopSpec {
    /// Media locator.
    pub locator: String,
    /// Start as soon as enough data is buffered.
    pub autoplay: bool,
    /// Restart on end.
    pub looping: bool,
    /// Play without audio.
    pub muted: bool,
    /// Play inline rather than full-screen on mobile platforms.
    pub plays_inline: bool,
}

impl LoopSpec {
    /// A muted, inline, autoplaying, endlessly looping clip.
    #[must_use]
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            autoplay: true,
            looping: true,
            muted: true,
            plays_inline: true,
        }
    }
}

/// Allocates handles and placements for transient clips and tracks which
/// are still on screen.
#[derive(Clone, Debug)]
pub struct Spawner {
    next: u64,
    live: BTreeSet<InstanceId>,
    range: PlacementRange,
    max_live: Option<usize>,
}

impl Spawner {
    /// Creates a spawner drawing placements from `range`, with no bound on
    /// concurrently live clips.
    #[must_use]
    pub fn new(range: PlacementRange) -> Self {
        Self {
            next: 1,
            live: BTreeSet::new(),
            range,
            max_live: None,
        }
    }

    /// Bounds the number of concurrently live clips.
    #[must_use]
    pub fn with_max_live(mut self, max_live: Option<usize>) -> Self {
        self.max_live = max_live;
        self
    }

    /// Creates the spec for a new clip: fresh handle, independent placement,
    /// autoplay, no loop, muted, inline.
    ///
    /// Returns `None` when the live bound is reached.
    pub fn spawn<R: Rng + ?Sized>(&mut self, locator: &str, rng: &mut R) -> Option<PlaybackSpec> {
        if self.max_live.is_some_and(|max| self.live.len() >= max) {
            return None;
        }
        let id = InstanceId(self.next);
        self.next += 1;
        self.live.insert(id);
        Some(PlaybackSpec {
            id,
            locator: locator.into(),
            placement: self.range.sample(rng),
            autoplay: true,
            looping: false,
            muted: true,
            plays_inline: true,
        })
    }

    /// Marks a clip as gone. Returns `true` only for the first release of a
    /// live handle.
    pub fn release(&mut self, id: InstanceId) -> bool {
        self.live.remove(&id)
    }

    /// Returns `true` if `id` is on screen.
    #[must_use]
    pub fn is_live(&self, id: InstanceId) -> bool {
        self.live.contains(&id)
    }

    /// Number of clips on screen.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live.len()
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(PlacementRange::default())
    }
}
