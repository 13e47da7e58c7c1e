// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-relative placement of spawned clips.

use alloc::format;
use alloc::string::String;

use rand::Rng;
use serde::Deserialize;

/// A half-open interval `[min, max)` of viewport units.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Span {
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draws a value uniformly from the span. An empty or inverted span
    /// always yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Ranges from which clip offsets are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementRange {
    /// Top offset, in `vh`.
    pub top_vh: Span,
    /// Left offset, in `vw`.
    pub left_vw: Span,
}

impl Default for PlacementRange {
    fn default() -> Self {
        Self {
            top_vh: Span::new(-10.0, 30.0),
            left_vw: Span::new(-15.0, 45.0),
        }
    }
}

impl PlacementRange {
    /// Draws an independent top and left offset.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Placement {
        Placement {
            top_vh: self.top_vh.sample(rng),
            left_vw: self.left_vw.sample(rng),
        }
    }
}

/// Absolute offset of one clip within the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Offset from the top, in `vh`.
    pub top_vh: f64,
    /// Offset from the left, in `vw`.
    pub left_vw: f64,
}

impl Placement {
    /// CSS `top` value.
    #[must_use]
    pub fn css_top(&self) -> String {
        format!("{}vh", self.top_vh)
    }

    /// CSS `left` value.
    #[must_use]
    pub fn css_left(&self) -> String {
        format!("{}vw", self.left_vw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;
    use rand::rngs::SmallRng;

    #[test]
    fn samples_stay_in_range() {
        let range = PlacementRange::default();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let p = range.sample(&mut rng);
            assert!(range.top_vh.contains(p.top_vh), "top {}", p.top_vh);
            assert!(range.left_vw.contains(p.left_vw), "left {}", p.left_vw);
        }
    }

    #[test]
    fn samples_cover_the_range() {
        let range = PlacementRange::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let (mut lo, mut hi) = (f64::MAX, f64::MIN);
        for _ in 0..10_000 {
            let top = range.sample(&mut rng).top_vh;
            lo = lo.min(top);
            hi = hi.max(top);
        }
        assert!(lo < -9.0, "lowest top {lo}");
        assert!(hi > 29.0, "highest top {hi}");
    }

    #[test]
    fn degenerate_span_yields_min() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(Span::new(5.0, 5.0).sample(&mut rng), 5.0);
        assert_eq!(Span::new(5.0, 1.0).sample(&mut rng), 5.0);
    }

    #[test]
    fn css_units() {
        let p = Placement {
            top_vh: -2.5,
            left_vw: 40.0,
        };
        assert_eq!(p.css_top(), "-2.5vh");
        assert_eq!(p.css_left(), "40vw");
    }
}
