// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform selection of the background loop.

use rand::Rng;

/// Maps a unit sample in `[0, 1)` to an index in `[0, count)` as
/// `floor(unit * count)`.
///
/// Samples outside the unit interval are clamped. Returns `None` when
/// `count` is zero.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the product is floored and clamped into [0, count) before the cast"
)]
pub fn pick_index(unit: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let scaled = (unit * count as f64).floor();
    if scaled.is_nan() || scaled < 0.0 {
        return Some(0);
    }
    Some((scaled as usize).min(count - 1))
}

/// Picks one entry uniformly at random, returning its index and value.
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<(usize, &'a T)> {
    let index = pick_index(rng.r#gen::<f64>(), items.len())?;
    Some((index, &items[index]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;
    use rand::rngs::SmallRng;

    #[test]
    fn empty_list_picks_nothing() {
        assert_eq!(pick_index(0.5, 0), None);
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(pick::<u8, _>(&[], &mut rng).is_none());
    }

    #[test]
    fn floor_of_scaled_unit() {
        assert_eq!(pick_index(0.0, 2), Some(0));
        assert_eq!(pick_index(0.49, 2), Some(0));
        assert_eq!(pick_index(0.5, 2), Some(1));
        assert_eq!(pick_index(0.999_999, 2), Some(1));
    }

    #[test]
    fn out_of_range_units_are_clamped() {
        assert_eq!(pick_index(1.0, 3), Some(2));
        assert_eq!(pick_index(-0.2, 3), Some(0));
        assert_eq!(pick_index(f64::NAN, 3), Some(0));
    }

    #[test]
    fn picks_are_roughly_uniform() {
        let items = ["x.mp4", "y.mp4", "z.mp4", "w.mp4"];
        let mut counts = [0_usize; 4];
        let mut rng = SmallRng::seed_from_u64(2024);
        for _ in 0..40_000 {
            let (index, item) = pick(&items, &mut rng).unwrap();
            assert_eq!(*item, items[index]);
            counts[index] += 1;
        }
        for (index, count) in counts.iter().enumerate() {
            assert!(
                (9_000..11_000).contains(count),
                "index {index} picked {count} times"
            );
        }
    }
}
