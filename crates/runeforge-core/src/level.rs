//! Probabilistic level rolls.
//!
//! A roll starts at a floor level and keeps climbing while draws succeed.
//! The success chance comes from the item's enchantability `e`, clamped to
//! `1..=50`:
//!
//! ```text
//! p = clamp(2 * (e / 50)^2, 0, 1)
//! ```
//!
//! so an enchantability of 36 or more (`p >= 1`) always climbs to the max,
//! while a rating of 1 almost never climbs.

use rand::Rng;

/// Lowest enchantability considered.
pub const MIN_ENCHANTABILITY: i32 = 1;

/// Highest enchantability considered.
pub const MAX_ENCHANTABILITY: i32 = 50;

/// Chance that one step of a roll succeeds.
#[must_use]
pub fn step_chance(enchantability: i32) -> f64 {
    let e = f64::from(enchantability.clamp(MIN_ENCHANTABILITY, MAX_ENCHANTABILITY));
    let ratio = e / f64::from(MAX_ENCHANTABILITY);
    (2.0 * ratio * ratio).clamp(0.0, 1.0)
}

/// Rolls a level in `floor..=max`.
///
/// Draws until one fails or `max` is reached. A `floor` at or above `max`
/// is returned as-is without drawing.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use runeforge_core::level::roll;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// assert_eq!(roll(50, 4, 5, &mut rng), 5);
/// ```
pub fn roll<R: Rng + ?Sized>(enchantability: i32, floor: u32, max: u32, rng: &mut R) -> u32 {
    let p = step_chance(enchantability);
    let mut level = floor;
    while level < max && rng.gen::<f64>() < p {
        level += 1;
    }
    level
}

#[cfg(test)]
mod tests {
    use super::{roll, step_chance};
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn chance_is_clamped() {
        assert!((step_chance(50) - 1.0).abs() < f64::EPSILON);
        assert!((step_chance(500) - 1.0).abs() < f64::EPSILON);
        assert!((step_chance(-7) - step_chance(1)).abs() < f64::EPSILON);
        assert!((step_chance(25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn max_enchantability_always_reaches_max() {
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(roll(50, 4, 5, &mut rng), 5);
            assert_eq!(roll(50, 1, 5, &mut rng), 5);
        }
    }

    #[test]
    fn floor_at_max_does_not_draw() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut untouched = rng.clone();
        assert_eq!(roll(10, 3, 3, &mut rng), 3);
        assert_eq!(roll(10, 4, 3, &mut rng), 4);
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn low_enchantability_rarely_climbs() {
        let climbed = (0..1_000)
            .filter(|&seed| roll(1, 1, 5, &mut ChaCha8Rng::seed_from_u64(seed)) > 1)
            .count();
        // p = 0.0008 per step
        assert!(climbed < 20, "climbed {climbed} times");
    }

    proptest! {
        #[test]
        fn roll_stays_in_bounds(
            enchantability in 1i32..=50,
            floor in 0u32..10,
            span in 0u32..10,
            seed: u64,
        ) {
            let max = floor + span;
            let level = roll(enchantability, floor, max, &mut ChaCha8Rng::seed_from_u64(seed));
            prop_assert!(level >= floor);
            prop_assert!(level <= max);
        }
    }
}
