//! Seeded, rarity-biased shuffling.
//!
//! Each item draws `u` uniformly from `[0, 1)` and gets the key
//! `weight / (1 - u)`; items are then ordered by descending key. Heavier
//! items land earlier on average, but any item with positive weight can
//! come first. Items with zero or negative weight get `-inf` and sink to the
//! end, keeping their input order.

use rand::Rng;

/// Orders `items` by rarity-weighted random keys.
///
/// One uniform sample is drawn per item, in input order, whatever its
/// weight. The same RNG state therefore always produces the same order.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use runeforge_core::shuffle::weighted_shuffle;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let order = weighted_shuffle(vec![("common", 10), ("never", 0)], |&(_, w)| f64::from(w), &mut rng);
/// assert_eq!(order.last(), Some(&("never", 0)));
/// ```
pub fn weighted_shuffle<T, F, R>(items: Vec<T>, weight: F, rng: &mut R) -> Vec<T>
where
    F: Fn(&T) -> f64,
    R: Rng + ?Sized,
{
    let mut keyed: Vec<(f64, T)> = items
        .into_iter()
        .map(|item| {
            let draw: f64 = rng.gen();
            let w = weight(&item);
            let key = if w > 0.0 {
                w / (1.0 - draw)
            } else {
                f64::NEG_INFINITY
            };
            (key, item)
        })
        .collect();

    // Stable, so equal keys (all the -inf entries) keep input order
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.into_iter().map(|(_, item)| item).collect()
}
