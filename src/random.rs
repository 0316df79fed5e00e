//! Bounded random integers.

use rand::Rng;

/// Uniform integer in `min..=max`.  Collapses to `min` when the range is
/// empty, so callers never have to guard against inverted bounds.
pub fn random_int(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}
