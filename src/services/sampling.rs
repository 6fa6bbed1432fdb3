// src/services/sampling.rs

use rand::Rng;
use rand::seq::SliceRandom;

/// Draws `count` distinct items uniformly at random, without replacement.
/// Short pools are returned whole (shuffled). The draw order is the order
/// callers present or persist.
pub fn draw<T>(rng: &mut impl Rng, mut pool: Vec<T>, count: usize) -> Vec<T> {
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn draws_exactly_the_requested_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let drawn = draw(&mut rng, (1..=100).collect(), 10);
        assert_eq!(drawn.len(), 10);
    }

    #[test]
    fn drawn_items_are_distinct_and_from_the_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool: Vec<i64> = (1..=50).collect();
        let drawn = draw(&mut rng, pool.clone(), 20);

        let unique: HashSet<i64> = drawn.iter().copied().collect();
        assert_eq!(unique.len(), drawn.len());
        assert!(drawn.iter().all(|item| pool.contains(item)));
    }

    #[test]
    fn short_pool_is_returned_whole() {
        let mut rng = StdRng::seed_from_u64(42);
        let drawn = draw(&mut rng, vec![1, 2, 3], 10);

        let unique: HashSet<i64> = drawn.iter().copied().collect();
        assert_eq!(unique, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn same_seed_draws_the_same_sequence() {
        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);

        let pool: Vec<i64> = (1..=30).collect();
        assert_eq!(
            draw(&mut first, pool.clone(), 12),
            draw(&mut second, pool, 12)
        );
    }

    #[test]
    fn zero_count_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(42);
        let drawn = draw(&mut rng, (1..=10).collect::<Vec<i64>>(), 0);
        assert!(drawn.is_empty());
    }
}
