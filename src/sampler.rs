//! Random sampling primitives used by deck construction and the challenge.
//!
//! Every function takes the RNG as an argument so callers can seed a
//! deterministic generator in tests.

use crate::error::CourseError;
use rand::seq::SliceRandom;
use rand::Rng;

/// True with probability `p`, where `p` is in [0, 1].
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Uniform integer in [0, n). `n` must be positive.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, n: usize) -> usize {
    rng.gen_range(0..n)
}

/// Uniform die roll in [1, 100].
pub fn d100<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(1..=100)
}

/// One element drawn uniformly from `items`.
pub fn draw<'a, R: Rng + ?Sized, T>(rng: &mut R, items: &'a [T]) -> Result<&'a T, CourseError> {
    if items.is_empty() {
        return Err(CourseError::EmptyInput);
    }
    Ok(&items[uniform(rng, items.len())])
}

/// A fresh uniform-random permutation of `items` (Fisher-Yates).
/// The input slice is left untouched.
pub fn shuffle<R: Rng + ?Sized, T: Clone>(rng: &mut R, items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn chance_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(!chance(&mut rng, 0.0));
            assert!(chance(&mut rng, 1.0));
        }
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(uniform(&mut rng, 13) < 13);
        }
    }

    #[test]
    fn d100_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let roll = d100(&mut rng);
            assert!((1..=100).contains(&roll));
        }
    }

    #[test]
    fn draw_from_empty_fails() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: [u8; 0] = [];
        assert_matches!(draw(&mut rng, &empty), Err(CourseError::EmptyInput));
    }

    #[test]
    fn draw_returns_member() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = ["a", "b", "c"];
        for _ in 0..50 {
            let picked = draw(&mut rng, &items).unwrap();
            assert!(items.contains(picked));
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let input: Vec<u32> = (0..50).collect();
        let mut output = shuffle(&mut rng, &input);
        output.sort_unstable();
        assert_eq!(output, input);
    }

    #[test]
    fn shuffle_does_not_mutate_input() {
        let mut rng = StdRng::seed_from_u64(7);
        let input: Vec<u32> = (0..50).collect();
        let before = input.clone();
        let _ = shuffle(&mut rng, &input);
        assert_eq!(input, before);
    }

    #[test]
    fn shuffle_eventually_reorders() {
        let mut rng = StdRng::seed_from_u64(7);
        let input: Vec<u32> = (0..50).collect();
        let moved = (0..10).any(|_| shuffle(&mut rng, &input) != input);
        assert!(moved);
    }
}
