//! The attention-check challenge: did the user spot the highlighted words?

use rand::Rng;

use crate::error::{CourseError, PoolKind};
use crate::sampler;

/// Result of a single guess.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Both sides of every comparison go through the same normalization, so a
/// guess can never miss on formatting alone.
fn normalize(word: &str) -> &str {
    word.trim()
}

/// Compare a guess against the highlight recorded at `position` (first
/// highlight, then second, ...). Out-of-range positions are incorrect.
pub fn check_guess(guess: &str, position: usize, highlights: &[String]) -> Outcome {
    match highlights.get(position) {
        Some(expected) if normalize(expected) == normalize(guess) => Outcome::Correct,
        _ => Outcome::Incorrect,
    }
}

/// For three or more highlights the challenge only asks how many there were.
pub fn check_count(guess: usize, highlights: &[String]) -> Outcome {
    if guess == highlights.len() {
        Outcome::Correct
    } else {
        Outcome::Incorrect
    }
}

/// Build a multiple-choice set for one highlight: `count` distractors from
/// the deck's word pool (excluding the correct word and every other
/// highlight), with the correct word spliced in at a uniform random
/// position. Returns `count + 1` options.
pub fn build_distractor_set<R: Rng + ?Sized>(
    rng: &mut R,
    correct: &str,
    pool: &[&str],
    highlights: &[String],
    count: usize,
) -> Result<Vec<String>, CourseError> {
    let eligible: Vec<&str> = pool
        .iter()
        .copied()
        .filter(|word| {
            normalize(word) != normalize(correct)
                && !highlights.iter().any(|h| normalize(h) == normalize(word))
        })
        .collect();

    if eligible.len() < count {
        return Err(CourseError::InsufficientPool {
            kind: PoolKind::Words,
            drawn: eligible.len(),
            requested: count,
        });
    }

    let mut options: Vec<String> = sampler::shuffle(rng, &eligible)
        .into_iter()
        .take(count)
        .map(str::to_string)
        .collect();

    let slot = sampler::uniform(rng, options.len() + 1);
    options.insert(slot, correct.to_string());
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn highlights() -> Vec<String> {
        vec!["Flow".to_string(), "Pride".to_string()]
    }

    #[test]
    fn first_position_matches_first_highlight() {
        assert_eq!(check_guess("Flow", 0, &highlights()), Outcome::Correct);
        assert_eq!(check_guess("Pride", 0, &highlights()), Outcome::Incorrect);
    }

    #[test]
    fn second_position_matches_second_highlight() {
        assert_eq!(check_guess("Pride", 1, &highlights()), Outcome::Correct);
        assert_eq!(check_guess("Flow", 1, &highlights()), Outcome::Incorrect);
    }

    #[test]
    fn out_of_range_position_is_incorrect() {
        assert_eq!(check_guess("Flow", 5, &highlights()), Outcome::Incorrect);
    }

    #[test]
    fn guesses_are_normalized_symmetrically() {
        let words = vec!["  Flow ".to_string()];
        assert_eq!(check_guess("Flow", 0, &words), Outcome::Correct);
        assert_eq!(check_guess(" Flow\n", 0, &words), Outcome::Correct);
    }

    #[test]
    fn count_guess() {
        assert_eq!(check_count(2, &highlights()), Outcome::Correct);
        assert_eq!(check_count(3, &highlights()), Outcome::Incorrect);
    }

    #[test]
    fn distractor_set_contains_correct_exactly_once() {
        let pool = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta"];
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = build_distractor_set(&mut rng, "Flow", &pool, &highlights(), 3).unwrap();
            assert_eq!(options.len(), 4);
            assert_eq!(options.iter().filter(|w| w.as_str() == "Flow").count(), 1);
        }
    }

    #[test]
    fn distractor_set_excludes_other_highlights() {
        let pool = ["alpha", "beta", "Pride", "gamma", "delta"];
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = build_distractor_set(&mut rng, "Flow", &pool, &highlights(), 3).unwrap();
            assert!(!options.iter().any(|w| w == "Pride"));
        }
    }

    #[test]
    fn too_small_pool_is_an_error() {
        let pool = ["alpha"];
        let mut rng = StdRng::seed_from_u64(1);
        assert_matches!(
            build_distractor_set(&mut rng, "Flow", &pool, &highlights(), 3),
            Err(CourseError::InsufficientPool { .. })
        );
    }
}
