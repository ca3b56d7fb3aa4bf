//! Slide deck construction: a randomized sequence of word and image slides
//! with a secret handful of highlighted words for the recall challenge.

use itertools::Itertools;
use rand::Rng;

use crate::error::{CourseError, PoolKind};
use crate::sampler;

/// One unit of slideshow content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slide {
    Word(String),
    Image(String),
    /// A word slide secretly marked for later recall-testing. Only ever a
    /// retag of a `Word`, never of an `Image`.
    Highlighted(String),
}

/// Tunables for one deck build. The highlight percentages are cumulative
/// die-roll thresholds: roll <= three_pct gives 3, else <= two_pct gives 2,
/// else 1.
#[derive(Debug, Clone)]
pub struct DeckConfig {
    pub length: usize,
    pub image_chance: f64,
    pub two_pct: u32,
    pub three_pct: u32,
    /// How many generic filler words to blend into the category pool.
    pub generic_sample: usize,
    /// Cumulative cap on highlight placement attempts before giving up.
    pub retry_budget: u32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            length: 20,
            image_chance: 2.0 / 6.0,
            two_pct: 30,
            three_pct: 5,
            generic_sample: 30,
            retry_budget: 600,
        }
    }
}

/// An ordered deck of slides plus the highlight words, in the order they
/// were assigned (not slide order). Owned by one playback and discarded.
#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<Slide>,
    highlights: Vec<String>,
}

impl Deck {
    /// Build a deck from a category's pools.
    ///
    /// Pools must be provisioned with margin: at least `length` entries of
    /// each media type, since each pool is shuffled once and consumed, not
    /// replenished.
    pub fn build<R: Rng + ?Sized>(
        rng: &mut R,
        category_words: &[String],
        generic_words: &[String],
        images: &[String],
        config: &DeckConfig,
    ) -> Result<Self, CourseError> {
        // Blend a fixed sample of generic words into the category pool,
        // then drop duplicate words so no word can appear twice in one deck.
        let mut generic = sampler::shuffle(rng, generic_words);
        generic.truncate(config.generic_sample);

        let mut combined = category_words.to_vec();
        combined.extend(generic);

        let mut words: Vec<String> = sampler::shuffle(rng, &combined)
            .into_iter()
            .unique()
            .collect();
        let mut images = sampler::shuffle(rng, images);

        let mut slides = Vec::with_capacity(config.length);
        for drawn in 0..config.length {
            let exhausted = |kind| CourseError::InsufficientPool {
                kind,
                drawn,
                requested: config.length,
            };
            if sampler::chance(rng, config.image_chance) {
                let image = images.pop().ok_or_else(|| exhausted(PoolKind::Images))?;
                slides.push(Slide::Image(image));
            } else {
                let word = words.pop().ok_or_else(|| exhausted(PoolKind::Words))?;
                slides.push(Slide::Word(word));
            }
        }

        let die = sampler::d100(rng);
        let num_highlights = if die <= config.three_pct {
            3
        } else if die <= config.two_pct {
            2
        } else {
            1
        };

        // Highlights may only land on indices 2..len-1, so a deck shorter
        // than four slides can never place one.
        if config.length < 4 {
            return Err(CourseError::DeckTooSmall {
                requested: num_highlights,
            });
        }

        let mut highlights: Vec<String> = Vec::with_capacity(num_highlights);
        let mut attempts = 0u32;
        for _ in 0..num_highlights {
            loop {
                attempts += 1;
                if attempts > config.retry_budget {
                    return Err(CourseError::DeckTooSmall {
                        requested: num_highlights,
                    });
                }

                let index = sampler::uniform(rng, config.length);

                // Never the first two slides or the last one, and only
                // plain word slides are eligible.
                if index < 2 || index == config.length - 1 {
                    continue;
                }
                let word = match &slides[index] {
                    Slide::Word(word) => word.clone(),
                    _ => continue,
                };
                if highlights.contains(&word) {
                    continue;
                }

                highlights.push(word.clone());
                slides[index] = Slide::Highlighted(word);
                break;
            }
        }

        Ok(Self { slides, highlights })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Highlighted words, in assignment order.
    pub fn highlights(&self) -> &[String] {
        &self.highlights
    }

    /// The plain (non-highlighted) words that appeared in this deck; the
    /// distractor pool for the challenge.
    pub fn word_pool(&self) -> Vec<&str> {
        self.slides
            .iter()
            .filter_map(|slide| match slide {
                Slide::Word(word) => Some(word.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn word_pool(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i}")).collect()
    }

    fn image_pool(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("img{i}.jpg")).collect()
    }

    fn words_only_config(length: usize) -> DeckConfig {
        DeckConfig {
            length,
            image_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn deck_has_requested_length() {
        let mut rng = StdRng::seed_from_u64(11);
        for seed in 0..20 {
            let mut rng2 = StdRng::seed_from_u64(seed);
            let deck = Deck::build(
                &mut rng2,
                &word_pool(40),
                &word_pool(40),
                &image_pool(30),
                &DeckConfig::default(),
            )
            .unwrap();
            assert_eq!(deck.len(), DeckConfig::default().length);
        }
        let deck = Deck::build(&mut rng, &word_pool(40), &[], &[], &words_only_config(10)).unwrap();
        assert_eq!(deck.len(), 10);
    }

    #[test]
    fn forced_two_highlights_are_distinct_and_well_placed() {
        // Deck of length 10, words only, exactly 2 highlights.
        let config = DeckConfig {
            two_pct: 100,
            three_pct: 0,
            ..words_only_config(10)
        };
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let deck = Deck::build(&mut rng, &word_pool(10), &[], &[], &config).unwrap();

            let positions: Vec<usize> = deck
                .slides()
                .iter()
                .enumerate()
                .filter(|(_, s)| matches!(s, Slide::Highlighted(_)))
                .map(|(i, _)| i)
                .collect();

            assert_eq!(positions.len(), 2);
            assert_eq!(deck.highlights().len(), 2);
            assert_ne!(deck.highlights()[0], deck.highlights()[1]);
            for pos in positions {
                assert!(pos >= 2, "highlight at index {pos}");
                assert_ne!(pos, 9, "highlight on the last slide");
            }
        }
    }

    #[test]
    fn forced_three_highlights() {
        let config = DeckConfig {
            two_pct: 100,
            three_pct: 100,
            ..words_only_config(12)
        };
        let mut rng = StdRng::seed_from_u64(3);
        let deck = Deck::build(&mut rng, &word_pool(12), &[], &[], &config).unwrap();
        assert_eq!(deck.highlights().len(), 3);
    }

    #[test]
    fn single_highlight_by_default_percentages() {
        let config = DeckConfig {
            two_pct: 0,
            three_pct: 0,
            ..words_only_config(10)
        };
        let mut rng = StdRng::seed_from_u64(5);
        let deck = Deck::build(&mut rng, &word_pool(10), &[], &[], &config).unwrap();
        assert_eq!(deck.highlights().len(), 1);
    }

    #[test]
    fn highlights_never_retag_images() {
        let config = DeckConfig {
            length: 15,
            image_chance: 0.5,
            two_pct: 100,
            three_pct: 0,
            ..Default::default()
        };
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let deck = Deck::build(&mut rng, &word_pool(30), &[], &image_pool(30), &config).unwrap();
            for slide in deck.slides() {
                if let Slide::Highlighted(word) = slide {
                    assert!(word.starts_with("word"));
                }
            }
        }
    }

    #[test]
    fn duplicate_words_do_not_survive_into_one_deck() {
        let mut pool = word_pool(15);
        pool.extend(word_pool(15)); // every word twice
        let mut rng = StdRng::seed_from_u64(9);
        let deck = Deck::build(&mut rng, &pool, &pool, &[], &words_only_config(12)).unwrap();

        let mut seen = std::collections::HashSet::new();
        for slide in deck.slides() {
            match slide {
                Slide::Word(w) | Slide::Highlighted(w) => {
                    assert!(seen.insert(w.clone()), "word {w} appeared twice");
                }
                Slide::Image(_) => {}
            }
        }
    }

    #[test]
    fn exhausted_image_pool_fails() {
        let config = DeckConfig {
            length: 10,
            image_chance: 1.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let result = Deck::build(&mut rng, &word_pool(20), &[], &image_pool(3), &config);
        assert_matches!(
            result,
            Err(CourseError::InsufficientPool {
                kind: PoolKind::Images,
                ..
            })
        );
    }

    #[test]
    fn exhausted_word_pool_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = Deck::build(&mut rng, &word_pool(4), &[], &[], &words_only_config(10));
        assert_matches!(
            result,
            Err(CourseError::InsufficientPool {
                kind: PoolKind::Words,
                ..
            })
        );
    }

    #[test]
    fn decks_too_short_for_any_highlight_fail_cleanly() {
        // Lengths 0..=3 leave no eligible highlight index at all; each must
        // surface as an error, never a panic.
        for length in 0..4 {
            let mut rng = StdRng::seed_from_u64(2);
            let result = Deck::build(&mut rng, &word_pool(10), &[], &[], &words_only_config(length));
            assert_matches!(result, Err(CourseError::DeckTooSmall { .. }));
        }
    }

    #[test]
    fn too_few_eligible_slides_fails() {
        // Length 4 leaves a single eligible index (2), so a forced second
        // highlight can never be placed.
        let config = DeckConfig {
            two_pct: 100,
            three_pct: 0,
            ..words_only_config(4)
        };
        let mut rng = StdRng::seed_from_u64(1);
        let result = Deck::build(&mut rng, &word_pool(6), &[], &[], &config);
        assert_matches!(result, Err(CourseError::DeckTooSmall { requested: 2 }));
    }

    #[test]
    fn word_pool_excludes_highlights() {
        let config = DeckConfig {
            two_pct: 100,
            three_pct: 0,
            ..words_only_config(10)
        };
        let mut rng = StdRng::seed_from_u64(21);
        let deck = Deck::build(&mut rng, &word_pool(10), &[], &[], &config).unwrap();
        let pool = deck.word_pool();
        assert_eq!(pool.len(), 8);
        for highlight in deck.highlights() {
            assert!(!pool.contains(&highlight.as_str()));
        }
    }
}
