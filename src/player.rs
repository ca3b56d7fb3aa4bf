//! The slideshow player: a deadline-driven state machine that advances
//! through a deck one slide per interval.
//!
//! The caller owns the clock and feeds monotonic `now` values into `tick`,
//! so tests drive playback with synthetic time instead of wall-clock timers.
//! Only one playback is ever active: `begin` unconditionally discards any
//! in-flight deck and deadlines before arming new ones.

use std::time::Duration;

use rand::Rng;

use crate::deck::{Deck, Slide};
use crate::error::CourseError;
use crate::presenter::{Presenter, WORD_STYLES};
use crate::sampler;

/// Brief delay between arming a playback and the first slide interval.
pub const PRIME_DELAY: Duration = Duration::from_millis(2000);
/// Fixed time each slide stays on screen.
pub const SLIDE_INTERVAL: Duration = Duration::from_millis(700);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Priming,
    Playing,
    Finished,
    Interrupted,
}

/// What one tick did. Completion and interruption surface as values here
/// rather than callbacks, so the caller transitions exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Nothing due yet (or the player is not running).
    Waiting,
    /// One slide was rendered and the cursor advanced.
    Rendered,
    /// The deck is exhausted; carries the highlighted words in the order
    /// they were assigned during deck construction.
    Finished(Vec<String>),
    /// A raised interrupt was observed. Reported exactly once.
    Interrupted,
}

pub struct Player {
    phase: Phase,
    deck: Option<Deck>,
    cursor: usize,
    interrupt: bool,
    next_due: Option<Duration>,
    prime_delay: Duration,
    slide_interval: Duration,
}

impl Player {
    pub fn new() -> Self {
        Self::with_timing(PRIME_DELAY, SLIDE_INTERVAL)
    }

    /// Custom pacing, used by tests to run playback with zero delays.
    pub fn with_timing(prime_delay: Duration, slide_interval: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            deck: None,
            cursor: 0,
            interrupt: false,
            next_due: None,
            prime_delay,
            slide_interval,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Arm a new playback. Any previous deck, cursor, deadline, or pending
    /// interrupt is discarded first, so two playbacks can never race.
    pub fn begin(&mut self, deck: Deck, now: Duration) {
        self.deck = Some(deck);
        self.cursor = 0;
        self.interrupt = false;
        self.phase = Phase::Priming;
        self.next_due = Some(now + self.prime_delay);
    }

    /// Raise the cooperative interrupt flag. Polled once per tick, before
    /// any rendering; raising it when nothing is playing is a no-op.
    pub fn interrupt(&mut self) {
        self.interrupt = true;
    }

    /// Advance the state machine to `now`. Renders at most one slide.
    pub fn tick<R: Rng + ?Sized, P: Presenter>(
        &mut self,
        now: Duration,
        rng: &mut R,
        presenter: &mut P,
    ) -> Result<Tick, CourseError> {
        match self.phase {
            Phase::Idle | Phase::Finished | Phase::Interrupted => return Ok(Tick::Waiting),
            Phase::Priming | Phase::Playing => {}
        }

        if self.interrupt {
            self.teardown(Phase::Interrupted);
            return Ok(Tick::Interrupted);
        }

        match self.next_due {
            Some(due) if now >= due => {}
            _ => return Ok(Tick::Waiting),
        }

        if self.phase == Phase::Priming {
            self.phase = Phase::Playing;
            self.next_due = Some(now + self.slide_interval);
            return Ok(Tick::Waiting);
        }

        let deck = match self.deck.as_ref() {
            Some(deck) => deck,
            None => return Ok(Tick::Waiting),
        };

        if self.cursor < deck.len() {
            let slide = deck.slides()[self.cursor].clone();
            match &slide {
                Slide::Word(word) => presenter.render_word(word)?,
                Slide::Image(image) => presenter.render_image(image)?,
                Slide::Highlighted(word) => {
                    let style = *sampler::draw(rng, &WORD_STYLES)?;
                    presenter.render_styled_word(word, style)?;
                }
            }
            self.cursor += 1;
            self.next_due = Some(now + self.slide_interval);
            return Ok(Tick::Rendered);
        }

        // Deck exhausted: the last slide's render has already returned, so
        // the challenge step may begin.
        let highlights = self
            .deck
            .take()
            .map(|deck| deck.highlights().to_vec())
            .unwrap_or_default();
        self.teardown(Phase::Finished);
        Ok(Tick::Finished(highlights))
    }

    fn teardown(&mut self, phase: Phase) {
        self.phase = phase;
        self.deck = None;
        self.next_due = None;
        self.interrupt = false;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
