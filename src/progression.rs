//! Day/lesson progression: decides whether a lesson exists today, which
//! framing panel precedes a slideshow, and when the lesson day advances.
//!
//! All counters live in one `ProgressCounters` value that this type owns
//! exclusively; every mutation is followed by an explicit store save, so a
//! reload mid-course lands exactly where the user left off.

use crate::calendar::{Calendar, MAX_LESSON_DAY};
use crate::clock::{CalendarDay, Clock};
use crate::config::{ConfigStore, ProgressCounters};
use crate::error::CourseError;

/// Which framing panel to show before a slideshow starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Very first slideshow: the long, explanatory intro.
    Intro,
    /// Second viewing within a single calendar day: the repeat caution.
    SecondView,
    /// Any other day: the brief description.
    Brief,
}

impl Framing {
    pub fn article_id(self) -> &'static str {
        match self {
            Framing::Intro => "SSDay1",
            Framing::SecondView => "SS2ndView",
            Framing::Brief => "SSToday",
        }
    }
}

/// The course session state machine: `ProgressCounters` plus the injected
/// store and clock collaborators.
///
/// Unconfigured -> configured via `configure`; within configured, active and
/// paused toggle via `pause`/`resume`. Only `reset` returns to unconfigured.
pub struct Progression<S: ConfigStore, C: Clock> {
    counters: ProgressCounters,
    calendar: Calendar,
    store: S,
    clock: C,
}

impl<S: ConfigStore, C: Clock> Progression<S, C> {
    /// Load counters from the store and bind the collaborators.
    pub fn load(store: S, clock: C, calendar: Calendar) -> Self {
        let counters = store.load();
        Self {
            counters,
            calendar,
            store,
            clock,
        }
    }

    pub fn counters(&self) -> &ProgressCounters {
        &self.counters
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn today(&self) -> CalendarDay {
        self.clock.today()
    }

    /// The single authoritative definition of "configured": a category has
    /// been chosen.
    pub fn is_configured(&self) -> bool {
        !self.counters.category.is_empty()
    }

    pub fn category(&self) -> &str {
        &self.counters.category
    }

    pub fn is_paused(&self) -> bool {
        self.counters.paused
    }

    pub fn lesson_day(&self) -> u32 {
        self.counters.lesson_day
    }

    /// Lesson article scheduled for the current lesson day, if any.
    pub fn lesson_today(&self) -> Option<&'static str> {
        self.calendar.lesson_for_day(self.counters.lesson_day)
    }

    pub fn is_lesson_scheduled_today(&self) -> bool {
        self.lesson_today().is_some()
    }

    /// True when today's lesson ends with homework to complete.
    pub fn is_homework_scheduled_today(&self) -> bool {
        self.calendar.is_homework_day(self.counters.lesson_day)
    }

    fn multi_view_seen(&self, today: CalendarDay) -> bool {
        self.counters.multi_view_cday == today
    }

    fn save(&self) -> Result<(), CourseError> {
        self.store.save(&self.counters)?;
        Ok(())
    }

    /// One-time transition from unconfigured to configured. Reconfiguring an
    /// already-configured course is a caller-confirmed decision; this simply
    /// resets and configures.
    pub fn configure(&mut self, category: &str, today: CalendarDay) -> Result<(), CourseError> {
        self.counters = ProgressCounters {
            start_cday: today,
            lesson_day: 1,
            // One day back, so the pull-based due-check at the next session
            // start performs the day-1 advance rather than skipping it.
            achieved_cday: today - 1,
            paused: false,
            intro_seen: false,
            multi_view_cday: 0,
            category: category.to_string(),
        };
        self.save()
    }

    /// Back to the unconfigured zero state.
    pub fn reset(&mut self) -> Result<(), CourseError> {
        self.counters = ProgressCounters::default();
        self.save()
    }

    /// Advance the lesson day if a new calendar day has arrived. Idempotent
    /// within one calendar day, a no-op while paused, and capped at
    /// MAX_LESSON_DAY (the final panel offers a reset instead).
    pub fn advance_day_if_due(&mut self, today: CalendarDay) -> Result<(), CourseError> {
        if self.counters.paused || self.counters.achieved_cday >= today {
            return Ok(());
        }
        self.counters.achieved_cday = today;
        if self.counters.lesson_day < MAX_LESSON_DAY {
            self.counters.lesson_day += 1;
        }
        // The repeat-viewing caution is scoped to the day it was stamped
        // with, so crossing a day boundary clears it.
        self.counters.multi_view_cday = 0;
        self.save()
    }

    /// Disable the daily increment while the user works on homework.
    pub fn pause(&mut self) -> Result<(), CourseError> {
        self.counters.paused = true;
        self.save()
    }

    /// Re-enable the daily increment. Also stamps today as achieved so the
    /// next due-check cannot re-advance on the day the pause lifts.
    pub fn resume(&mut self, today: CalendarDay) -> Result<(), CourseError> {
        self.counters.paused = false;
        self.counters.achieved_cday = today;
        self.save()
    }

    /// Session-only override of the lesson day, for testing and demos.
    /// Deliberately not persisted.
    pub fn force_lesson_day(&mut self, day: u32) {
        self.counters.lesson_day = day.clamp(1, MAX_LESSON_DAY);
    }

    /// Which framing panel precedes the slideshow about to run.
    pub fn framing(&self, today: CalendarDay) -> Framing {
        if !self.counters.intro_seen && self.counters.lesson_day == 1 {
            Framing::Intro
        } else if self.counters.achieved_cday == today && !self.multi_view_seen(today) {
            Framing::SecondView
        } else {
            Framing::Brief
        }
    }

    /// Record that a slideshow ran to completion today.
    pub fn record_slideshow_viewed(&mut self, today: CalendarDay) -> Result<(), CourseError> {
        self.counters.intro_seen = true;
        if self.counters.achieved_cday == today {
            self.counters.multi_view_cday = today;
        }
        self.save()
    }
}
