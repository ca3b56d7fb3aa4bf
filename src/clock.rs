use chrono::{Datelike, Local};

/// Absolute calendar day index, timezone-adjusted. Distinct from the lesson
/// day counter, which tracks course progress.
pub type CalendarDay = i64;

/// Source of "today" for the progression logic, injectable so tests can step
/// through days without waiting for real time to pass.
pub trait Clock {
    fn today(&self) -> CalendarDay;
}

/// Wall-clock calendar day in the user's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDay {
        Local::now().date_naive().num_days_from_ce() as CalendarDay
    }
}

/// Manually advanced clock for tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub std::cell::Cell<CalendarDay>);

impl FixedClock {
    pub fn new(day: CalendarDay) -> Self {
        Self(std::cell::Cell::new(day))
    }

    pub fn set(&self, day: CalendarDay) {
        self.0.set(day);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CalendarDay {
        self.0.get()
    }
}
