//! The 30-day course calendar: which lesson (if any) falls on each lesson day.

/// Highest lesson day in the course. The final panel offers a course reset,
/// so the day counter never advances past this point.
pub const MAX_LESSON_DAY: u32 = 30;

/// Lessons that end with homework. The course waits at these until the
/// user confirms the work is done.
const HOMEWORK_LESSONS: [&str; 8] = [
    "TWB00", "TWD00", "TWF00", "NCB00", "NCC00", "JOB00", "JOC00", "COG00",
];

/// Dense mapping from lesson day (1..=MAX_LESSON_DAY) to an optional lesson
/// article id. Index 0 is an unused placeholder so the lesson day doubles as
/// the index.
#[derive(Debug, Clone)]
pub struct Calendar {
    entries: Vec<&'static str>,
}

impl Calendar {
    /// The standard course schedule. Empty entries are rest days.
    pub fn course() -> Self {
        Self {
            entries: vec![
                "",      // Day 00  (placeholder)
                "",      // Day 01
                "TWA00", // Day 02  Types of motivation - choose weakest
                "TWB00", // Day 03  (HW)
                "TWC00", // Day 04  Extrinsic replaces intrinsic
                "TWD00", // Day 05  (HW) Fold up, write completion
                "TWE00", // Day 06  Mantras
                "TWF00", // Day 07  (HW) Motivational focus
                "",      // Day 08
                "RST00", // Day 09  Restarting your project
                "",      // Day 10
                "NCA00", // Day 11  Norepinephrine - make easier/simpler
                "NCB00", // Day 12  (HW) Dopamine - do 1 small task
                "NCC00", // Day 13  (HW) Continuing easier than starting
                "NCD00", // Day 14  Serotonin is reward
                "",      // Day 15
                "RSU00", // Day 16  Restarting, part 2
                "RSA00", // Day 17  RAS part 1
                "RSB00", // Day 18  RAS part 2
                "JOA00", // Day 19  Project as journey
                "JOB00", // Day 20  (HW) Lesson plan/Idea
                "JOC00", // Day 21  (HW) Sketch
                "JOD00", // Day 22  Decision
                "",      // Day 23
                "FAI00", // Day 24  Dealing with failure
                "",      // Day 25
                "COG00", // Day 26  (HW) Cognitive gas tank
                "TUA00", // Day 27  Tuning 1
                "FLO00", // Day 28  Flow
                "",      // Day 29
                "PRI00", // Day 30  Pride
            ],
        }
    }

    /// A custom schedule, mostly for tests. Entry 0 must be the placeholder.
    pub fn with_entries(entries: Vec<&'static str>) -> Self {
        Self { entries }
    }

    /// Lesson article id scheduled for `lesson_day`, if any.
    pub fn lesson_for_day(&self, lesson_day: u32) -> Option<&'static str> {
        match self.entries.get(lesson_day as usize) {
            Some(&id) if !id.is_empty() => Some(id),
            _ => None,
        }
    }

    /// True when the lesson on `lesson_day` ends with homework.
    pub fn is_homework_day(&self, lesson_day: u32) -> bool {
        self.lesson_for_day(lesson_day)
            .map(|id| HOMEWORK_LESSONS.contains(&id))
            .unwrap_or(false)
    }

    /// Iterate (day, lesson id) pairs for the contents/calendar panel.
    pub fn days(&self) -> impl Iterator<Item = (u32, Option<&'static str>)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .skip(1)
            .map(|(day, &id)| (day as u32, if id.is_empty() { None } else { Some(id) }))
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::course()
    }
}
