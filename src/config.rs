use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::clock::CalendarDay;

/// Everything persisted between sessions. Owned and written exclusively by
/// `Progression`; every mutation is followed by an explicit save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressCounters {
    /// Calendar day the course was configured. Set once.
    pub start_cday: CalendarDay,
    /// Current lesson day, 1..=MAX_LESSON_DAY. 0 until configured.
    pub lesson_day: u32,
    /// Calendar day of the last lesson-day advance. Guards against a
    /// double advance within one calendar day.
    pub achieved_cday: CalendarDay,
    /// True while the user is mid-homework; suppresses auto-advance.
    pub paused: bool,
    /// False only before the very first slideshow.
    pub intro_seen: bool,
    /// Calendar day on which a repeat viewing was recorded. The flag reads
    /// as set only when this equals today, so it cannot leak across a day
    /// boundary. 0 = never.
    pub multi_view_cday: CalendarDay,
    /// Category of the user's project (ex: "pottery"). Empty = unconfigured.
    pub category: String,
}

impl Default for ProgressCounters {
    fn default() -> Self {
        Self {
            start_cday: 0,
            lesson_day: 0,
            achieved_cday: 0,
            paused: false,
            intro_seen: false,
            multi_view_cday: 0,
            category: String::new(),
        }
    }
}

pub trait ConfigStore {
    /// Stored counters, or defaults when nothing was stored or the stored
    /// data does not parse.
    fn load(&self) -> ProgressCounters;
    fn save(&self, counters: &ProgressCounters) -> std::io::Result<()>;
    fn clear(&self) -> std::io::Result<()>;
    /// Checked once at session start; an unavailable store degrades the app
    /// to a fixed notice instead of crashing.
    fn is_available(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "moti") {
            pd.config_dir().join("progress.json")
        } else {
            PathBuf::from("moti_progress.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> ProgressCounters {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(counters) = serde_json::from_slice::<ProgressCounters>(&bytes) {
                return counters;
            }
        }
        ProgressCounters::default()
    }

    fn save(&self, counters: &ProgressCounters) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(counters).unwrap_or_default();
        fs::write(&self.path, data)
    }

    fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    fn is_available(&self) -> bool {
        self.save(&self.load()).is_ok()
    }
}

/// In-memory store for unit tests and for runs where persistence was found
/// unavailable at startup.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    counters: std::cell::RefCell<ProgressCounters>,
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> ProgressCounters {
        self.counters.borrow().clone()
    }

    fn save(&self, counters: &ProgressCounters) -> std::io::Result<()> {
        *self.counters.borrow_mut() = counters.clone();
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        *self.counters.borrow_mut() = ProgressCounters::default();
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }
}
