use thiserror::Error;

/// Which embedded pool a deck draw ran out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Words,
    Images,
}

impl std::fmt::Display for PoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolKind::Words => write!(f, "words"),
            PoolKind::Images => write!(f, "images"),
        }
    }
}

/// Error taxonomy for the course engine.
///
/// Construction-time errors (catalog lookup, deck building, configuration)
/// are recoverable at the session-start boundary; anything raised during an
/// in-flight playback abandons that playback.
#[derive(Debug, Error)]
pub enum CourseError {
    #[error("unknown project category ({0})")]
    UnknownCategory(String),

    #[error("unknown article id ({0})")]
    UnknownArticle(String),

    #[error("no project category configured")]
    NotConfigured,

    #[error("{kind} pool exhausted after {drawn} of {requested} slides")]
    InsufficientPool {
        kind: PoolKind,
        drawn: usize,
        requested: usize,
    },

    #[error("deck has too few eligible word slides for {requested} highlights")]
    DeckTooSmall { requested: usize },

    #[error("draw from an empty list")]
    EmptyInput,

    #[error("could not render slide: {0}")]
    Render(String),

    #[error("local storage is not available")]
    PersistenceUnavailable,

    #[error("could not persist progress: {0}")]
    Persistence(#[from] std::io::Error),
}
