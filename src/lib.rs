// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod articles;
pub mod calendar;
pub mod catalog;
pub mod challenge;
pub mod clock;
pub mod config;
pub mod deck;
pub mod error;
pub mod player;
pub mod presenter;
pub mod progression;
pub mod runtime;
pub mod sampler;
pub mod ui;
