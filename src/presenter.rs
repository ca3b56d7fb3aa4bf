//! The display boundary. The core calls these methods by content id or
//! slide value only; everything about layout and drawing lives behind the
//! trait.

use crate::error::CourseError;

/// Terminal analogue of the original standout-style table: how a secretly
/// highlighted word is made to stand out for one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum WordStyle {
    Red,
    Green,
    Blue,
    Magenta,
    Orange,
    Bold,
    Italic,
    Underlined,
    Reversed,
    Blink,
}

/// Styles eligible for a highlighted word, drawn uniformly per slide.
pub const WORD_STYLES: [WordStyle; 10] = [
    WordStyle::Red,
    WordStyle::Green,
    WordStyle::Blue,
    WordStyle::Magenta,
    WordStyle::Orange,
    WordStyle::Bold,
    WordStyle::Italic,
    WordStyle::Underlined,
    WordStyle::Reversed,
    WordStyle::Blink,
];

/// Display collaborator for the slideshow player. A render failure is fatal
/// to the playback in progress; the player propagates it and stops.
pub trait Presenter {
    fn display_article(&mut self, id: &str) -> Result<(), CourseError>;
    fn render_word(&mut self, text: &str) -> Result<(), CourseError>;
    fn render_image(&mut self, image: &str) -> Result<(), CourseError>;
    fn render_styled_word(&mut self, text: &str, style: WordStyle) -> Result<(), CourseError>;
}

/// Presenter that records every call, for player tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub rendered: Vec<String>,
}

impl Presenter for RecordingPresenter {
    fn display_article(&mut self, id: &str) -> Result<(), CourseError> {
        self.rendered.push(format!("article:{id}"));
        Ok(())
    }

    fn render_word(&mut self, text: &str) -> Result<(), CourseError> {
        self.rendered.push(format!("word:{text}"));
        Ok(())
    }

    fn render_image(&mut self, image: &str) -> Result<(), CourseError> {
        self.rendered.push(format!("image:{image}"));
        Ok(())
    }

    fn render_styled_word(&mut self, text: &str, style: WordStyle) -> Result<(), CourseError> {
        self.rendered.push(format!("styled:{text}:{style}"));
        Ok(())
    }
}
