//! What is currently on screen, and how to draw it.
//!
//! The core never touches ratatui directly: the slideshow player and the
//! session flow write into a `View` through the `Presenter` trait, and the
//! main loop draws whatever the view holds once per iteration.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::articles;
use crate::error::CourseError;
use crate::presenter::{Presenter, WordStyle};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// The screen contents, as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Nothing yet (cleared screen between slideshow slides).
    Blank,
    /// An article panel with an optional key-hint footer.
    Article {
        title: String,
        body: String,
        footer: String,
    },
    /// A single slideshow word, centered, possibly styled.
    Word {
        text: String,
        style: Option<WordStyle>,
    },
    /// An image slide. Terminals get a framed placeholder with the name.
    Image { name: String },
    /// A numbered multiple-choice panel for the challenge step.
    Choices {
        title: String,
        prompt: String,
        options: Vec<String>,
    },
}

impl View {
    pub fn blank() -> Self {
        View::Blank
    }

    pub fn set_footer(&mut self, text: &str) {
        if let View::Article { footer, .. } = self {
            *footer = text.to_string();
        }
    }
}

impl Presenter for View {
    fn display_article(&mut self, id: &str) -> Result<(), CourseError> {
        let article = articles::lookup(id)?;
        *self = View::Article {
            title: article.title.clone(),
            body: article.body.clone(),
            footer: String::new(),
        };
        Ok(())
    }

    fn render_word(&mut self, text: &str) -> Result<(), CourseError> {
        *self = View::Word {
            text: text.to_string(),
            style: None,
        };
        Ok(())
    }

    fn render_image(&mut self, image: &str) -> Result<(), CourseError> {
        *self = View::Image {
            name: image.to_string(),
        };
        Ok(())
    }

    fn render_styled_word(&mut self, text: &str, style: WordStyle) -> Result<(), CourseError> {
        *self = View::Word {
            text: text.to_string(),
            style: Some(style),
        };
        Ok(())
    }
}

fn word_style(style: WordStyle) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match style {
        WordStyle::Red => base.fg(Color::Red),
        WordStyle::Green => base.fg(Color::Green),
        WordStyle::Blue => base.fg(Color::Blue),
        WordStyle::Magenta => base.fg(Color::Magenta),
        WordStyle::Orange => base.fg(Color::Rgb(255, 165, 0)),
        WordStyle::Bold => base,
        WordStyle::Italic => base.add_modifier(Modifier::ITALIC),
        WordStyle::Underlined => base.add_modifier(Modifier::UNDERLINED),
        WordStyle::Reversed => base.add_modifier(Modifier::REVERSED),
        WordStyle::Blink => base.add_modifier(Modifier::SLOW_BLINK),
    }
}

/// Vertical layout helper: one centered band of `height` rows.
fn centered_band(area: Rect, height: u16) -> Rect {
    let pad = area.height.saturating_sub(height) / 2;
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(pad),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area)[1]
}

impl Widget for &View {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.inner(ratatui::layout::Margin {
            horizontal: HORIZONTAL_MARGIN,
            vertical: VERTICAL_MARGIN,
        });

        match self {
            View::Blank => {}

            View::Article {
                title,
                body,
                footer,
            } => {
                let mut lines: Vec<Line> = vec![
                    Line::from(Span::styled(
                        title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                ];
                for text_line in body.lines() {
                    lines.push(Line::from(text_line.to_string()));
                }
                if !footer.is_empty() {
                    lines.push(Line::default());
                    lines.push(Line::from(Span::styled(
                        footer.clone(),
                        Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
                    )));
                }
                Paragraph::new(lines)
                    .alignment(Alignment::Left)
                    .wrap(Wrap { trim: false })
                    .render(area, buf);
            }

            View::Word { text, style } => {
                let styled = match style {
                    Some(s) => Span::styled(text.clone(), word_style(*s)),
                    None => Span::styled(
                        text.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                };
                Paragraph::new(Line::from(styled))
                    .alignment(Alignment::Center)
                    .render(centered_band(area, 1), buf);
            }

            View::Image { name } => {
                let band = centered_band(area, 5);
                let block = Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        " image ",
                        Style::default().add_modifier(Modifier::DIM),
                    ));
                let inner = block.inner(band);
                block.render(band, buf);
                Paragraph::new(Line::from(name.clone()))
                    .alignment(Alignment::Center)
                    .render(centered_band(inner, 1), buf);
            }

            View::Choices {
                title,
                prompt,
                options,
            } => {
                let mut lines: Vec<Line> = vec![
                    Line::from(Span::styled(
                        title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                    Line::from(prompt.clone()),
                    Line::default(),
                ];
                for (i, option) in options.iter().enumerate() {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("  {}. ", i + 1),
                            Style::default().add_modifier(Modifier::DIM),
                        ),
                        Span::raw(option.clone()),
                    ]));
                }
                Paragraph::new(lines)
                    .alignment(Alignment::Left)
                    .wrap(Wrap { trim: false })
                    .render(area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn display_article_resolves_embedded_content() {
        let mut view = View::blank();
        view.display_article("SSToday").unwrap();
        assert_matches!(&view, View::Article { title, .. } if title == "Today's Slideshow");
    }

    #[test]
    fn display_unknown_article_fails() {
        let mut view = View::blank();
        assert_matches!(
            view.display_article("ZZZ99"),
            Err(CourseError::UnknownArticle(_))
        );
    }

    #[test]
    fn render_calls_replace_the_view() {
        let mut view = View::blank();
        view.render_word("journey").unwrap();
        assert_matches!(&view, View::Word { text, style: None } if text == "journey");

        view.render_styled_word("quest", WordStyle::Green).unwrap();
        assert_matches!(
            &view,
            View::Word { text, style: Some(WordStyle::Green) } if text == "quest"
        );

        view.render_image("kiln_loading.jpg").unwrap();
        assert_matches!(&view, View::Image { name } if name == "kiln_loading.jpg");
    }
}
