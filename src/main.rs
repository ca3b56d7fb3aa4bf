use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::rngs::ThreadRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::{Duration, Instant},
};

use moti::{
    articles,
    calendar::{Calendar, MAX_LESSON_DAY},
    catalog::{self, Category},
    challenge,
    clock::SystemClock,
    config::{ConfigStore, FileConfigStore},
    deck::{Deck, DeckConfig},
    error::CourseError,
    player::{Player, Tick},
    presenter::Presenter,
    progression::Progression,
    runtime::{AppEvent, CrosstermEventSource, Runner, TICK_RATE},
    ui::View,
};

/// a thirty-day motivation course for your hobby project
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A thirty-day motivation course for hobby projects: a daily word and image \
slideshow with a hidden-word attention check, followed by short lessons on a fixed calendar."
)]
pub struct Cli {
    /// run a one-off slideshow for a category without touching course progress
    #[clap(long, value_name = "CATEGORY")]
    slideshow: Option<String>,

    /// show a single article panel and exit on keypress
    #[clap(long, value_name = "ID")]
    article: Option<String>,

    /// override the lesson day for this session only
    #[clap(long, value_name = "N")]
    day: Option<u32>,

    /// number of slides per slideshow (at least 4)
    #[clap(long, default_value_t = 20, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(4..))]
    slides: usize,
}

/// What pressing Enter on the current panel leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    Quit,
    Contents,
    ChooseCategory,
    StartSlideshow,
    Lesson,
    LessonDone,
    ResumeAndFinish,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    Reading(NextStep),
    Playing,
    WordChallenge { position: usize, options: Vec<String> },
    CountChallenge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct App {
    progression: Progression<FileConfigStore, SystemClock>,
    player: Player,
    rng: ThreadRng,
    pub view: View,
    state: AppState,
    /// True under --slideshow/--article/--day: progress is never written.
    manual: bool,
    category_override: Option<String>,
    deck_config: DeckConfig,
    highlights: Vec<String>,
    word_pool: Vec<String>,
    categories: Vec<(String, String)>,
    origin: Instant,
}

impl App {
    pub fn new(cli: &Cli) -> Result<Self, CourseError> {
        let store = FileConfigStore::new();
        let storage_ok = store.is_available();
        let mut progression = Progression::load(store, SystemClock, Calendar::course());

        // Overrides must name real embedded content, and the failure belongs
        // on stderr, before the terminal is put into raw mode.
        if let Some(name) = &cli.slideshow {
            Category::load(name)?;
        }
        if let Some(id) = &cli.article {
            articles::lookup(id)?;
        }
        if let Some(day) = cli.day {
            progression.force_lesson_day(day);
        }

        let categories = Category::names()
            .into_iter()
            .map(|name| {
                let display = Category::load(&name)
                    .map(|c| c.display_name)
                    .unwrap_or_else(|_| name.clone());
                (name, display)
            })
            .collect();

        let manual = cli.slideshow.is_some() || cli.article.is_some() || cli.day.is_some();

        let mut app = Self {
            progression,
            player: Player::new(),
            rng: rand::thread_rng(),
            view: View::blank(),
            state: AppState::Reading(NextStep::Quit),
            manual,
            category_override: cli.slideshow.clone(),
            deck_config: DeckConfig {
                length: cli.slides,
                ..Default::default()
            },
            highlights: Vec::new(),
            word_pool: Vec::new(),
            categories,
            origin: Instant::now(),
        };

        if !storage_ok {
            app.show_article("EnableStorage", NextStep::Quit, "enter/q: quit")?;
            return Ok(app);
        }

        app.start_session(cli)?;
        Ok(app)
    }

    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn show_article(&mut self, id: &str, next: NextStep, footer: &str) -> Result<(), CourseError> {
        self.view.display_article(id)?;
        self.view.set_footer(footer);
        self.state = AppState::Reading(next);
        Ok(())
    }

    /// Session-start dispatch: overrides first, then the normal
    /// configured/unconfigured paths.
    fn start_session(&mut self, cli: &Cli) -> Result<(), CourseError> {
        if cli.slideshow.is_some() {
            return self.show_article("SSToday", NextStep::StartSlideshow, "enter: begin · q: quit");
        }
        if let Some(id) = cli.article.clone() {
            return self.show_article(&id, NextStep::Quit, "enter/q: quit");
        }

        if !self.progression.is_configured() {
            return self.show_contents();
        }

        // The day advance is pulled exactly once, here.
        let today = self.progression.today();
        if !self.manual {
            self.progression.advance_day_if_due(today)?;
        }
        self.show_framing()
    }

    fn show_contents(&mut self) -> Result<(), CourseError> {
        if self.progression.is_configured() {
            self.show_article(
                "Contents",
                NextStep::Contents,
                "enter: run today's slideshow · q: quit",
            )
        } else {
            let mut footer = String::from("choose a project category:  ");
            for (i, (_, display)) in self.categories.iter().enumerate() {
                footer.push_str(&format!("{}. {}  ", i + 1, display));
            }
            footer.push_str("· q: quit");
            self.show_article("Contents", NextStep::ChooseCategory, &footer)
        }
    }

    fn show_framing(&mut self) -> Result<(), CourseError> {
        let today = self.progression.today();
        let framing = self.progression.framing(today);
        self.show_article(
            framing.article_id(),
            NextStep::StartSlideshow,
            "enter: begin · esc: quit",
        )
    }

    fn start_slideshow(&mut self) -> Result<(), CourseError> {
        let name = match &self.category_override {
            Some(name) => name.clone(),
            None => {
                if !self.progression.is_configured() {
                    return Err(CourseError::NotConfigured);
                }
                self.progression.category().to_string()
            }
        };
        let category = Category::load(&name)?;
        let deck = Deck::build(
            &mut self.rng,
            &category.words,
            &catalog::generic_words(),
            &category.images,
            &self.deck_config,
        )?;
        // The deck moves into the player; keep what the challenge needs.
        self.word_pool = deck.word_pool().into_iter().map(str::to_string).collect();
        self.player.begin(deck, self.now());
        self.view = View::blank();
        self.state = AppState::Playing;
        Ok(())
    }

    fn on_tick(&mut self) -> Result<(), CourseError> {
        if self.state != AppState::Playing {
            return Ok(());
        }
        let now = self.now();
        match self.player.tick(now, &mut self.rng, &mut self.view)? {
            Tick::Waiting | Tick::Rendered => Ok(()),
            Tick::Interrupted => {
                self.show_article("SSInterrupt", NextStep::Contents, "enter: back · q: quit")
            }
            Tick::Finished(highlights) => {
                if !self.manual {
                    let today = self.progression.today();
                    self.progression.record_slideshow_viewed(today)?;
                }
                self.highlights = highlights;
                if self.highlights.is_empty() {
                    self.run_lesson()
                } else if self.highlights.len() > 2 {
                    self.show_count_challenge()
                } else {
                    self.show_word_challenge(0, "Which word stood out?")
                }
            }
        }
    }

    fn show_word_challenge(&mut self, position: usize, prompt: &str) -> Result<(), CourseError> {
        let pool: Vec<&str> = self.word_pool.iter().map(String::as_str).collect();
        let options = challenge::build_distractor_set(
            &mut self.rng,
            &self.highlights[position],
            &pool,
            &self.highlights,
            3,
        )?;
        let title = if position == 0 {
            "The Highlighted Word"
        } else {
            "And the Other One"
        };
        self.view = View::Choices {
            title: title.to_string(),
            prompt: prompt.to_string(),
            options: options.clone(),
        };
        self.state = AppState::WordChallenge { position, options };
        Ok(())
    }

    fn show_count_challenge(&mut self) -> Result<(), CourseError> {
        let article = articles::lookup("SSNums")?;
        self.view = View::Choices {
            title: article.title.clone(),
            prompt: article.body.clone(),
            options: vec!["one".into(), "two".into(), "three".into(), "four".into()],
        };
        self.state = AppState::CountChallenge;
        Ok(())
    }

    /// The challenge is solved; run today's lesson if one is scheduled.
    fn run_lesson(&mut self) -> Result<(), CourseError> {
        if self.manual {
            return self.show_article("Contents", NextStep::Quit, "enter/q: quit");
        }

        let today = self.progression.today();
        if !self.progression.is_lesson_scheduled_today() {
            let id = if self.progression.lesson_day() == 1 {
                "NoLesson1"
            } else {
                "NoLesson"
            };
            self.progression.resume(today)?;
            return self.show_article(id, NextStep::Quit, "enter/q: quit");
        }

        self.show_article(
            "AskLesson",
            NextStep::Lesson,
            "enter: start lesson · k: not today · q: quit",
        )
    }

    fn show_lesson(&mut self) -> Result<(), CourseError> {
        let id = self
            .progression
            .lesson_today()
            .ok_or(CourseError::NotConfigured)?;
        self.show_article(
            id,
            NextStep::LessonDone,
            "enter: lesson done · w: wait here until finished · q: quit",
        )
    }

    fn lesson_done(&mut self) -> Result<(), CourseError> {
        if self.progression.is_homework_scheduled_today() {
            // Homework lessons gate the course until the work is confirmed.
            self.progression.pause()?;
            return self.show_article(
                "WaitHW",
                NextStep::ResumeAndFinish,
                "enter: homework done · q: quit",
            );
        }
        let today = self.progression.today();
        self.progression.resume(today)?;
        if self.progression.lesson_day() >= MAX_LESSON_DAY {
            self.show_article("Done", NextStep::Quit, "enter/q: quit")
        } else {
            self.show_article("LessonDone", NextStep::Contents, "enter: back · q: quit")
        }
    }

    fn on_enter(&mut self, next: NextStep) -> Result<Flow, CourseError> {
        match next {
            NextStep::Quit => return Ok(Flow::Exit),
            NextStep::Contents => self.show_contents()?,
            // Waiting for a digit key instead.
            NextStep::ChooseCategory => {}
            NextStep::StartSlideshow => self.start_slideshow()?,
            NextStep::Lesson => self.show_lesson()?,
            NextStep::LessonDone => self.lesson_done()?,
            NextStep::ResumeAndFinish => {
                let today = self.progression.today();
                self.progression.resume(today)?;
                self.show_article("LessonDone", NextStep::Contents, "enter: back · q: quit")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn on_digit(&mut self, n: usize) -> Result<(), CourseError> {
        match self.state.clone() {
            AppState::Reading(NextStep::ChooseCategory) => {
                if let Some((name, _)) = self.categories.get(n - 1).cloned() {
                    let today = self.progression.today();
                    self.progression.configure(&name, today)?;
                    self.show_framing()?;
                }
                Ok(())
            }
            AppState::WordChallenge { position, options } => {
                let Some(guess) = options.get(n - 1) else {
                    return Ok(());
                };
                match challenge::check_guess(guess, position, &self.highlights) {
                    challenge::Outcome::Correct => {
                        if position + 1 < self.highlights.len() {
                            self.show_word_challenge(position + 1, "Right! There was another one.")
                        } else {
                            self.run_lesson()
                        }
                    }
                    challenge::Outcome::Incorrect => {
                        if let View::Choices { prompt, .. } = &mut self.view {
                            *prompt = "Not that one. Try again.".to_string();
                        }
                        Ok(())
                    }
                }
            }
            AppState::CountChallenge => match challenge::check_count(n, &self.highlights) {
                challenge::Outcome::Correct => self.run_lesson(),
                challenge::Outcome::Incorrect => {
                    if let View::Choices { prompt, .. } = &mut self.view {
                        *prompt = "Not quite. How many were there?".to_string();
                    }
                    Ok(())
                }
            },
            _ => Ok(()),
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Result<Flow, CourseError> {
        if key.kind != KeyEventKind::Press {
            return Ok(Flow::Continue);
        }

        // ESC aborts a running slideshow; anywhere else it quits.
        if key.code == KeyCode::Esc {
            if self.state == AppState::Playing {
                self.player.interrupt();
                return Ok(Flow::Continue);
            }
            return Ok(Flow::Exit);
        }

        // During playback every other key is swallowed; the slideshow is
        // meant to be watched, not driven.
        if self.state == AppState::Playing {
            return Ok(Flow::Continue);
        }

        match key.code {
            KeyCode::Char('q') => Ok(Flow::Exit),
            KeyCode::Enter => {
                if let AppState::Reading(next) = self.state.clone() {
                    self.on_enter(next)
                } else {
                    Ok(Flow::Continue)
                }
            }
            KeyCode::Char('k') => {
                if self.state == AppState::Reading(NextStep::Lesson) {
                    // Lesson declined: hold the day counter until it is done.
                    self.progression.pause()?;
                    self.show_article(
                        "WaitDay",
                        NextStep::ResumeAndFinish,
                        "enter: I'm done · q: quit",
                    )?;
                }
                Ok(Flow::Continue)
            }
            KeyCode::Char('w') => {
                if self.state == AppState::Reading(NextStep::LessonDone) {
                    // Homework mode: the course waits at this lesson.
                    self.progression.pause()?;
                    self.show_article(
                        "WaitLesson",
                        NextStep::ResumeAndFinish,
                        "enter: I'm done · q: quit",
                    )?;
                }
                Ok(Flow::Continue)
            }
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                self.on_digit(c as usize - '0' as usize)?;
                Ok(Flow::Continue)
            }
            _ => Ok(Flow::Continue),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = match App::new(&cli) {
        Ok(app) => app,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), TICK_RATE);

    loop {
        terminal.draw(|f| f.render_widget(&app.view, f.area()))?;

        let step = match runner.step() {
            AppEvent::Key(key) => app.on_key(key),
            AppEvent::Resize => Ok(Flow::Continue),
            AppEvent::Tick => app.on_tick().map(|()| Flow::Continue),
        };

        match step {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            // A mid-session error abandons the slideshow and lands on a
            // plain panel instead of tearing the terminal down mid-draw.
            Err(e) => {
                app.view = View::Article {
                    title: "Something Went Wrong".to_string(),
                    body: e.to_string(),
                    footer: "enter/q: quit".to_string(),
                };
                app.state = AppState::Reading(NextStep::Quit);
            }
        }
    }

    Ok(())
}
