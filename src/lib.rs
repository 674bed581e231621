//! # mcq-quiz
//!
//! A terminal multiple-choice quiz built around a UI-free session engine.
//!
//! The [`engine`] module owns the quiz state machine ([`QuizSession`]):
//! question sequencing, answer capture, scoring, the optional countdown,
//! and result computation. Everything else is presentation: the terminal
//! app drives the engine and renders its read models.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mcq_quiz::{Quiz, QuizError, SessionConfig};
//!
//! fn main() -> Result<(), QuizError> {
//!     let config = SessionConfig {
//!         shuffle: true,
//!         time_limit: Some(600),
//!     };
//!
//!     // Load questions from a JSON file and run the quiz in the terminal
//!     let quiz = Quiz::from_json("questions.json", config)?;
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The engine can also be embedded without the terminal front-end:
//!
//! ```rust
//! use mcq_quiz::{Question, QuizSession, SessionConfig};
//!
//! let questions = vec![Question {
//!     text: "Which data structure uses LIFO?".to_string(),
//!     options: vec!["Queue".to_string(), "Stack".to_string()],
//!     correct: 1,
//!     explanation: None,
//!     unit: None,
//! }];
//!
//! let mut session = QuizSession::new(questions, SessionConfig::default()).unwrap();
//! session.start();
//! assert_eq!(session.submit_answer(1), Ok(true));
//! session.advance().unwrap();
//! assert_eq!(session.result().unwrap().score, 1);
//! ```

mod app;
mod data;
pub mod engine;
mod models;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::App;
pub use data::{load_questions_from_json, parse_questions, LoadError};
pub use engine::{
    format_time_remaining, QuestionView, QuizResult, QuizSession, RecordedAnswer, SessionConfig,
    SessionError, SessionStatus, Tier,
};
pub use models::{AppState, Question};

/// How often the session's countdown is advanced.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Poll timeout while no countdown is running, so the loop stays
/// responsive to resize events.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading questions from file.
    Load(LoadError),
    /// The question set or configuration was rejected by the engine.
    Session(SessionError),
    /// IO error during quiz execution.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "Failed to load questions: {}", e),
            QuizError::Session(e) => write!(f, "Invalid quiz: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Session(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<SessionError> for QuizError {
    fn from(err: SessionError) -> Self {
        QuizError::Session(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from a vector of questions.
    ///
    /// Fails if the question set is unusable (empty, a question with fewer
    /// than two options, or an out-of-range correct-option index).
    pub fn new(questions: Vec<Question>, config: SessionConfig) -> Result<Self, QuizError> {
        Ok(Self {
            app: App::new(questions, config)?,
        })
    }

    /// Load a quiz from a JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P, config: SessionConfig) -> Result<Self, QuizError> {
        let questions = load_questions_from_json(path)?;
        Self::new(questions, config)
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

/// Event loop: draw, wait for input with a deadline, deliver `tick()` once
/// per elapsed second while a countdown is running.
fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let timeout = if app.wants_ticks() {
            TICK_INTERVAL.saturating_sub(last_tick.elapsed())
        } else {
            // No countdown to serve; keep the baseline fresh so a quiz
            // started from the welcome screen does not inherit idle time.
            last_tick = Instant::now();
            IDLE_POLL
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_input(app, key.code) {
                    break;
                }
            }
        }

        while app.wants_ticks() && last_tick.elapsed() >= TICK_INTERVAL {
            app.tick();
            last_tick += TICK_INTERVAL;
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.submit_answer();
            false
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.next_question();
            false
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.previous_question();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
