use crate::engine::{QuizSession, SessionConfig, SessionError, SessionStatus};
use crate::models::{AppState, Question};

/// Presentation-layer state for the terminal app.
///
/// A thin adapter: it owns one [`QuizSession`] per run plus UI-only state
/// (screen, option cursor, result scroll). All quiz truth lives in the
/// session; the adapter only reflects what the engine reports.
#[derive(Debug)]
pub struct App {
    pub state: AppState,
    session: QuizSession,
    selected_option: usize,
    result_scroll: usize,
}

impl App {
    /// Build the app over a validated question set.
    pub fn new(questions: Vec<Question>, config: SessionConfig) -> Result<Self, SessionError> {
        let session = QuizSession::new(questions, config)?;
        Ok(Self {
            state: AppState::Welcome,
            session,
            selected_option: 0,
            result_scroll: 0,
        })
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Begin a run. Also serves restart: the session re-shuffles and starts
    /// fresh.
    pub fn start_quiz(&mut self) {
        self.session.start();
        self.selected_option = 0;
        self.result_scroll = 0;
        self.state = AppState::Quiz;
    }

    /// Move the option cursor down. Frozen once the question is answered.
    pub fn select_next_option(&mut self) {
        let view = self.session.current_question_view();
        if view.answer.is_some() {
            return;
        }
        self.selected_option = (self.selected_option + 1) % view.question.options.len();
    }

    /// Move the option cursor up. Frozen once the question is answered.
    pub fn select_previous_option(&mut self) {
        let view = self.session.current_question_view();
        if view.answer.is_some() {
            return;
        }
        let num_options = view.question.options.len();
        self.selected_option = (self.selected_option + num_options - 1) % num_options;
    }

    /// Submit the option under the cursor. A duplicate submit for an
    /// already-answered question is absorbed; the screen keeps showing the
    /// frozen feedback.
    pub fn submit_answer(&mut self) {
        let _ = self.session.submit_answer(self.selected_option);
    }

    /// Advance past an answered question; completing the last question
    /// switches to the result screen. Ignored until the current question
    /// has an answer.
    pub fn next_question(&mut self) {
        if self.session.current_question_view().answer.is_none() {
            return;
        }
        if self.session.advance().is_ok() {
            self.sync_after_move();
        }
    }

    /// Go back one question. At the first question this is absorbed (the
    /// control simply does nothing).
    pub fn previous_question(&mut self) {
        if self.session.retreat().is_ok() {
            self.sync_after_move();
        }
    }

    /// Deliver one second of wall-clock time to the session. Expiry lands
    /// on the result screen like any other completion.
    pub fn tick(&mut self) {
        self.session.tick();
        if self.session.status() == SessionStatus::Completed {
            self.state = AppState::Result;
        }
    }

    /// Leave the result screen; the next start re-runs the quiz.
    pub fn restart(&mut self) {
        self.state = AppState::Welcome;
        self.result_scroll = 0;
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.session.total_questions().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Whether the host should keep delivering ticks.
    pub fn wants_ticks(&self) -> bool {
        self.state == AppState::Quiz && self.session.time_remaining().is_some()
    }

    fn sync_after_move(&mut self) {
        if self.session.status() == SessionStatus::Completed {
            self.state = AppState::Result;
            return;
        }
        // Land the cursor on the recorded answer when revisiting, on the
        // first option otherwise.
        let view = self.session.current_question_view();
        self.selected_option = view.answer.map(|a| a.selected).unwrap_or(0);
    }
}
