//! The quiz session state machine.
//!
//! A [`QuizSession`] owns one run-through of a question set: the (possibly
//! shuffled) question sequence, the cursor, one recorded answer per
//! question, the running score, and an optional countdown. It performs no
//! rendering and no I/O; a presentation layer drives it and renders its
//! read models after every call.

use std::fmt;

use rand::seq::SliceRandom;

use crate::models::Question;

use super::error::SessionError;
use super::view::{QuestionView, QuizResult, RecordedAnswer, Tier};

/// Lifecycle of a session: `NotStarted → InProgress → Completed`.
///
/// `Completed` is terminal for the run; [`QuizSession::start`] begins a
/// fresh run rather than resuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Options recognized when a session starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    /// Randomize question order at start with an unbiased permutation.
    pub shuffle: bool,
    /// Countdown in seconds. When it elapses the session force-completes.
    pub time_limit: Option<u32>,
}

type CompletionCallback = Box<dyn FnMut(usize, usize)>;

/// One quiz run from start to completion or abandonment.
pub struct QuizSession {
    questions: Vec<Question>,
    config: SessionConfig,
    current_index: usize,
    answers: Vec<Option<usize>>,
    score: usize,
    time_remaining: Option<u32>,
    status: SessionStatus,
    on_complete: Option<CompletionCallback>,
    completion_fired: bool,
}

// The boxed completion callback has no `Debug`; it is omitted here.
impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("status", &self.status)
            .field("current_index", &self.current_index)
            .field("answers", &self.answers)
            .field("score", &self.score)
            .field("time_remaining", &self.time_remaining)
            .field("num_questions", &self.questions.len())
            .finish_non_exhaustive()
    }
}

impl QuizSession {
    /// Create a session over `questions`.
    ///
    /// The question set is validated here, once: it must be non-empty,
    /// every question needs at least two options, its correct-option index
    /// must be in range for its own options, and a configured time limit
    /// must be positive. The returned session is `NotStarted`; call
    /// [`start`](Self::start) to begin.
    pub fn new(questions: Vec<Question>, config: SessionConfig) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::InvalidConfiguration(
                "question list is empty".to_string(),
            ));
        }

        for (index, question) in questions.iter().enumerate() {
            if question.options.len() < 2 {
                return Err(SessionError::InvalidConfiguration(format!(
                    "question {} has {} options, need at least 2",
                    index + 1,
                    question.options.len()
                )));
            }
            if question.correct >= question.options.len() {
                return Err(SessionError::InvalidConfiguration(format!(
                    "question {} marks option {} correct but has only {} options",
                    index + 1,
                    question.correct,
                    question.options.len()
                )));
            }
        }

        if config.time_limit == Some(0) {
            return Err(SessionError::InvalidConfiguration(
                "time limit must be positive".to_string(),
            ));
        }

        let num_questions = questions.len();
        Ok(Self {
            questions,
            config,
            current_index: 0,
            answers: vec![None; num_questions],
            score: 0,
            time_remaining: None,
            status: SessionStatus::NotStarted,
            on_complete: None,
            completion_fired: false,
        })
    }

    /// Register a callback invoked exactly once per run when the session
    /// completes, receiving the final score and the question count.
    pub fn set_on_complete(&mut self, callback: impl FnMut(usize, usize) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Begin (or restart) the run.
    ///
    /// Resets cursor, answers, score, and countdown, re-shuffles if
    /// configured, and moves to `InProgress`. Calling this on a completed
    /// session starts a fresh run; nothing carries over.
    pub fn start(&mut self) {
        if self.config.shuffle {
            self.questions.shuffle(&mut rand::rng());
        }
        self.current_index = 0;
        self.answers = vec![None; self.questions.len()];
        self.score = 0;
        self.time_remaining = self.config.time_limit;
        self.completion_fired = false;
        self.status = SessionStatus::InProgress;
    }

    /// Record the user's answer for the current question.
    ///
    /// The first recorded answer is final: a second submit for the same
    /// question is a no-op signalling `AlreadyAnswered`, and the score is
    /// bumped exactly once, at the moment of recording. Returns whether the
    /// answer was correct, to drive immediate feedback.
    pub fn submit_answer(&mut self, option_index: usize) -> Result<bool, SessionError> {
        if self.status != SessionStatus::InProgress {
            return Err(SessionError::SessionNotInProgress);
        }
        if self.answers[self.current_index].is_some() {
            return Err(SessionError::AlreadyAnswered);
        }

        let question = &self.questions[self.current_index];
        if option_index >= question.options.len() {
            // Stale index from a presentation bug; reject without touching
            // state.
            return Err(SessionError::InvalidAnswer {
                option_index,
                num_options: question.options.len(),
            });
        }

        let is_correct = question.is_correct(option_index);
        self.answers[self.current_index] = Some(option_index);
        if is_correct {
            self.score += 1;
        }
        Ok(is_correct)
    }

    /// Move to the next question, or complete the session from the last
    /// one.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::InProgress {
            return Err(SessionError::SessionNotInProgress);
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        } else {
            self.complete();
        }
        Ok(())
    }

    /// Move back one question. Revisiting is read-only: recorded answers
    /// and the score are never altered.
    pub fn retreat(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::InProgress {
            return Err(SessionError::SessionNotInProgress);
        }
        if self.current_index == 0 {
            return Err(SessionError::AtFirstQuestion);
        }
        self.current_index -= 1;
        Ok(())
    }

    /// Count down one second of wall-clock time.
    ///
    /// Called once per elapsed second by the host's timing facility. A
    /// no-op unless the session is in progress with a configured limit.
    /// When the countdown reaches zero the session force-completes:
    /// unanswered questions stay unanswered and simply do not count.
    pub fn tick(&mut self) {
        if self.status != SessionStatus::InProgress {
            return;
        }
        if let Some(remaining) = self.time_remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.complete();
            }
        }
    }

    fn complete(&mut self) {
        self.status = SessionStatus::Completed;
        self.time_remaining = None;

        if self.completion_fired {
            return;
        }
        self.completion_fired = true;
        if let Some(callback) = self.on_complete.as_mut() {
            callback(self.score, self.questions.len());
        }
    }

    /// Projection of the current question for rendering.
    ///
    /// Infallible: the cursor is in range in every status. The recorded
    /// answer, if any, comes back frozen with its correctness so the
    /// presentation can show feedback instead of interactive options.
    pub fn current_question_view(&self) -> QuestionView<'_> {
        let question = &self.questions[self.current_index];
        let answer = self.answers[self.current_index].map(|selected| RecordedAnswer {
            selected,
            is_correct: question.is_correct(selected),
        });
        QuestionView {
            question,
            index: self.current_index,
            total: self.questions.len(),
            answer,
        }
    }

    /// Final outcome of a completed session.
    pub fn result(&self) -> Result<QuizResult, SessionError> {
        if self.status != SessionStatus::Completed {
            return Err(SessionError::SessionNotCompleted);
        }

        let total = self.questions.len();
        let percentage = (self.score as f64 / total as f64) * 100.0;
        Ok(QuizResult {
            score: self.score,
            total,
            percentage,
            tier: Tier::from_percentage(percentage),
        })
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Seconds left on the countdown, if one is running.
    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    /// The session's question sequence, in (possibly shuffled) order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Recorded answers by question position (`None` = unanswered).
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn question(text: &str, options: &[&str], correct: usize) -> Question {
        Question {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
            explanation: None,
            unit: None,
        }
    }

    /// Three questions with correct options [0, 1, 0].
    fn sample_questions() -> Vec<Question> {
        vec![
            question("Q1", &["a", "b", "c"], 0),
            question("Q2", &["a", "b", "c"], 1),
            question("Q3", &["a", "b", "c"], 0),
        ]
    }

    fn started(config: SessionConfig) -> QuizSession {
        let mut session = QuizSession::new(sample_questions(), config).unwrap();
        session.start();
        session
    }

    #[test]
    fn test_full_run_scoring_scenario() {
        let mut session = started(SessionConfig::default());

        assert_eq!(session.submit_answer(0), Ok(true));
        assert_eq!(session.score(), 1);
        session.advance().unwrap();

        assert_eq!(session.submit_answer(2), Ok(false));
        assert_eq!(session.score(), 1);
        session.advance().unwrap();

        assert_eq!(session.submit_answer(0), Ok(true));
        assert_eq!(session.score(), 2);
        session.advance().unwrap();

        assert_eq!(session.status(), SessionStatus::Completed);
        let result = session.result().unwrap();
        assert_eq!(result.score, 2);
        assert_eq!(result.total, 3);
        assert!((result.percentage - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.tier, Tier::Fair);
    }

    #[test]
    fn test_duplicate_submit_is_rejected_and_never_rescores() {
        let mut session = started(SessionConfig::default());

        assert_eq!(session.submit_answer(0), Ok(true));
        assert_eq!(session.submit_answer(0), Err(SessionError::AlreadyAnswered));
        assert_eq!(session.submit_answer(1), Err(SessionError::AlreadyAnswered));
        assert_eq!(session.score(), 1);
        assert_eq!(session.answers()[0], Some(0));
    }

    #[test]
    fn test_revisiting_an_answered_question_is_read_only() {
        let mut session = started(SessionConfig::default());

        session.submit_answer(0).unwrap();
        session.advance().unwrap();
        session.retreat().unwrap();

        let view = session.current_question_view();
        let recorded = view.answer.unwrap();
        assert_eq!(recorded.selected, 0);
        assert!(recorded.is_correct);

        // A new submit on the revisited question is refused and the score
        // stays put, however many times the question is redisplayed.
        assert_eq!(session.submit_answer(1), Err(SessionError::AlreadyAnswered));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_out_of_range_answer_rejected_without_state_change() {
        let mut session = started(SessionConfig::default());

        let err = session.submit_answer(3).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidAnswer {
                option_index: 3,
                num_options: 3,
            }
        );
        assert_eq!(session.score(), 0);
        assert_eq!(session.answers()[0], None);

        // The question is still answerable after the bad submit.
        assert_eq!(session.submit_answer(0), Ok(true));
    }

    #[test]
    fn test_empty_question_list_is_invalid() {
        let err = QuizSession::new(Vec::new(), SessionConfig::default()).unwrap_err();
        assert!(matches!(err, SessionError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_correct_index_out_of_range_is_invalid() {
        let questions = vec![question("Q1", &["a", "b"], 2)];
        let err = QuizSession::new(questions, SessionConfig::default()).unwrap_err();
        assert!(matches!(err, SessionError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_single_option_question_is_invalid() {
        let questions = vec![question("Q1", &["a"], 0)];
        let err = QuizSession::new(questions, SessionConfig::default()).unwrap_err();
        assert!(matches!(err, SessionError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_zero_time_limit_is_invalid() {
        let config = SessionConfig {
            time_limit: Some(0),
            ..SessionConfig::default()
        };
        let err = QuizSession::new(sample_questions(), config).unwrap_err();
        assert!(matches!(err, SessionError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_retreat_at_first_question_leaves_state_unchanged() {
        let mut session = started(SessionConfig::default());

        assert_eq!(session.retreat(), Err(SessionError::AtFirstQuestion));
        assert_eq!(session.current_question_view().index, 0);
        assert_eq!(session.status(), SessionStatus::InProgress);
    }

    #[test]
    fn test_operations_require_a_started_session() {
        let mut session =
            QuizSession::new(sample_questions(), SessionConfig::default()).unwrap();

        assert_eq!(session.status(), SessionStatus::NotStarted);
        assert_eq!(
            session.submit_answer(0),
            Err(SessionError::SessionNotInProgress)
        );
        assert_eq!(session.advance(), Err(SessionError::SessionNotInProgress));
        assert_eq!(session.retreat(), Err(SessionError::SessionNotInProgress));
        assert_eq!(
            session.result().unwrap_err(),
            SessionError::SessionNotCompleted
        );
    }

    #[test]
    fn test_completion_callback_fires_exactly_once() {
        let calls = Rc::new(Cell::new(0usize));
        let seen = Rc::new(Cell::new((0usize, 0usize)));

        let mut session = started(SessionConfig::default());
        {
            let calls = Rc::clone(&calls);
            let seen = Rc::clone(&seen);
            session.set_on_complete(move |score, total| {
                calls.set(calls.get() + 1);
                seen.set((score, total));
            });
        }

        session.submit_answer(0).unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(calls.get(), 1);
        assert_eq!(seen.get(), (1, 3));

        // Completed is terminal; further advances error and never re-fire.
        assert_eq!(session.advance(), Err(SessionError::SessionNotInProgress));
        assert_eq!(session.advance(), Err(SessionError::SessionNotInProgress));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_timer_expiry_forces_completion() {
        let config = SessionConfig {
            time_limit: Some(3),
            ..SessionConfig::default()
        };
        let mut session = QuizSession::new(sample_questions(), config).unwrap();
        session.start();
        assert_eq!(session.time_remaining(), Some(3));

        session.submit_answer(0).unwrap();
        session.tick();
        session.tick();
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.time_remaining(), Some(1));

        session.tick();
        assert_eq!(session.status(), SessionStatus::Completed);

        // Trailing unanswered questions are excluded from the score but
        // still counted in the total.
        let result = session.result().unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_tick_without_a_time_limit_is_a_noop() {
        let mut session = started(SessionConfig::default());
        for _ in 0..100 {
            session.tick();
        }
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.time_remaining(), None);
    }

    #[test]
    fn test_tick_after_completion_is_a_noop() {
        let config = SessionConfig {
            time_limit: Some(1),
            ..SessionConfig::default()
        };
        let mut session = QuizSession::new(sample_questions(), config).unwrap();
        session.start();
        session.tick();
        assert_eq!(session.status(), SessionStatus::Completed);

        // The host's timer may deliver one more tick after expiry.
        session.tick();
        assert_eq!(session.status(), SessionStatus::Completed);
    }

    #[test]
    fn test_restart_begins_a_fresh_run() {
        let calls = Rc::new(Cell::new(0usize));
        let mut session = started(SessionConfig::default());
        {
            let calls = Rc::clone(&calls);
            session.set_on_complete(move |_, _| calls.set(calls.get() + 1));
        }

        session.submit_answer(0).unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(calls.get(), 1);

        session.start();
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_question_view().index, 0);
        assert!(session.answers().iter().all(Option::is_none));
        assert_eq!(
            session.result().unwrap_err(),
            SessionError::SessionNotCompleted
        );

        // The new run fires its own completion.
        session.advance().unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_shuffle_preserves_the_question_multiset() {
        let config = SessionConfig {
            shuffle: true,
            ..SessionConfig::default()
        };
        let mut session = QuizSession::new(sample_questions(), config).unwrap();
        session.start();

        let mut texts: Vec<&str> = session.questions().iter().map(|q| q.text.as_str()).collect();
        texts.sort_unstable();
        assert_eq!(texts, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(session.total_questions(), 3);
    }

    #[test]
    fn test_shuffle_positions_are_statistically_uniform() {
        const TRIALS: usize = 6000;

        // counts[position][question] over many fresh shuffles.
        let mut counts = [[0usize; 3]; 3];
        for _ in 0..TRIALS {
            let config = SessionConfig {
                shuffle: true,
                ..SessionConfig::default()
            };
            let mut session = QuizSession::new(sample_questions(), config).unwrap();
            session.start();
            for (position, q) in session.questions().iter().enumerate() {
                let original = match q.text.as_str() {
                    "Q1" => 0,
                    "Q2" => 1,
                    "Q3" => 2,
                    other => panic!("unexpected question {}", other),
                };
                counts[position][original] += 1;
            }
        }

        // Each question should land in each position about TRIALS/3 times.
        // The tolerance is ~8 standard deviations, loose enough to never
        // flake and tight enough to catch a biased shuffle.
        let expected = TRIALS / 3;
        let tolerance = 300;
        for position in 0..3 {
            for original in 0..3 {
                let observed = counts[position][original];
                assert!(
                    observed.abs_diff(expected) < tolerance,
                    "question {} at position {} occurred {} times, expected ~{}",
                    original,
                    position,
                    observed,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_debug_output_omits_the_callback() {
        let mut session = started(SessionConfig::default());
        session.set_on_complete(|_, _| {});

        let debug = format!("{:?}", session);
        assert!(debug.contains("status"));
        assert!(debug.contains("score"));
        assert!(!debug.contains("on_complete"));
    }

    #[test]
    fn test_view_reports_progress_and_answers() {
        let mut session = started(SessionConfig::default());

        let view = session.current_question_view();
        assert_eq!(view.index, 0);
        assert_eq!(view.total, 3);
        assert_eq!(view.question.text, "Q1");
        assert!(view.answer.is_none());

        session.submit_answer(2).unwrap();
        let view = session.current_question_view();
        let recorded = view.answer.unwrap();
        assert_eq!(recorded.selected, 2);
        assert!(!recorded.is_correct);
    }
}
