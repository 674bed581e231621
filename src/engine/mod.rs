//! UI-free quiz session engine.
//!
//! One [`QuizSession`] per quiz run; the presentation layer drives it and
//! renders from [`QuestionView`] and [`QuizResult`].

mod error;
mod session;
mod view;

pub use error::SessionError;
pub use session::{QuizSession, SessionConfig, SessionStatus};
pub use view::{format_time_remaining, QuestionView, QuizResult, RecordedAnswer, Tier};
