//! Read models the presentation layer renders from.
//!
//! The engine reports state exclusively through these projections; the UI
//! holds no copy of the truth.

use std::fmt;

use crate::models::Question;

/// The answer recorded for a question, frozen at first submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedAnswer {
    /// The option the user selected.
    pub selected: usize,
    /// Whether that option was the correct one.
    pub is_correct: bool,
}

/// Projection of the current question for rendering.
///
/// `answer` is `Some` once the question has been answered; the presentation
/// uses it to show frozen feedback instead of interactive options.
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    pub question: &'a Question,
    /// Zero-based position in the (possibly shuffled) sequence.
    pub index: usize,
    /// Total number of questions in the session.
    pub total: usize,
    pub answer: Option<RecordedAnswer>,
}

/// Final outcome of a completed session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub tier: Tier,
}

/// Qualitative label derived from the final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl Tier {
    /// Band a percentage into a tier. Boundaries are inclusive at the lower
    /// bound: 90.0 is excellent, 89.9 is good.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Tier::Excellent
        } else if percentage >= 75.0 {
            Tier::Good
        } else if percentage >= 50.0 {
            Tier::Fair
        } else {
            Tier::NeedsImprovement
        }
    }

    /// Encouragement line shown on the result screen.
    pub fn message(&self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent work!",
            Tier::Good => "Good job!",
            Tier::Fair => "Fair effort. Keep practicing!",
            Tier::NeedsImprovement => "Needs improvement. Don't give up!",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::Fair => "fair",
            Tier::NeedsImprovement => "needs-improvement",
        };
        f.write_str(label)
    }
}

/// Format remaining seconds as `M:SS` for the countdown display.
pub fn format_time_remaining(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_inclusive_at_lower_bound() {
        assert_eq!(Tier::from_percentage(100.0), Tier::Excellent);
        assert_eq!(Tier::from_percentage(90.0), Tier::Excellent);
        assert_eq!(Tier::from_percentage(89.99), Tier::Good);
        assert_eq!(Tier::from_percentage(75.0), Tier::Good);
        assert_eq!(Tier::from_percentage(74.9), Tier::Fair);
        assert_eq!(Tier::from_percentage(50.0), Tier::Fair);
        assert_eq!(Tier::from_percentage(49.9), Tier::NeedsImprovement);
        assert_eq!(Tier::from_percentage(0.0), Tier::NeedsImprovement);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(Tier::Excellent.to_string(), "excellent");
        assert_eq!(Tier::NeedsImprovement.to_string(), "needs-improvement");
    }

    #[test]
    fn test_format_time_remaining() {
        assert_eq!(format_time_remaining(600), "10:00");
        assert_eq!(format_time_remaining(65), "1:05");
        assert_eq!(format_time_remaining(9), "0:09");
        assert_eq!(format_time_remaining(0), "0:00");
    }
}
