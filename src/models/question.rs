use serde::Deserialize;

/// A single multiple-choice question.
///
/// Questions have no identity of their own; they are addressed by position
/// in the session's question sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    /// Prompt shown to the user.
    pub text: String,
    /// Ordered answer options. A valid question has at least two.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct: usize,
    /// Explanation revealed after the question has been answered.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Topical unit/tag. Carried for external indexing, never read by the
    /// session engine.
    #[serde(default)]
    pub unit: Option<String>,
}

impl Question {
    /// Check whether `option_index` is the correct option.
    pub fn is_correct(&self, option_index: usize) -> bool {
        self.correct == option_index
    }
}
