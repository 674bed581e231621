use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::models::Question;

/// Error loading a question file.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io(io::Error),
    /// The file is not valid question JSON.
    Parse(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read question file: {}", e),
            LoadError::Parse(e) => write!(f, "failed to parse question file: {}", e),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// Load questions from a JSON file: an array of question objects.
///
/// Content validation (option counts, correct-option ranges) is the
/// session's job at construction; this only reads and parses.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let json = fs::read_to_string(path)?;
    parse_questions(&json)
}

/// Parse a JSON array of question objects.
pub fn parse_questions(json: &str) -> Result<Vec<Question>, LoadError> {
    let questions = serde_json::from_str(json)?;
    Ok(questions)
}
