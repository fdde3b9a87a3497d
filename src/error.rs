//! Error taxonomy shared by every search and collaborator.

use thiserror::Error;

use crate::types::CELL_COUNT;

/// Everything the engine can report instead of a result.
///
/// Validation errors are raised before any search work starts. Exhaustion
/// errors mean the search ran to its budget without a match. Source errors
/// come from injected collaborators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoggleError {
    #[error("word {word:?} is shorter than {min} letters")]
    WordTooShort { word: String, min: usize },

    #[error("word {word:?} needs {units} cells but the board has {cells}", cells = CELL_COUNT)]
    WordTooLong { word: String, units: usize },

    #[error("word {0:?} is not in the dictionary")]
    UnknownWord(String),

    #[error("path length {0} is outside 1..={cells}", cells = CELL_COUNT)]
    InvalidPathLength(usize),

    #[error("path has {path} cells but {letters} letters were supplied")]
    LetterCountMismatch { path: usize, letters: usize },

    #[error("board needs {cells} faces, got {0}", cells = CELL_COUNT)]
    InvalidBoard(usize),

    #[error("board has no letters")]
    EmptyBoard,

    #[error("a board needs {cells} dice, got {0}", cells = CELL_COUNT)]
    NotEnoughDice(usize),

    #[error("no simple path of length {0} exists")]
    NoPath(usize),

    #[error("no qualifying board found after {attempts} attempts")]
    ChallengeExhausted { attempts: u32 },

    #[error("{source_name} unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("definition lookup for {word:?} failed: {reason}")]
    DefinitionUnavailable { word: String, reason: String },

    #[error("malformed definition response: {0}")]
    MalformedDefinition(String),
}

impl BoggleError {
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        BoggleError::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by the caller's arguments.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BoggleError::WordTooShort { .. }
                | BoggleError::WordTooLong { .. }
                | BoggleError::UnknownWord(_)
                | BoggleError::InvalidPathLength(_)
                | BoggleError::LetterCountMismatch { .. }
                | BoggleError::InvalidBoard(_)
                | BoggleError::EmptyBoard
                | BoggleError::NotEnoughDice(_)
        )
    }

    /// True when a search ran out of candidates or attempts.
    pub fn is_exhaustion(&self) -> bool {
        matches!(
            self,
            BoggleError::NoPath(_) | BoggleError::ChallengeExhausted { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BoggleError>;
