use thiserror::Error;
use uuid::Uuid;

use crate::session::GameStatus;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriviaError {
    #[error("Not this player's turn: expected {expected:?}, got {actual}")]
    InvalidTurn { expected: Option<Uuid>, actual: Uuid },

    #[error("Operation not allowed while the game is {0:?}")]
    InvalidState(GameStatus),

    #[error("Option {index} is out of range for a question with {count} options")]
    InvalidOption { index: usize, count: usize },

    #[error("Elapsed time must be a finite, non-negative number of seconds: {0}")]
    InvalidElapsedTime(f64),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Question bank must contain at least one question")]
    EmptyQuestionBank,

    #[error("Invalid rules: {0}")]
    InvalidRules(String),

    #[error("Unable to parse question pack: {0}")]
    QuestionPack(String),

    #[error("{player} gave no answer: {reason}")]
    NoAnswer { player: String, reason: String },
}
