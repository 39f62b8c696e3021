use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TriviaError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let options_str = self
            .options
            .iter()
            .enumerate()
            .map(|(idx, option)| format!("  {}) {option}", option_label(idx)))
            .join("\n");
        write!(f, "{}\n{}", self.text, options_str)
    }
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, TriviaError> {
        let question = Self {
            id: Uuid::new_v4(),
            text: text.into(),
            options,
            correct_answer,
            explanation: explanation.into(),
        };
        question.validate()?;
        Ok(question)
    }

    /// Checks the shape of a question built by hand or deserialized from a pack.
    pub fn validate(&self) -> Result<(), TriviaError> {
        if self.options.len() < 2 {
            return Err(TriviaError::InvalidQuestion(format!(
                "{:?} needs at least two options, has {}",
                self.text,
                self.options.len()
            )));
        }
        if self.correct_answer >= self.options.len() {
            return Err(TriviaError::InvalidQuestion(format!(
                "{:?} marks option {} correct but only has {} options",
                self.text,
                self.correct_answer,
                self.options.len()
            )));
        }
        Ok(())
    }

    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_answer
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

/// Letter shown next to an option, `a` for the first one.
pub fn option_label(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}
