use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::Deserialize;

use crate::{error::TriviaError, question::Question};

/// Fixed, non-empty set of questions plus the random source used to draw from it.
#[derive(Clone, Debug)]
pub struct QuestionBank {
    questions: Vec<Question>,
    rng: StdRng,
}

#[derive(Debug, Deserialize)]
struct QuestionPack {
    #[serde(default)]
    name: Option<String>,
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>, rng: StdRng) -> Result<Self, TriviaError> {
        if questions.is_empty() {
            return Err(TriviaError::EmptyQuestionBank);
        }
        for question in &questions {
            question.validate()?;
        }
        Ok(Self { questions, rng })
    }

    pub fn seeded(questions: Vec<Question>, seed: u64) -> Result<Self, TriviaError> {
        Self::new(questions, StdRng::seed_from_u64(seed))
    }

    pub fn sat_math() -> Self {
        Self::new(sat_math_questions(), StdRng::from_entropy())
            .expect("Built-in question pack is valid")
    }

    pub fn sat_math_seeded(seed: u64) -> Self {
        Self::seeded(sat_math_questions(), seed).expect("Built-in question pack is valid")
    }

    /// Loads a pack of the form `{ name: ..., questions: [...] }`.
    pub fn from_yaml_str(yaml: &str, seed: Option<u64>) -> Result<Self, TriviaError> {
        let pack: QuestionPack =
            serde_yaml::from_str(yaml).map_err(|err| TriviaError::QuestionPack(err.to_string()))?;
        log::info!(
            "Loaded question pack {:?} with {} questions",
            pack.name.as_deref().unwrap_or("unnamed"),
            pack.questions.len()
        );
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(pack.questions, rng)
    }

    pub fn pick_random(&mut self) -> Question {
        self.questions
            .choose(&mut self.rng)
            .cloned()
            .expect("Question bank is never empty")
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn sat_math_questions() -> Vec<Question> {
    let raw: [(&str, [&str; 4], usize, &str); 5] = [
        (
            "If 2x + 3 = 11, what is the value of x?",
            ["2", "3", "4", "5"],
            2,
            "Subtract 3 from both sides: 2x = 8, then divide by 2: x = 4",
        ),
        (
            "What is the area of a circle with radius 3?",
            ["6π", "9π", "12π", "15π"],
            1,
            "Area = πr² = π(3)² = 9π",
        ),
        (
            "If f(x) = 2x² + 3x - 1, what is f(2)?",
            ["7", "9", "11", "13"],
            3,
            "f(2) = 2(2)² + 3(2) - 1 = 8 + 6 - 1 = 13",
        ),
        (
            "What is the slope of the line passing through points (2,4) and (4,8)?",
            ["1", "2", "3", "4"],
            1,
            "Slope = (y₂ - y₁)/(x₂ - x₁) = (8-4)/(4-2) = 4/2 = 2",
        ),
        (
            "If a triangle has angles measuring 45°, 45°, and 90°, what is the ratio of its sides?",
            ["1:1:1", "1:1:√2", "1:2:3", "2:2:3"],
            1,
            "In a 45-45-90 triangle the sides are in the ratio 1:1:√2",
        ),
    ];
    raw.into_iter()
        .map(|(text, options, correct, explanation)| {
            Question::new(
                text,
                options.iter().map(|o| o.to_string()).collect(),
                correct,
                explanation,
            )
            .expect("Built-in question is valid")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn empty_bank_is_rejected() {
        let err = QuestionBank::seeded(vec![], 1).unwrap_err();
        assert_eq!(err, TriviaError::EmptyQuestionBank);
    }

    #[test]
    fn same_seed_draws_same_sequence() {
        let mut a = QuestionBank::sat_math_seeded(7);
        let mut b = QuestionBank::sat_math_seeded(7);
        let texts_a: Vec<_> = (0..20).map(|_| a.pick_random().text).collect();
        let texts_b: Vec<_> = (0..20).map(|_| b.pick_random().text).collect();
        assert_eq!(texts_a, texts_b);
    }

    #[test]
    fn draws_cover_every_question() {
        let mut bank = QuestionBank::sat_math_seeded(3);
        let seen: HashSet<_> = (0..500).map(|_| bank.pick_random().id).collect();
        assert_eq!(seen.len(), bank.len());
    }

    #[test]
    fn builtin_answer_keys_match_explanations() {
        let bank = QuestionBank::sat_math_seeded(0);
        for question in bank.questions() {
            assert!(
                question.explanation.contains(question.correct_option()),
                "{} -> {}",
                question.text,
                question.correct_option()
            );
        }
    }

    #[test]
    fn loads_yaml_pack() {
        let yaml = r#"
name: arithmetic
questions:
  - text: "1 + 1?"
    options: ["1", "2"]
    correct_answer: 1
  - text: "2 * 3?"
    options: ["5", "6", "7"]
    correct_answer: 1
    explanation: "2 * 3 = 6"
"#;
        let bank = QuestionBank::from_yaml_str(yaml, Some(1)).unwrap();
        assert_eq!(bank.len(), 2);
        assert_ne!(bank.questions()[0].id, bank.questions()[1].id);
    }

    #[test]
    fn yaml_pack_with_bad_answer_key_is_rejected() {
        let yaml = r#"
questions:
  - text: "1 + 1?"
    options: ["1", "2"]
    correct_answer: 4
"#;
        let err = QuestionBank::from_yaml_str(yaml, Some(1)).unwrap_err();
        assert!(matches!(err, TriviaError::InvalidQuestion(_)));
    }

    #[test]
    fn malformed_yaml_is_a_pack_error() {
        let err = QuestionBank::from_yaml_str("questions: [", None).unwrap_err();
        assert!(matches!(err, TriviaError::QuestionPack(_)));
    }
}
