use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::question::{option_label, Question};

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct AnswerSubmission {
    pub player_id: Uuid,
    pub option_index: usize,
    pub elapsed_seconds: f64,
    pub is_correct: bool,
}

impl AnswerSubmission {
    pub fn new(
        player_id: Uuid,
        question: &Question,
        option_index: usize,
        elapsed_seconds: f64,
    ) -> Self {
        Self {
            player_id,
            option_index,
            elapsed_seconds,
            is_correct: question.is_correct(option_index),
        }
    }
}

impl Display for AnswerSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.is_correct { "correct" } else { "wrong" };
        write!(
            f,
            "{} in {:.1}s ({verdict})",
            option_label(self.option_index),
            self.elapsed_seconds
        )
    }
}

/// How a round is settled when both players answer correctly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The faster correct answer takes the round; identical times stay tied.
    #[default]
    FastestCorrect,
    None,
}

/// The round currently being answered. Only the opener's submission can be pending.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpenRound {
    pub number: u32,
    pub question: Question,
    pub first: Option<AnswerSubmission>,
}

impl OpenRound {
    pub fn new(number: u32, question: Question) -> Self {
        Self {
            number,
            question,
            first: None,
        }
    }

    pub fn close(
        self,
        first: AnswerSubmission,
        second: AnswerSubmission,
        tie_break: TieBreak,
    ) -> RoundRecord {
        RoundRecord {
            number: self.number,
            winner: decide_round_winner(&first, &second, tie_break),
            question: self.question,
            first,
            second,
        }
    }
}

/// A finished round. `first` is whoever answered first in that round.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundRecord {
    pub number: u32,
    pub question: Question,
    pub first: AnswerSubmission,
    pub second: AnswerSubmission,
    pub winner: Option<Uuid>,
}

impl RoundRecord {
    pub fn is_tied(&self) -> bool {
        self.winner.is_none()
    }

    pub fn submission_for(&self, player_id: Uuid) -> Option<&AnswerSubmission> {
        [&self.first, &self.second]
            .into_iter()
            .find(|sub| sub.player_id == player_id)
    }

    pub fn points_awarded(&self) -> u32 {
        [&self.first, &self.second]
            .iter()
            .filter(|sub| sub.is_correct)
            .count() as u32
    }
}

pub fn decide_round_winner(
    first: &AnswerSubmission,
    second: &AnswerSubmission,
    tie_break: TieBreak,
) -> Option<Uuid> {
    match (first.is_correct, second.is_correct) {
        (true, false) => Some(first.player_id),
        (false, true) => Some(second.player_id),
        (false, false) => None,
        (true, true) => match tie_break {
            TieBreak::None => None,
            TieBreak::FastestCorrect => {
                match first.elapsed_seconds.partial_cmp(&second.elapsed_seconds) {
                    Some(Ordering::Less) => Some(first.player_id),
                    Some(Ordering::Greater) => Some(second.player_id),
                    _ => None,
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(correct: bool, secs: f64) -> AnswerSubmission {
        AnswerSubmission {
            player_id: Uuid::new_v4(),
            option_index: 0,
            elapsed_seconds: secs,
            is_correct: correct,
        }
    }

    #[test]
    fn single_correct_answer_wins() {
        let a = submission(true, 9.0);
        let b = submission(false, 1.0);
        assert_eq!(
            decide_round_winner(&a, &b, TieBreak::FastestCorrect),
            Some(a.player_id)
        );
        assert_eq!(
            decide_round_winner(&b, &a, TieBreak::FastestCorrect),
            Some(a.player_id)
        );
    }

    #[test]
    fn both_wrong_is_a_tie() {
        let a = submission(false, 1.0);
        let b = submission(false, 2.0);
        assert_eq!(decide_round_winner(&a, &b, TieBreak::FastestCorrect), None);
    }

    #[test]
    fn faster_correct_answer_breaks_tie() {
        let slow = submission(true, 5.0);
        let fast = submission(true, 3.0);
        assert_eq!(
            decide_round_winner(&slow, &fast, TieBreak::FastestCorrect),
            Some(fast.player_id)
        );
        assert_eq!(decide_round_winner(&slow, &fast, TieBreak::None), None);
    }

    #[test]
    fn identical_times_stay_tied() {
        let a = submission(true, 4.0);
        let b = submission(true, 4.0);
        assert_eq!(decide_round_winner(&a, &b, TieBreak::FastestCorrect), None);
    }
}
