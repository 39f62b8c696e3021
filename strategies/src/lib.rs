pub mod input_strategy;

use std::{collections::VecDeque, ops::Range};

use rand::{rngs::StdRng, seq::IteratorRandom, Rng, SeedableRng};
use trivia_types::{Player, Question, TriviaError, TurnAnswer, TurnProvider};

pub use crate::input_strategy::InputStrategy;

pub const DEFAULT_RESPONSE_SECONDS: Range<f64> = 2.0..8.0;

/// Picks any option at any speed.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomStrategy {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TurnProvider for RandomStrategy {
    fn take_turn(
        &mut self,
        _player: &Player,
        question: &Question,
    ) -> Result<TurnAnswer, TriviaError> {
        Ok(TurnAnswer {
            option_index: self.rng.gen_range(0..question.option_count()),
            elapsed_seconds: self.rng.gen_range(DEFAULT_RESPONSE_SECONDS),
        })
    }
}

/// Stand-in opponent for single-player matches: right `accuracy` of the time,
/// otherwise a uniformly chosen wrong option.
#[derive(Debug)]
pub struct ComputerOpponent {
    rng: StdRng,
    accuracy: f64,
    response_seconds: Range<f64>,
}

impl Default for ComputerOpponent {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl ComputerOpponent {
    pub const DEFAULT_ACCURACY: f64 = 0.7;

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            accuracy: Self::DEFAULT_ACCURACY,
            response_seconds: DEFAULT_RESPONSE_SECONDS,
        }
    }

    /// Clamped to `[0, 1]`; NaN falls back to [`Self::DEFAULT_ACCURACY`].
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = if accuracy.is_nan() {
            log::warn!("Ignoring NaN accuracy, using {}", Self::DEFAULT_ACCURACY);
            Self::DEFAULT_ACCURACY
        } else {
            accuracy.clamp(0.0, 1.0)
        };
        self
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn with_response_seconds(mut self, response_seconds: Range<f64>) -> Self {
        assert!(
            response_seconds.start >= 0.0 && response_seconds.start < response_seconds.end,
            "Response window must be a non-empty, non-negative range: {response_seconds:?}"
        );
        self.response_seconds = response_seconds;
        self
    }
}

impl TurnProvider for ComputerOpponent {
    fn take_turn(
        &mut self,
        player: &Player,
        question: &Question,
    ) -> Result<TurnAnswer, TriviaError> {
        let option_index = if self.rng.gen_bool(self.accuracy) {
            question.correct_answer
        } else {
            (0..question.option_count())
                .filter(|&idx| idx != question.correct_answer)
                .choose(&mut self.rng)
                .expect("Questions always have a wrong option")
        };
        let elapsed_seconds = self.rng.gen_range(self.response_seconds.clone());
        log::debug!(
            "{} picks option {option_index} after {elapsed_seconds:.1}s",
            player.name
        );
        Ok(TurnAnswer {
            option_index,
            elapsed_seconds,
        })
    }
}

/// Replays a fixed list of answers in order.
#[derive(Debug, Default)]
pub struct ScriptedStrategy {
    answers: VecDeque<TurnAnswer>,
}

impl ScriptedStrategy {
    pub fn new(answers: impl IntoIterator<Item = (usize, f64)>) -> Self {
        Self {
            answers: answers
                .into_iter()
                .map(|(option_index, elapsed_seconds)| TurnAnswer {
                    option_index,
                    elapsed_seconds,
                })
                .collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl TurnProvider for ScriptedStrategy {
    fn take_turn(
        &mut self,
        player: &Player,
        _question: &Question,
    ) -> Result<TurnAnswer, TriviaError> {
        self.answers.pop_front().ok_or_else(|| TriviaError::NoAnswer {
            player: player.name.clone(),
            reason: "script ran out of answers".to_string(),
        })
    }
}

/// Always right, always in the same time.
#[derive(Debug)]
pub struct AlwaysCorrect {
    pub elapsed_seconds: f64,
}

impl TurnProvider for AlwaysCorrect {
    fn take_turn(
        &mut self,
        _player: &Player,
        question: &Question,
    ) -> Result<TurnAnswer, TriviaError> {
        Ok(TurnAnswer {
            option_index: question.correct_answer,
            elapsed_seconds: self.elapsed_seconds,
        })
    }
}
