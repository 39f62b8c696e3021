use serde::{Deserialize, Serialize};

use crate::{error::TriviaError, player::Seat, round::TieBreak};

pub const DEFAULT_MAX_ROUNDS: u32 = 5;

/// Which seat answers first in a given round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenerRule {
    #[default]
    AlwaysFirst,
    /// Player 1 opens odd rounds, player 2 opens even rounds.
    Alternate,
}

impl OpenerRule {
    pub fn opener(self, round: u32) -> Seat {
        match self {
            OpenerRule::AlwaysFirst => Seat::First,
            OpenerRule::Alternate if round % 2 == 0 => Seat::Second,
            OpenerRule::Alternate => Seat::First,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub max_rounds: u32,
    pub opener: OpenerRule,
    pub tie_break: TieBreak,
    /// Finish as soon as one player holds a majority of `max_rounds`.
    pub end_on_majority: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            opener: OpenerRule::default(),
            tie_break: TieBreak::default(),
            end_on_majority: false,
        }
    }
}

impl GameRules {
    pub fn validate(&self) -> Result<(), TriviaError> {
        if self.max_rounds == 0 {
            return Err(TriviaError::InvalidRules(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn majority(&self) -> u32 {
        self.max_rounds / 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_are_canonical() {
        let rules = GameRules::default();
        assert_eq!(rules.max_rounds, 5);
        assert_eq!(rules.opener, OpenerRule::AlwaysFirst);
        assert_eq!(rules.tie_break, TieBreak::FastestCorrect);
        assert!(!rules.end_on_majority);
    }

    #[test]
    fn alternate_opener_flips_on_even_rounds() {
        let rule = OpenerRule::Alternate;
        assert_eq!(rule.opener(1), Seat::First);
        assert_eq!(rule.opener(2), Seat::Second);
        assert_eq!(rule.opener(3), Seat::First);
        assert_eq!(OpenerRule::AlwaysFirst.opener(2), Seat::First);
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let rules: GameRules = serde_yaml::from_str("max_rounds: 3\ntie_break: none\n").unwrap();
        assert_eq!(rules.max_rounds, 3);
        assert_eq!(rules.tie_break, TieBreak::None);
        assert_eq!(rules.opener, OpenerRule::AlwaysFirst);
        assert_eq!(rules.majority(), 2);
    }

    #[test]
    fn zero_rounds_is_invalid() {
        let rules = GameRules {
            max_rounds: 0,
            ..GameRules::default()
        };
        assert!(matches!(rules.validate(), Err(TriviaError::InvalidRules(_))));
    }
}
