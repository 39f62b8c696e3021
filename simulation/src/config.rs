use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use trivia_types::{GameRules, QuestionBank};

use crate::error::SimulationError;

pub const QUESTIONS_ENV_VAR: &str = "TRIVIA_QUESTIONS";
pub const COMPUTER_NAME: &str = "Computer";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub rules: GameRules,
    pub questions: Option<PathBuf>,
    pub seed: Option<u64>,
    pub players: Vec<String>,
    pub computer_accuracy: Option<f64>,
}

impl MatchConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SimulationError> {
        let config: MatchConfig = serde_yaml::from_str(yaml)?;
        config.rules.validate()?;
        if let Some(accuracy) = config.computer_accuracy {
            if !(0.0..=1.0).contains(&accuracy) {
                return Err(SimulationError::Config(format!(
                    "computer_accuracy must be between 0 and 1, got {accuracy}"
                )));
            }
        }
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, SimulationError> {
        log::info!("Reading match config from {}", path.display());
        Self::from_yaml_str(&fs::read_to_string(path)?)
    }

    /// CLI flag, then `TRIVIA_QUESTIONS`, then the config file; `None` means the built-in pack.
    pub fn question_source(&self, cli_arg: Option<PathBuf>) -> Option<PathBuf> {
        if let Some(arg) = cli_arg {
            Some(arg)
        } else if let Ok(env) = std::env::var(QUESTIONS_ENV_VAR) {
            Some(PathBuf::from(env))
        } else {
            self.questions.clone()
        }
    }

    pub fn load_question_bank(
        &self,
        cli_arg: Option<PathBuf>,
    ) -> Result<QuestionBank, SimulationError> {
        match self.question_source(cli_arg) {
            Some(path) => {
                log::info!("Loading questions from {}", path.display());
                let yaml = fs::read_to_string(&path)?;
                Ok(QuestionBank::from_yaml_str(&yaml, self.seed)?)
            }
            None => Ok(match self.seed {
                Some(seed) => QuestionBank::sat_math_seeded(seed),
                None => QuestionBank::sat_math(),
            }),
        }
    }

    /// Names for both seats. CLI names win over config names; with `computer`
    /// the second seat is always the computer.
    pub fn contestant_names(
        &self,
        cli_players: &[String],
        computer: bool,
    ) -> Result<[String; 2], SimulationError> {
        let names = if cli_players.is_empty() {
            self.players.as_slice()
        } else {
            cli_players
        };
        match (names, computer) {
            ([], false) => Ok(["Player 1".to_string(), "Player 2".to_string()]),
            ([], true) => Ok(["Player 1".to_string(), COMPUTER_NAME.to_string()]),
            ([human], true) => Ok([human.clone(), COMPUTER_NAME.to_string()]),
            ([first, second], false) => Ok([first.clone(), second.clone()]),
            _ => Err(SimulationError::Config(format!(
                "Expected {} player name(s), got {}",
                if computer { 1 } else { 2 },
                names.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use trivia_types::{OpenerRule, TieBreak};

    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
rules:
  max_rounds: 3
  opener: alternate
  tie_break: none
  end_on_majority: true
seed: 17
players: [Alice, Bob]
computer_accuracy: 0.5
"#;
        let config = MatchConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.rules.max_rounds, 3);
        assert_eq!(config.rules.opener, OpenerRule::Alternate);
        assert_eq!(config.rules.tie_break, TieBreak::None);
        assert!(config.rules.end_on_majority);
        assert_eq!(config.seed, Some(17));
        assert_eq!(config.players, vec!["Alice", "Bob"]);
        assert_eq!(config.computer_accuracy, Some(0.5));
    }

    #[test]
    fn empty_config_is_default() {
        let config = MatchConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let err = MatchConfig::from_yaml_str("rules:\n  max_rounds: 0\n").unwrap_err();
        assert!(matches!(err, SimulationError::Trivia(_)));
    }

    #[test]
    fn out_of_range_accuracy_is_rejected() {
        for bad in [".nan", ".inf", "-0.1", "1.5"] {
            let yaml = format!("computer_accuracy: {bad}\n");
            let err = MatchConfig::from_yaml_str(&yaml).unwrap_err();
            assert!(matches!(err, SimulationError::Config(_)), "{bad}: {err:?}");
        }
        let config = MatchConfig::from_yaml_str("computer_accuracy: 1.0\n").unwrap();
        assert_eq!(config.computer_accuracy, Some(1.0));
    }

    #[test]
    fn cli_question_path_wins() {
        let config = MatchConfig {
            questions: Some(PathBuf::from("from_yaml.yaml")),
            ..MatchConfig::default()
        };
        assert_eq!(
            config.question_source(Some(PathBuf::from("from_cli.yaml"))),
            Some(PathBuf::from("from_cli.yaml"))
        );
    }

    #[test]
    fn builtin_bank_when_no_source() {
        let config = MatchConfig {
            seed: Some(3),
            ..MatchConfig::default()
        };
        if std::env::var(QUESTIONS_ENV_VAR).is_err() {
            let bank = config.load_question_bank(None).unwrap();
            assert_eq!(bank.len(), 5);
        }
    }

    #[test]
    fn resolves_contestant_names() {
        let config = MatchConfig {
            players: vec!["Ann".into(), "Ben".into()],
            ..MatchConfig::default()
        };
        assert_eq!(config.contestant_names(&[], false).unwrap(), ["Ann", "Ben"]);
        assert_eq!(
            config.contestant_names(&["Cy".to_string()], true).unwrap(),
            ["Cy", COMPUTER_NAME]
        );
        assert!(config.contestant_names(&[], true).is_err());
        assert!(MatchConfig::default()
            .contestant_names(&["Solo".to_string()], false)
            .is_err());
    }
}
