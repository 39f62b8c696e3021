use thiserror::Error;
use trivia_types::TriviaError;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Game error: {0}")]
    Trivia(#[from] TriviaError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
