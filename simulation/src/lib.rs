pub mod config;
pub mod error;

use std::{collections::HashMap, thread::sleep, time::Duration};

use trivia_types::{
    GameOutcome, GameSession, SessionEvent, SessionListener, TriviaError, TurnOutcome,
    TurnProvider,
};
use uuid::Uuid;

pub use config::MatchConfig;
pub use error::SimulationError;

/// A named seat and whatever answers for it.
#[derive(Debug)]
pub struct Contestant {
    pub name: String,
    pub provider: Box<dyn TurnProvider>,
}

impl Contestant {
    pub fn new(name: impl Into<String>, provider: impl TurnProvider + 'static) -> Self {
        Self {
            name: name.into(),
            provider: Box::new(provider),
        }
    }
}

/// Plays one full match: starts a new game on `session`, then keeps asking the
/// provider of whoever's turn it is until the game finishes.
pub fn run_match(
    session: &mut GameSession,
    contestants: [Contestant; 2],
    delay_ms: Option<u64>,
) -> Result<GameOutcome, TriviaError> {
    let [mut first, mut second] = contestants;
    let [first_id, _] = session.start_new_game(&first.name, &second.name);
    loop {
        log::debug!("{session}");
        if let Some(ms) = delay_ms {
            sleep(Duration::from_millis(ms));
        }
        let player = session
            .current_player()
            .expect("An in-progress game always has a current player")
            .clone();
        let question = session
            .current_question()
            .expect("An in-progress game always has a question")
            .clone();
        let contestant = if player.id == first_id {
            &mut first
        } else {
            &mut second
        };
        let answer = contestant.provider.take_turn(&player, &question)?;
        let outcome =
            session.submit_answer(player.id, answer.option_index, answer.elapsed_seconds)?;
        if let TurnOutcome::GameFinished { outcome, .. } = outcome {
            return Ok(outcome);
        }
    }
}

/// Reports session events through the `log` facade.
#[derive(Debug, Default)]
pub struct LogListener {
    names: HashMap<Uuid, String>,
}

impl LogListener {
    fn name(&self, id: Uuid) -> &str {
        self.names.get(&id).map_or("unknown player", |n| n.as_str())
    }
}

impl SessionListener for LogListener {
    fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::GameStarted { players } => {
                self.names = players.iter().map(|p| (p.id, p.name.clone())).collect();
                log::info!("{} vs {}: let's play!", players[0].name, players[1].name);
            }
            SessionEvent::AnswerSubmitted(submission) => {
                log::info!("{} answered {submission}", self.name(submission.player_id));
            }
            SessionEvent::RoundCompleted(record) => {
                let winner = record.winner.map_or("nobody (tie)", |id| self.name(id));
                log::info!(
                    "Round {} goes to {winner}. Answer: {}. {}",
                    record.number,
                    record.question.correct_option(),
                    record.question.explanation
                );
            }
            SessionEvent::GameFinished(outcome) => match outcome {
                GameOutcome::Winner { winner, loser } => {
                    log::info!("{winner} beats {loser}")
                }
                GameOutcome::Tie => log::info!("The game is a tie"),
                GameOutcome::Undecided => log::warn!("Game finished without players"),
            },
            SessionEvent::SessionReset => {
                self.names.clear();
                log::info!("Session reset");
            }
        }
    }
}
