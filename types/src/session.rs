use std::fmt::{Debug, Display};

use itertools::Itertools;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::TriviaError,
    player::{Player, Seat},
    question::Question,
    question_bank::QuestionBank,
    round::{AnswerSubmission, OpenRound, RoundRecord},
    rules::GameRules,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    Waiting,
    InProgress,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum GameOutcome {
    Winner { winner: Player, loser: Player },
    Tie,
    /// No match has been started.
    Undecided,
}

/// What a successful `submit_answer` did to the match.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnOutcome {
    TurnPassed {
        next_player: Uuid,
    },
    RoundComplete {
        record: RoundRecord,
        next_player: Uuid,
    },
    GameFinished {
        record: RoundRecord,
        outcome: GameOutcome,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    GameStarted { players: [Player; 2] },
    AnswerSubmitted(AnswerSubmission),
    RoundCompleted(RoundRecord),
    GameFinished(GameOutcome),
    SessionReset,
}

/// Notified after every mutating operation on a session, in subscription order.
pub trait SessionListener: Debug {
    fn on_event(&mut self, event: &SessionEvent);
}

/// Read model of a session, suitable for rendering or JSON export.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub status: GameStatus,
    pub current_round: u32,
    pub max_rounds: u32,
    pub current_turn: Option<Uuid>,
    pub current_question: Option<Question>,
    pub pending_submission: Option<AnswerSubmission>,
    pub players: Option<[Player; 2]>,
    pub history: Vec<RoundRecord>,
}

#[derive(Debug)]
pub struct GameSession {
    rules: GameRules,
    bank: QuestionBank,
    players: Option<[Player; 2]>,
    history: Vec<RoundRecord>,
    open_round: Option<OpenRound>,
    current_round: u32,
    turn: Option<Uuid>,
    status: GameStatus,
    listeners: Vec<Box<dyn SessionListener>>,
}

impl GameSession {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            rules: GameRules::default(),
            bank,
            players: None,
            history: Vec::new(),
            open_round: None,
            current_round: 1,
            turn: None,
            status: GameStatus::Waiting,
            listeners: Vec::new(),
        }
    }

    pub fn with_rules(bank: QuestionBank, rules: GameRules) -> Result<Self, TriviaError> {
        rules.validate()?;
        Ok(Self {
            rules,
            ..Self::new(bank)
        })
    }

    pub fn subscribe(&mut self, listener: Box<dyn SessionListener>) {
        self.listeners.push(listener);
    }

    /// Seats two fresh players and opens round 1. Any previous match is discarded.
    /// Names are taken as given; validating them is the caller's business.
    pub fn start_new_game(&mut self, name1: &str, name2: &str) -> [Uuid; 2] {
        let players = [Player::new(name1), Player::new(name2)];
        let ids = [players[0].id, players[1].id];
        log::debug!(
            "New game: {} vs {} over {} rounds",
            players[0].name,
            players[1].name,
            self.rules.max_rounds
        );

        self.players = Some(players.clone());
        self.history.clear();
        self.current_round = 1;
        self.status = GameStatus::InProgress;
        self.open_round = Some(OpenRound::new(1, self.bank.pick_random()));
        self.turn = Some(self.opener_id(1));

        self.publish(SessionEvent::GameStarted { players });
        ids
    }

    pub fn submit_answer(
        &mut self,
        player_id: Uuid,
        option_index: usize,
        elapsed_seconds: f64,
    ) -> Result<TurnOutcome, TriviaError> {
        if self.status != GameStatus::InProgress {
            log::warn!("Rejected answer from {player_id}: game is {:?}", self.status);
            return Err(TriviaError::InvalidState(self.status));
        }
        if self.turn != Some(player_id) {
            log::warn!("Rejected answer from {player_id}: not their turn");
            return Err(TriviaError::InvalidTurn {
                expected: self.turn,
                actual: player_id,
            });
        }
        let round = self
            .open_round
            .as_mut()
            .expect("An in-progress game always has an open round");
        let count = round.question.option_count();
        if option_index >= count {
            return Err(TriviaError::InvalidOption {
                index: option_index,
                count,
            });
        }
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            return Err(TriviaError::InvalidElapsedTime(elapsed_seconds));
        }

        let submission =
            AnswerSubmission::new(player_id, &round.question, option_index, elapsed_seconds);
        let pending = round.first;
        if pending.is_none() {
            round.first = Some(submission);
        }
        log::debug!("Round {}: {player_id} answered {submission}", self.current_round);
        self.publish(SessionEvent::AnswerSubmitted(submission));

        match pending {
            None => {
                let next_player = self.other_player_id(player_id);
                self.turn = Some(next_player);
                Ok(TurnOutcome::TurnPassed { next_player })
            }
            Some(first) => Ok(self.close_round(first, submission)),
        }
    }

    fn close_round(&mut self, first: AnswerSubmission, second: AnswerSubmission) -> TurnOutcome {
        let round = self
            .open_round
            .take()
            .expect("A round is open while answers are being taken");
        let record = round.close(first, second, self.rules.tie_break);

        for submission in [&record.first, &record.second] {
            if submission.is_correct {
                self.player_mut(submission.player_id)
                    .expect("Submissions only come from seated players")
                    .award_point();
            }
        }

        log::debug!(
            "Round {} complete, winner: {}",
            record.number,
            record
                .winner
                .and_then(|id| self.player(id))
                .map_or_else(|| "tie".to_string(), |p| p.name.clone())
        );
        self.history.push(record.clone());
        self.publish(SessionEvent::RoundCompleted(record.clone()));

        if self.should_finish() {
            self.status = GameStatus::Finished;
            let outcome = self.winner();
            log::debug!("Game over! {self}");
            self.publish(SessionEvent::GameFinished(outcome.clone()));
            return TurnOutcome::GameFinished { record, outcome };
        }

        self.current_round += 1;
        self.open_round = Some(OpenRound::new(self.current_round, self.bank.pick_random()));
        let next_player = self.opener_id(self.current_round);
        self.turn = Some(next_player);
        TurnOutcome::RoundComplete {
            record,
            next_player,
        }
    }

    fn should_finish(&self) -> bool {
        if self.current_round >= self.rules.max_rounds {
            return true;
        }
        self.rules.end_on_majority
            && self
                .players
                .iter()
                .flatten()
                .any(|p| p.score >= self.rules.majority())
    }

    /// Compares final scores. Defined in every state, but only meaningful once finished.
    pub fn winner(&self) -> GameOutcome {
        let Some([p1, p2]) = &self.players else {
            return GameOutcome::Undecided;
        };
        if p1.score > p2.score {
            GameOutcome::Winner {
                winner: p1.clone(),
                loser: p2.clone(),
            }
        } else if p2.score > p1.score {
            GameOutcome::Winner {
                winner: p2.clone(),
                loser: p1.clone(),
            }
        } else {
            GameOutcome::Tie
        }
    }

    pub fn reset(&mut self) {
        self.players = None;
        self.history.clear();
        self.open_round = None;
        self.current_round = 1;
        self.turn = None;
        self.status = GameStatus::Waiting;
        log::debug!("Session reset");
        self.publish(SessionEvent::SessionReset);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            current_round: self.current_round,
            max_rounds: self.rules.max_rounds,
            current_turn: self.turn,
            current_question: self.current_question().cloned(),
            pending_submission: self.pending_submission().copied(),
            players: self.players.clone(),
            history: self.history.clone(),
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn current_turn(&self) -> Option<Uuid> {
        self.turn
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.turn.and_then(|id| self.player(id))
    }

    /// The question being answered, or the last one asked once the game is finished.
    pub fn current_question(&self) -> Option<&Question> {
        match (&self.open_round, self.status) {
            (Some(round), _) => Some(&round.question),
            (None, GameStatus::Finished) => self.history.last().map(|r| &r.question),
            (None, _) => None,
        }
    }

    pub fn pending_submission(&self) -> Option<&AnswerSubmission> {
        self.open_round.as_ref().and_then(|r| r.first.as_ref())
    }

    pub fn players(&self) -> Option<&[Player; 2]> {
        self.players.as_ref()
    }

    pub fn player_in(&self, seat: Seat) -> Option<&Player> {
        self.players.as_ref().map(|players| &players[seat.index()])
    }

    pub fn player(&self, id: Uuid) -> Option<&Player> {
        self.players.iter().flatten().find(|p| p.id == id)
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    fn player_mut(&mut self, id: Uuid) -> Option<&mut Player> {
        self.players.iter_mut().flatten().find(|p| p.id == id)
    }

    fn seat_of(&self, id: Uuid) -> Option<Seat> {
        [Seat::First, Seat::Second]
            .into_iter()
            .find(|&seat| self.player_in(seat).map(|p| p.id) == Some(id))
    }

    fn opener_id(&self, round: u32) -> Uuid {
        self.player_in(self.rules.opener.opener(round))
            .map(|p| p.id)
            .expect("Players are seated while a game is in progress")
    }

    fn other_player_id(&self, id: Uuid) -> Uuid {
        self.seat_of(id)
            .and_then(|seat| self.player_in(seat.other()))
            .map(|p| p.id)
            .expect("Turn pointer always names a seated player")
    }

    fn publish(&mut self, event: SessionEvent) {
        for listener in self.listeners.iter_mut() {
            listener.on_event(&event);
        }
    }
}

impl Display for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let players_str = self
            .players
            .iter()
            .flatten()
            .map(|p| p.to_string())
            .join(" vs ");
        write!(
            f,
            "[{:?}] round {}/{}: {}",
            self.status,
            self.current_round,
            self.rules.max_rounds,
            if players_str.is_empty() {
                "no players"
            } else {
                players_str.as_str()
            }
        )
    }
}
