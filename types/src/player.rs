use std::fmt::{Debug, Display};

use serde::Serialize;
use uuid::Uuid;

use crate::{error::TriviaError, question::Question};

/// Supplies answers for one seat. The session never calls this itself; whoever drives
/// the match asks the provider for the player whose turn it is.
pub trait TurnProvider: Debug {
    /// `Err(TriviaError::NoAnswer)` when the provider can't answer at all, e.g. a
    /// closed terminal or an exhausted script.
    fn take_turn(
        &mut self,
        player: &Player,
        question: &Question,
    ) -> Result<TurnAnswer, TriviaError>;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TurnAnswer {
    pub option_index: usize,
    pub elapsed_seconds: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub score: u32,
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} pts)", self.name, self.score)
    }
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self::new_with_id(Uuid::new_v4(), name)
    }

    pub fn new_with_id(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
        }
    }

    pub fn award_point(&mut self) {
        self.score += 1;
    }
}
