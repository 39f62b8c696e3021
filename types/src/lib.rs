pub mod error;
pub mod player;
pub mod question;
pub mod question_bank;
pub mod round;
pub mod rules;
pub mod session;

pub use error::TriviaError;
pub use player::{Player, Seat, TurnAnswer, TurnProvider};
pub use question::Question;
pub use question_bank::QuestionBank;
pub use round::{AnswerSubmission, OpenRound, RoundRecord, TieBreak};
pub use rules::{GameRules, OpenerRule};
pub use session::{
    GameOutcome, GameSession, GameStatus, SessionEvent, SessionListener, SessionSnapshot,
    TurnOutcome,
};
