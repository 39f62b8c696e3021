use std::{collections::HashMap, path::PathBuf};

use clap::Parser;

use trivia_simulation::{config::MatchConfig, run_match, Contestant, LogListener, SimulationError};
use trivia_strategies::{ComputerOpponent, InputStrategy};
use trivia_types::{GameOutcome, GameSession, TriviaError};

#[derive(Parser, Debug)]
struct Params {
    /// Player name; pass twice, or once with --computer
    #[arg(short, long)]
    player: Vec<String>,

    /// Second seat is played by the computer
    #[arg(long)]
    computer: bool,

    #[arg(short, long)]
    config: Option<PathBuf>,

    /// YAML question pack, overrides TRIVIA_QUESTIONS and the config file
    #[arg(short, long)]
    questions: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long)]
    rounds: Option<u32>,

    #[arg(short, long, default_value_t = 1)]
    games: usize,

    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print the final session snapshot as JSON after each game
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), SimulationError> {
    env_logger::init();
    let args = Params::parse();
    log::info!("args: {args:?}");

    let mut config = match &args.config {
        Some(path) => MatchConfig::from_yaml_file(path)?,
        None => MatchConfig::default(),
    };
    if let Some(rounds) = args.rounds {
        config.rules.max_rounds = rounds;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let names = config.contestant_names(&args.player, args.computer)?;
    let bank = config.load_question_bank(args.questions.clone())?;
    let mut session = GameSession::with_rules(bank, config.rules.clone())?;
    session.subscribe(Box::new(LogListener::default()));

    let mut wins: HashMap<String, usize> = HashMap::new();
    for game in 0..args.games {
        let second = if args.computer {
            let computer = match config.seed {
                Some(seed) => ComputerOpponent::seeded(seed.wrapping_add(game as u64 + 1)),
                None => ComputerOpponent::default(),
            };
            let accuracy = config
                .computer_accuracy
                .unwrap_or(ComputerOpponent::DEFAULT_ACCURACY);
            Contestant::new(names[1].clone(), computer.with_accuracy(accuracy))
        } else {
            Contestant::new(names[1].clone(), InputStrategy::default())
        };
        let contestants = [
            Contestant::new(names[0].clone(), InputStrategy::default()),
            second,
        ];

        let outcome = match run_match(&mut session, contestants, args.delay_ms) {
            Ok(outcome) => outcome,
            Err(TriviaError::NoAnswer { player, reason }) => {
                log::warn!(
                    "Stopping in game {}: {player} gave no answer ({reason})",
                    game + 1
                );
                break;
            }
            Err(err) => return Err(err.into()),
        };
        match &outcome {
            GameOutcome::Winner { winner, loser } => {
                println!("\n{} wins {} to {}!", winner.name, winner.score, loser.score);
                *wins.entry(winner.name.clone()).or_default() += 1;
            }
            GameOutcome::Tie => println!("\nIt's a tie!"),
            GameOutcome::Undecided => log::warn!("Game {} ended undecided", game + 1),
        }
        for record in session.history() {
            let winner = record
                .winner
                .and_then(|id| session.player(id))
                .map_or("tie", |p| p.name.as_str());
            println!("  Round {}: {winner}", record.number);
        }
        if args.json {
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
    }

    if args.games > 1 {
        for name in &names {
            println!("{name}: {} wins", wins.get(name).copied().unwrap_or(0));
        }
    }
    session.reset();
    Ok(())
}
