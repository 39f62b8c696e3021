use std::{
    io::{self, BufRead, Write},
    time::Instant,
};

use itertools::Itertools;
use regex::Regex;
use trivia_types::{
    question::option_label, Player, Question, TriviaError, TurnAnswer, TurnProvider,
};

/// A human at the terminal. Response time is measured from when the question is shown.
#[derive(Debug, Default)]
pub struct InputStrategy {}

impl TurnProvider for InputStrategy {
    fn take_turn(
        &mut self,
        player: &Player,
        question: &Question,
    ) -> Result<TurnAnswer, TriviaError> {
        println!("\n{}, it's your turn!", player.name);
        println!("{question}");
        let started = Instant::now();
        let option_index = read_answer(&mut io::stdin().lock(), player, question)?;
        Ok(TurnAnswer {
            option_index,
            elapsed_seconds: started.elapsed().as_secs_f64(),
        })
    }
}

/// Prompts until a valid option is read. End of input means the player is gone.
fn read_answer(
    reader: &mut impl BufRead,
    player: &Player,
    question: &Question,
) -> Result<usize, TriviaError> {
    let labels = (0..question.option_count()).map(option_label).join("/");
    let mut buf = String::new();
    loop {
        print!("Your answer ({labels})? >> ");
        let _ = io::stdout().flush();
        buf.clear();
        match reader.read_line(&mut buf) {
            Ok(0) => {
                return Err(TriviaError::NoAnswer {
                    player: player.name.clone(),
                    reason: "input closed".to_string(),
                })
            }
            Ok(_) => match select_option_from_str(&buf, question.option_count()) {
                Ok(option_index) => return Ok(option_index),
                Err(err) => log::error!("Error parsing answer from stdin: {err}"),
            },
            Err(err) => {
                return Err(TriviaError::NoAnswer {
                    player: player.name.clone(),
                    reason: format!("error reading input: {err}"),
                })
            }
        }
    }
}

/// Accepts a letter (`b`) or a 1-based number (`2`), case-insensitive.
pub fn select_option_from_str(input: &str, option_count: usize) -> Result<usize, String> {
    let re = Regex::new(r"^\s*(?:(?<letter>[a-z])|(?<number>\d+))\s*$")
        .expect("Valid answer regex");
    let input = input.to_lowercase();
    let Some(caps) = re.captures(&input) else {
        return Err(format!("Unable to parse an answer from {:?}", input.trim()));
    };

    let index = if let Some(letter) = caps.name("letter") {
        (letter.as_str().as_bytes()[0] - b'a') as usize
    } else {
        let number: usize = caps
            .name("number")
            .expect("Regex matches either a letter or a number")
            .as_str()
            .parse()
            .map_err(|err| format!("Unable to parse number: {err}"))?;
        number
            .checked_sub(1)
            .ok_or_else(|| "Options are numbered from 1".to_string())?
    };

    if index >= option_count {
        return Err(format!(
            "Option {} does not exist, pick one of {option_count}",
            option_label(index)
        ));
    }
    Ok(index)
}
