use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use trivia_simulation::{run_match, Contestant, LogListener};
use trivia_strategies::ScriptedStrategy;
use trivia_types::{GameSession, Question, QuestionBank};

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

#[test]
fn each_round_is_reported_once_at_info() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let question = Question::new("What is 6 / 2?", vec!["2".into(), "3".into()], 1, "6 / 2 = 3")
        .unwrap();
    let mut session = GameSession::new(QuestionBank::seeded(vec![question], 4).unwrap());
    session.subscribe(Box::new(LogListener::default()));
    run_match(
        &mut session,
        [
            Contestant::new("Alice", ScriptedStrategy::new([(1, 1.0); 5])),
            Contestant::new("Bob", ScriptedStrategy::new([(0, 1.0); 5])),
        ],
        None,
    )
    .unwrap();
    session.reset();

    let records = LOGGER.records.lock().unwrap();
    let info: Vec<_> = records
        .iter()
        .filter(|(level, _)| *level <= Level::Info)
        .map(|(_, msg)| msg.as_str())
        .collect();
    for round in 1..=5 {
        let prefix = format!("Round {round} ");
        let reports = info.iter().filter(|msg| msg.starts_with(&prefix)).count();
        assert_eq!(reports, 1, "round {round} in {info:#?}");
    }
    assert_eq!(info.iter().filter(|msg| msg.contains("reset")).count(), 1);
    assert!(records
        .iter()
        .any(|(level, msg)| *level == Level::Debug && msg.starts_with("Round 1 complete")));
}
