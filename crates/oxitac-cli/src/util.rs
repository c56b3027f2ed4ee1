use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use oxitac_engine::{
    GameSession, HUMAN_MARK, MoveSelector, Outcome, SessionObserver, SessionState,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Destination of a JSON report: stdout, or the file given with `--output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        output_path.map_or(Output::Stdout, Output::File)
    }

    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        Output::new(output_path).write_json(value)
    }

    pub fn write_json<T>(&self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        match self {
            Output::Stdout => {
                write_pretty_json(io::stdout().lock(), value).context("Failed to write report to stdout")
            }
            Output::File(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                write_pretty_json(BufWriter::new(file), value)
                    .with_context(|| format!("Failed to write report to {}", path.display()))
            }
        }
    }
}

fn write_pretty_json<W, T>(mut writer: W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins over the `-v` count when it is set.
pub fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Drives `session` from its current state to the end of the game.
///
/// `human` chooses the X moves, which are submitted through the same entry
/// point a person would use; `computer` answers as O.
pub fn play_out<O, H, C>(
    session: &mut GameSession<O>,
    human: &mut H,
    computer: &mut C,
) -> anyhow::Result<Outcome>
where
    O: SessionObserver,
    H: MoveSelector + ?Sized,
    C: MoveSelector + ?Sized,
{
    loop {
        match *session.state() {
            SessionState::AwaitingHumanMove => {
                let selection = human.select_move(session.board(), HUMAN_MARK)?;
                let index = selection
                    .index()
                    .with_context(|| format!("no X move for board {}", session.board()))?;
                session.apply_human_move(index.index())?;
            }
            SessionState::AwaitingComputerMove => {
                session.apply_computer_move(computer)?;
            }
            SessionState::Terminal(outcome) => return Ok(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use oxitac_engine::EventLog;
    use oxitac_evaluator::{
        minimax::MinimaxEvaluator, random_selector::RandomSelector,
    };

    use super::*;

    #[test]
    fn test_play_out_optimal_draws() {
        let mut session = GameSession::new();
        let outcome = play_out(
            &mut session,
            &mut MinimaxEvaluator::default(),
            &mut MinimaxEvaluator::default(),
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Draw);
        assert!(session.board().is_full());
    }

    #[test]
    fn test_play_out_random_never_beats_minimax() {
        let mut session = GameSession::with_observer(EventLog::new());
        let mut human = RandomSelector::new(11);
        let mut computer = MinimaxEvaluator::default();
        for _ in 0..20 {
            session.reset();
            let outcome = play_out(&mut session, &mut human, &mut computer).unwrap();
            assert_ne!(outcome, Outcome::WinForA);
        }
        let terminals = session
            .observer()
            .events()
            .iter()
            .filter(|event| matches!(event, oxitac_engine::SessionEvent::Terminal { .. }))
            .count();
        assert_eq!(terminals, 20);
    }

    #[test]
    fn test_play_out_on_finished_session() {
        let mut session = GameSession::new();
        let mut computer = MinimaxEvaluator::default();
        let first = play_out(&mut session, &mut RandomSelector::new(5), &mut computer).unwrap();
        let again = play_out(&mut session, &mut RandomSelector::new(6), &mut computer).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_output_path_selects_destination() {
        assert_eq!(Output::new(None), Output::Stdout);
        let path = PathBuf::from("report.json");
        assert_eq!(Output::new(Some(path.clone())), Output::File(path));
    }

    #[test]
    fn test_save_json_writes_pretty_report_to_file() {
        let path = std::env::temp_dir().join(format!("oxitac-report-{}.json", std::process::id()));
        Output::save_json(&Outcome::Draw, Some(path.clone())).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written, "\"draw\"\n");
    }
}
