use std::{
    io::{self, BufRead as _, Write as _},
    thread,
    time::Duration,
};

use anyhow::Context as _;
use oxitac_engine::{GameSession, SessionError, SessionState};

use crate::view::{self, ConsoleObserver};

use super::SearchArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Pause before the computer replies, in milliseconds
    #[clap(long, default_value_t = 400)]
    pub(super) reply_delay_ms: u64,
    #[clap(flatten)]
    search: SearchArg,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            reply_delay_ms: 400,
            search: SearchArg::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Move(usize),
    NewGame,
    Quit,
    Unknown,
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "q" | "quit" | "exit" => Input::Quit,
            "n" | "new" | "reset" => Input::NewGame,
            other => other.parse().map_or(Input::Unknown, Input::Move),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        reply_delay_ms,
        search,
    } = arg;

    let reply_delay = Duration::from_millis(*reply_delay_ms);
    let mut evaluator = search.evaluator();
    let mut session = GameSession::with_observer(ConsoleObserver);
    let mut lines = io::stdin().lock().lines();

    println!("You are X and the computer is O. You play first.");
    println!("Enter a cell number, `new` to restart or `quit` to leave.");
    print!("{}", view::render_board(session.board()));

    loop {
        match *session.state() {
            SessionState::AwaitingComputerMove => {
                thread::sleep(reply_delay);
                let report = session
                    .apply_computer_move(&mut evaluator)
                    .context("Computer failed to move")?;
                print!("{}", view::render_board(session.board()));
                if let (Some(forecast), SessionState::AwaitingHumanMove) =
                    (report.forecast(), report.state())
                {
                    println!("{}", view::forecast_message(forecast));
                }
                continue;
            }
            SessionState::AwaitingHumanMove => prompt("Your move (0-8): ")?,
            SessionState::Terminal(_) => prompt("Play again? (new/quit): ")?,
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        match Input::parse(&line) {
            Input::Quit => break,
            Input::NewGame => {
                session.reset();
                print!("{}", view::render_board(session.board()));
            }
            Input::Move(index) => match session.apply_human_move(index) {
                Ok(_) => print!("{}", view::render_board(session.board())),
                Err(SessionError::IllegalMove(err)) => eprintln!("Illegal move: {err}"),
                Err(err) => return Err(err.into()),
            },
            Input::Unknown => eprintln!("Unrecognized input: {:?}", line.trim()),
        }
    }

    Ok(())
}

fn prompt(message: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{message}").context("Failed to write prompt")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
