use std::path::PathBuf;

use oxitac_engine::{GameSession, Outcome};
use oxitac_evaluator::random_selector::RandomSelector;
use serde::Serialize;

use crate::util::{self, Output};

use super::SearchArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[clap(long, default_value_t = 1000)]
    games: usize,
    /// Seed for the random X player
    #[clap(long, default_value_t = 0)]
    seed: u64,
    #[clap(flatten)]
    search: SearchArg,
    /// Output file path (default: stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
struct SimulationSummary {
    games: usize,
    seed: u64,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    total_moves: usize,
}

impl SimulationSummary {
    fn record(&mut self, outcome: Outcome, moves: usize) {
        self.games += 1;
        self.total_moves += moves;
        match outcome {
            Outcome::WinForA => self.x_wins += 1,
            Outcome::WinForB => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        games,
        seed,
        search,
        output,
    } = arg;

    let mut human = RandomSelector::new(*seed);
    let mut computer = search.evaluator();
    let mut session = GameSession::new();
    let mut summary = SimulationSummary {
        seed: *seed,
        ..SimulationSummary::default()
    };

    eprintln!("Simulating {games} games (random X against minimax O)...");
    for _ in 0..*games {
        session.reset();
        let outcome = util::play_out(&mut session, &mut human, &mut computer)?;
        summary.record(outcome, session.history().len());
    }
    eprintln!(
        "Finished: {} O wins, {} draws, {} X wins",
        summary.o_wins, summary.draws, summary.x_wins
    );
    if summary.x_wins > 0 {
        tracing::warn!(x_wins = summary.x_wins, "random player beat the evaluator");
    }

    Output::save_json(&summary, output.clone())
}
