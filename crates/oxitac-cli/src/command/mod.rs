use clap::{Parser, Subcommand};
use oxitac_evaluator::minimax::{EvaluatorConfig, MinimaxEvaluator, SearchMode};

use crate::util;

use self::{
    evaluate::EvaluateArg, play::PlayArg, self_play::SelfPlayArg, simulate::SimulateArg,
};

mod evaluate;
mod play;
mod self_play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: debug, -vv: trace). `RUST_LOG` takes precedence
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play against the computer in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Evaluate a board and print the result as JSON
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Let the evaluator play both sides from an empty board
    SelfPlay(#[clap(flatten)] SelfPlayArg),
    /// Play random X moves against the evaluator and summarize the outcomes
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Evaluator options shared by every mode.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SearchArg {
    /// Prune the search with alpha-beta (same result, fewer positions)
    #[clap(long)]
    alpha_beta: bool,
    /// Search the empty board instead of answering with the center
    #[clap(long)]
    no_opening_shortcut: bool,
}

impl SearchArg {
    pub(crate) fn config(&self) -> EvaluatorConfig {
        EvaluatorConfig {
            opening_shortcut: !self.no_opening_shortcut,
            search: if self.alpha_beta {
                SearchMode::AlphaBeta
            } else {
                SearchMode::Exhaustive
            },
        }
    }

    pub(crate) fn evaluator(&self) -> MinimaxEvaluator {
        MinimaxEvaluator::new(self.config())
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_tracing(args.verbose);
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
        Mode::SelfPlay(arg) => self_play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_search_flags() {
        let args = CommandArgs::parse_from(["oxitac", "self-play", "--alpha-beta"]);
        let Some(Mode::SelfPlay(arg)) = args.mode else {
            panic!("expected self-play mode");
        };
        assert_eq!(
            arg.search.config(),
            EvaluatorConfig {
                opening_shortcut: true,
                search: SearchMode::AlphaBeta,
            }
        );
    }

    #[test]
    fn test_default_mode_is_play() {
        let args = CommandArgs::parse_from(["oxitac"]);
        assert!(args.mode.is_none());
        assert_eq!(PlayArg::default().reply_delay_ms, 400);
    }
}
