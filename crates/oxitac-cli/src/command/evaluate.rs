use std::path::PathBuf;

use anyhow::Context as _;
use oxitac_engine::{Board, Mark};
use oxitac_evaluator::minimax::{Evaluation, SearchMode};
use serde::Serialize;

use crate::util::Output;

use super::SearchArg;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum MarkArg {
    X,
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::A,
            MarkArg::O => Mark::B,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Board as nine cells in row-major order, e.g. `XX-OO----` (`-` is empty)
    board: Board,
    /// Side to move (default: inferred from the mark counts, X first)
    #[clap(long, value_enum)]
    mover: Option<MarkArg>,
    #[clap(flatten)]
    search: SearchArg,
    /// Output file path (default: stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EvaluationReport {
    board: Board,
    mover: Mark,
    search: SearchMode,
    #[serde(flatten)]
    evaluation: Evaluation,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        board,
        mover,
        search,
        output,
    } = arg;

    let mover = mover.map_or_else(|| board.side_to_move(), Mark::from);
    let evaluator = search.evaluator();
    let evaluation = evaluator
        .evaluate(board, mover)
        .with_context(|| format!("Cannot evaluate board {board}"))?;

    let report = EvaluationReport {
        board: *board,
        mover,
        search: evaluator.config().search,
        evaluation,
    };
    Output::save_json(&report, output.clone())
}
