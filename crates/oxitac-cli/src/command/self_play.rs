use anyhow::ensure;
use oxitac_engine::{GameSession, Outcome};

use crate::{
    util,
    view::{self, ConsoleObserver},
};

use super::SearchArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SelfPlayArg {
    #[clap(flatten)]
    pub(super) search: SearchArg,
}

pub(crate) fn run(arg: &SelfPlayArg) -> anyhow::Result<()> {
    let SelfPlayArg { search } = arg;

    let mut session = GameSession::with_observer(ConsoleObserver);
    let outcome = util::play_out(
        &mut session,
        &mut search.evaluator(),
        &mut search.evaluator(),
    )?;
    print!("{}", view::render_board(session.board()));

    ensure!(
        outcome == Outcome::Draw,
        "Optimal play must end in a draw, got: {outcome}"
    );
    Ok(())
}
