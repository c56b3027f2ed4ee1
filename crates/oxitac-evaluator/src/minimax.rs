use oxitac_engine::{
    Board, Cell, CellIndex, InvariantViolation, Mark, MoveSelector, Outcome, Selection,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Visit every position below the root.
    #[default]
    #[display("exhaustive")]
    Exhaustive,
    /// Skip subtrees that cannot change the result.
    #[display("alpha-beta")]
    AlphaBeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Answer an empty board with `(Draw, center)` without searching.
    pub opening_shortcut: bool,
    pub search: SearchMode,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            opening_shortcut: true,
            search: SearchMode::default(),
        }
    }
}

/// Result of evaluating a position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    outcome: Outcome,
    best_move: Option<CellIndex>,
    nodes: u64,
}

impl Evaluation {
    /// Outcome under optimal play by both sides.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// First move in ascending cell order achieving [`Self::outcome`];
    /// `None` when the board is already decided or full.
    #[must_use]
    pub const fn best_move(&self) -> Option<CellIndex> {
        self.best_move
    }

    /// Number of positions visited, including the root.
    #[must_use]
    pub const fn nodes(&self) -> u64 {
        self.nodes
    }
}

/// Minimax search over the full game tree.
#[derive(Debug, Clone, Default)]
pub struct MinimaxEvaluator {
    config: EvaluatorConfig,
}

impl MinimaxEvaluator {
    #[must_use]
    pub const fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluates `board` with `mover` to play.
    ///
    /// A board that already holds a completed line is scored as lost for the
    /// mover: the line was completed by the previous move.
    ///
    /// The caller's board is never touched; the search runs on its own copy.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] if the mark counts differ by more than
    /// one, since no game can reach such a board.
    #[instrument(level = "debug", skip_all, fields(board = %board, mover = %mover))]
    pub fn evaluate(&self, board: &Board, mover: Mark) -> Result<Evaluation, InvariantViolation> {
        board.validate()?;

        if self.config.opening_shortcut && board.is_empty() {
            debug!("opening shortcut");
            return Ok(Evaluation {
                outcome: Outcome::Draw,
                best_move: Some(CellIndex::CENTER),
                nodes: 0,
            });
        }

        let mut search = Search {
            board: *board,
            nodes: 0,
        };
        let (outcome, best_move) = match self.config.search {
            SearchMode::Exhaustive => search.minimax(mover),
            SearchMode::AlphaBeta => search.alpha_beta(mover, Outcome::WinForB, Outcome::WinForA),
        };
        debug_assert_eq!(search.board, *board, "working board not restored");

        trace!(nodes = search.nodes, mode = %self.config.search, "search finished");
        debug!(%outcome, best_move = ?best_move.map(CellIndex::index), "evaluated");

        Ok(Evaluation {
            outcome,
            best_move,
            nodes: search.nodes,
        })
    }
}

impl MoveSelector for MinimaxEvaluator {
    fn select_move(&mut self, board: &Board, mover: Mark) -> Result<Selection, InvariantViolation> {
        let evaluation = self.evaluate(board, mover)?;
        Ok(Selection::new(
            evaluation.best_move(),
            Some(evaluation.outcome()),
        ))
    }
}

/// Evaluates `board` with the default configuration.
pub fn evaluate(board: &Board, mover: Mark) -> Result<Evaluation, InvariantViolation> {
    MinimaxEvaluator::default().evaluate(board, mover)
}

/// Working state of one evaluation. Owns its board exclusively.
struct Search {
    board: Board,
    nodes: u64,
}

impl Search {
    /// Outcome for a finished board, seen from `mover`.
    fn terminal(&self, mover: Mark) -> Option<Outcome> {
        if self.board.is_terminal_win() {
            return Some(Outcome::for_winner(mover.opponent()));
        }
        self.board.is_full().then_some(Outcome::Draw)
    }

    fn minimax(&mut self, mover: Mark) -> (Outcome, Option<CellIndex>) {
        self.nodes += 1;
        if let Some(outcome) = self.terminal(mover) {
            return (outcome, None);
        }

        let moves = self.board.empty_cells();
        let mut best = (Outcome::worst_for(mover), moves[0]);
        for index in moves {
            self.board.set(index, mover.cell());
            let (outcome, _) = self.minimax(mover.opponent());
            self.board.set(index, Cell::Empty);

            if outcome.is_better_for(mover, best.0) {
                best = (outcome, index);
            }
        }
        (best.0, Some(best.1))
    }

    fn alpha_beta(
        &mut self,
        mover: Mark,
        mut alpha: Outcome,
        mut beta: Outcome,
    ) -> (Outcome, Option<CellIndex>) {
        self.nodes += 1;
        if let Some(outcome) = self.terminal(mover) {
            return (outcome, None);
        }

        let moves = self.board.empty_cells();
        let mut best = (Outcome::worst_for(mover), moves[0]);
        for index in moves {
            self.board.set(index, mover.cell());
            let (outcome, _) = self.alpha_beta(mover.opponent(), alpha, beta);
            self.board.set(index, Cell::Empty);

            if outcome.is_better_for(mover, best.0) {
                best = (outcome, index);
            }
            match mover {
                Mark::A => alpha = alpha.max(best.0),
                Mark::B => beta = beta.min(best.0),
            }
            if alpha >= beta {
                break;
            }
        }
        (best.0, Some(best.1))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn full_search(search: SearchMode) -> MinimaxEvaluator {
        MinimaxEvaluator::new(EvaluatorConfig {
            opening_shortcut: false,
            search,
        })
    }

    /// Every position reachable from the empty board with X moving first,
    /// paired with the side to move.
    fn reachable_positions() -> Vec<(Board, Mark)> {
        fn walk(board: &mut Board, mover: Mark, seen: &mut HashSet<Board>) {
            if !seen.insert(*board) || board.outcome().is_some() {
                return;
            }
            for index in board.empty_cells() {
                board.set(index, mover.cell());
                walk(board, mover.opponent(), seen);
                board.set(index, Cell::Empty);
            }
        }

        let mut seen = HashSet::new();
        let mut empty = Board::EMPTY;
        walk(&mut empty, Mark::A, &mut seen);
        let mut positions: Vec<_> = seen
            .into_iter()
            .map(|board| (board, board.side_to_move()))
            .collect();
        positions.sort_by_key(|(board, _)| board.to_string());
        positions
    }

    /// Independent negamax: score of the position for `mover`
    /// (+1 win, 0 draw, -1 loss).
    fn oracle_score(board: &mut Board, mover: Mark) -> i8 {
        if board.winner().is_some() {
            return -1;
        }
        let mut best = None;
        for index in 0..9 {
            let index = CellIndex::new(index).unwrap();
            if board.get(index) != Cell::Empty {
                continue;
            }
            board.set(index, mover.cell());
            let score = -oracle_score(board, mover.opponent());
            board.set(index, Cell::Empty);
            best = Some(best.map_or(score, |b: i8| b.max(score)));
        }
        best.unwrap_or(0)
    }

    fn oracle_outcome(board: &Board, mover: Mark) -> Outcome {
        let mut board = *board;
        match (oracle_score(&mut board, mover), mover) {
            (0, _) => Outcome::Draw,
            (1, mark) => Outcome::for_winner(mark),
            (_, mark) => Outcome::for_winner(mark.opponent()),
        }
    }

    /// Moves that achieve the oracle outcome, ascending.
    fn oracle_best_moves(board: &Board, mover: Mark) -> Vec<CellIndex> {
        let target = oracle_outcome(board, mover);
        board
            .empty_cells()
            .into_iter()
            .filter(|index| {
                let mut child = *board;
                child.set(*index, mover.cell());
                oracle_outcome(&child, mover.opponent()) == target
            })
            .collect()
    }

    #[test]
    fn test_reachable_position_count() {
        assert_eq!(reachable_positions().len(), 5478);
    }

    #[test]
    fn test_empty_board_opening_shortcut() {
        let evaluation = evaluate(&Board::EMPTY, Mark::A).unwrap();
        assert_eq!(evaluation.outcome(), Outcome::Draw);
        assert_eq!(evaluation.best_move(), Some(CellIndex::CENTER));
        assert_eq!(evaluation.nodes(), 0);
    }

    #[test]
    fn test_empty_board_full_search() {
        let evaluation = full_search(SearchMode::Exhaustive)
            .evaluate(&Board::EMPTY, Mark::A)
            .unwrap();
        assert_eq!(evaluation.outcome(), Outcome::Draw);
        // Every opening draws; the first one in index order is chosen.
        assert_eq!(evaluation.best_move(), CellIndex::new(0));
        assert_eq!(evaluation.nodes(), 549_946);
    }

    #[test]
    fn test_completes_own_row() {
        let evaluation = evaluate(&board("XX-OO----"), Mark::A).unwrap();
        assert_eq!(evaluation.outcome(), Outcome::WinForA);
        assert_eq!(evaluation.best_move(), CellIndex::new(2));
    }

    #[test]
    fn test_equal_wins_are_not_ranked_by_length() {
        // O wins at once on 5, but 2 forks 5 and 6 and comes first.
        let board = board("XX-OO---X");
        let evaluation = evaluate(&board, Mark::B).unwrap();
        assert_eq!(evaluation.outcome(), Outcome::WinForB);
        assert_eq!(evaluation.best_move(), CellIndex::new(2));

        let best = oracle_best_moves(&board, Mark::B);
        assert!(best.contains(&CellIndex::ALL[2]));
        assert!(best.contains(&CellIndex::ALL[5]));
    }

    #[test]
    fn test_two_cells_left_for_o() {
        // Taking 8 lets X complete the left column on 6.
        let board = board("XOXXOO-X-");
        let evaluation = evaluate(&board, Mark::B).unwrap();
        assert_eq!(evaluation.outcome(), Outcome::Draw);
        assert_eq!(evaluation.best_move(), CellIndex::new(6));
        assert_eq!(evaluation.outcome(), oracle_outcome(&board, Mark::B));
        assert_eq!(oracle_best_moves(&board, Mark::B), vec![CellIndex::ALL[6]]);
    }

    #[test]
    fn test_existing_line_is_loss_for_mover() {
        // X already holds the 2-4-6 diagonal.
        let x_line = board("XOXOXOX--");
        assert!(x_line.is_terminal_win());

        let evaluation = evaluate(&x_line, Mark::B).unwrap();
        assert_eq!(evaluation.outcome(), Outcome::WinForA);
        assert_eq!(evaluation.best_move(), None);
        assert_eq!(evaluation.outcome(), oracle_outcome(&x_line, Mark::B));

        let o_line = board("XX-OOOX--");
        let evaluation = evaluate(&o_line, Mark::A).unwrap();
        assert_eq!(evaluation.outcome(), Outcome::WinForB);
        assert_eq!(evaluation.best_move(), None);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let evaluation = evaluate(&board("XOXXOOOXX"), Mark::B).unwrap();
        assert_eq!(evaluation.outcome(), Outcome::Draw);
        assert_eq!(evaluation.best_move(), None);
        assert_eq!(evaluation.nodes(), 1);
    }

    #[test]
    fn test_tie_break_prefers_lowest_index() {
        // X wins on 2 (top row) and on 6 (left column).
        let board = board("XX-XOO--O");
        let evaluation = evaluate(&board, Mark::A).unwrap();
        assert_eq!(evaluation.outcome(), Outcome::WinForA);
        assert_eq!(evaluation.best_move(), CellIndex::new(2));
        assert!(oracle_best_moves(&board, Mark::A).len() >= 2);
    }

    #[test]
    fn test_malformed_board_is_rejected() {
        let err = evaluate(&board("XXX------"), Mark::B).unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::MarkImbalance {
                mark_a: 3,
                mark_b: 0
            }
        );
        assert!(evaluate(&board("XXXXXXXXX"), Mark::B).is_err());
    }

    #[test]
    fn test_deterministic() {
        let evaluator = full_search(SearchMode::Exhaustive);
        let board = board("X---O----");
        let first = evaluator.evaluate(&board, Mark::A).unwrap();
        let second = evaluator.evaluate(&board, Mark::A).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_matches_oracle_on_every_reachable_position() {
        let evaluator = full_search(SearchMode::Exhaustive);
        for (board, mover) in reachable_positions() {
            let before = board;
            let evaluation = evaluator.evaluate(&board, mover).unwrap();
            assert_eq!(board, before);

            assert_eq!(
                evaluation.outcome(),
                oracle_outcome(&board, mover),
                "{board} {mover}"
            );
            if board.outcome().is_some() {
                assert_eq!(evaluation.best_move(), None, "{board}");
            } else {
                let best = oracle_best_moves(&board, mover);
                assert_eq!(evaluation.best_move(), best.first().copied(), "{board}");
            }
        }
    }

    #[test]
    fn test_alpha_beta_agrees_with_exhaustive() {
        let exhaustive = full_search(SearchMode::Exhaustive);
        let alpha_beta = full_search(SearchMode::AlphaBeta);
        for (board, mover) in reachable_positions() {
            let a = exhaustive.evaluate(&board, mover).unwrap();
            let b = alpha_beta.evaluate(&board, mover).unwrap();
            assert_eq!(a.outcome(), b.outcome(), "{board}");
            assert_eq!(a.best_move(), b.best_move(), "{board}");
            assert!(b.nodes() <= a.nodes(), "{board}");
        }
    }

    #[test]
    fn test_optimal_self_play_draws() {
        for config in [
            EvaluatorConfig::default(),
            EvaluatorConfig {
                opening_shortcut: false,
                search: SearchMode::AlphaBeta,
            },
        ] {
            let evaluator = MinimaxEvaluator::new(config);
            let mut board = Board::EMPTY;
            let mut mover = Mark::A;
            while board.outcome().is_none() {
                let evaluation = evaluator.evaluate(&board, mover).unwrap();
                assert_eq!(evaluation.outcome(), Outcome::Draw);
                board.place(evaluation.best_move().unwrap(), mover).unwrap();
                mover = mover.opponent();
            }
            assert_eq!(board.outcome(), Some(Outcome::Draw), "{config:?}");
        }
    }

    #[test]
    fn test_select_move_carries_forecast() {
        let mut evaluator = MinimaxEvaluator::default();
        let selection = evaluator.select_move(&board("XX-OO---X"), Mark::B).unwrap();
        assert_eq!(selection.index(), CellIndex::new(2));
        assert_eq!(selection.forecast(), Some(Outcome::WinForB));

        let selection = evaluator.select_move(&Board::EMPTY, Mark::A).unwrap();
        assert_eq!(selection.index(), Some(CellIndex::CENTER));
        assert_eq!(selection.forecast(), Some(Outcome::Draw));
    }

    #[test]
    fn test_evaluation_serializes() {
        let evaluation = evaluate(&board("XX-OO----"), Mark::A).unwrap();
        let json = serde_json::to_value(evaluation).unwrap();
        assert_eq!(json["outcome"], "win-for-a");
        assert_eq!(json["best_move"], 2);
    }
}
