pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A board that no legal game can produce.
///
/// Reaching the evaluator with such a board is a logic defect in the caller;
/// it is reported, never corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvariantViolation {
    #[display("board must have exactly 9 cells, got {len}")]
    WrongCellCount { len: usize },
    #[display("impossible mark counts: {mark_a} X against {mark_b} O")]
    MarkImbalance { mark_a: usize, mark_b: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IllegalMove {
    #[display("cell {_0} is already occupied")]
    Occupied(#[error(not(source))] CellIndex),
    #[display("cell index {_0} is out of range (expected 0..=8)")]
    OutOfRange(#[error(not(source))] usize),
    #[display("not the human's turn ({_0})")]
    NotHumanTurn(#[error(not(source))] SessionState),
    #[display("not the computer's turn ({_0})")]
    NotComputerTurn(#[error(not(source))] SessionState),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum ParseBoardError {
    #[display("invalid board character {_0:?}")]
    #[from(skip)]
    InvalidChar(#[error(not(source))] char),
    #[display("{_0}")]
    InvariantViolation(InvariantViolation),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum SessionError {
    #[display("illegal move: {_0}")]
    IllegalMove(IllegalMove),
    #[display("invariant violation: {_0}")]
    InvariantViolation(InvariantViolation),
    #[display("move selector returned no move for a board that is still in play")]
    #[from(skip)]
    NoMoveSelected,
}
