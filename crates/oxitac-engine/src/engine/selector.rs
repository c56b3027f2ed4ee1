use crate::{
    InvariantViolation,
    core::{Board, CellIndex, Mark, Outcome},
};

/// A move chosen by a [`MoveSelector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    index: Option<CellIndex>,
    forecast: Option<Outcome>,
}

impl Selection {
    #[must_use]
    pub const fn new(index: Option<CellIndex>, forecast: Option<Outcome>) -> Self {
        Self { index, forecast }
    }

    /// The chosen cell, or `None` when the board is already finished.
    #[must_use]
    pub const fn index(&self) -> Option<CellIndex> {
        self.index
    }

    /// Expected result of the game if both sides keep playing optimally.
    ///
    /// Selectors that do not search report `None`.
    #[must_use]
    pub const fn forecast(&self) -> Option<Outcome> {
        self.forecast
    }
}

/// Chooses the next move for a side.
pub trait MoveSelector {
    /// Selects a move for `mover` on `board`.
    ///
    /// Implementations must not keep a reference to `board`; any working
    /// state belongs to the call.
    fn select_move(&mut self, board: &Board, mover: Mark) -> Result<Selection, InvariantViolation>;
}

impl<S> MoveSelector for &mut S
where
    S: MoveSelector + ?Sized,
{
    fn select_move(&mut self, board: &Board, mover: Mark) -> Result<Selection, InvariantViolation> {
        (**self).select_move(board, mover)
    }
}
