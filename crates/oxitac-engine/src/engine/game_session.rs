use tracing::debug;

use crate::{
    IllegalMove, SessionError,
    core::{Board, CellIndex, Mark, Outcome},
};

use super::{observer::SessionObserver, selector::MoveSelector};

/// Mark played by the human side. The human always opens.
pub const HUMAN_MARK: Mark = Mark::A;
/// Mark played by the computer side.
pub const COMPUTER_MARK: Mark = Mark::B;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SessionState {
    #[display("awaiting human move")]
    AwaitingHumanMove,
    #[display("awaiting computer move")]
    AwaitingComputerMove,
    #[display("game over: {_0}")]
    Terminal(Outcome),
}

impl SessionState {
    #[must_use]
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            SessionState::Terminal(outcome) => Some(outcome),
            SessionState::AwaitingHumanMove | SessionState::AwaitingComputerMove => None,
        }
    }

    const fn awaiting(mark: Mark) -> Self {
        match mark {
            Mark::A => SessionState::AwaitingHumanMove,
            Mark::B => SessionState::AwaitingComputerMove,
        }
    }
}

/// An accepted move and the state it led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    index: CellIndex,
    mark: Mark,
    forecast: Option<Outcome>,
    state: SessionState,
}

impl MoveReport {
    #[must_use]
    pub const fn index(&self) -> CellIndex {
        self.index
    }

    #[must_use]
    pub const fn mark(&self) -> Mark {
        self.mark
    }

    /// The selector's forecast for computer moves; always `None` for human moves.
    #[must_use]
    pub const fn forecast(&self) -> Option<Outcome> {
        self.forecast
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }
}

/// One human-versus-computer game, replayable through [`GameSession::reset`].
///
/// The session owns its board. Moves are only accepted from the side whose
/// turn it is, and none at all once the game is over.
#[derive(Debug, Clone)]
pub struct GameSession<O = ()> {
    board: Board,
    state: SessionState,
    history: Vec<(CellIndex, Mark)>,
    forecast: Option<Outcome>,
    observer: O,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_observer(())
    }
}

impl<O> GameSession<O>
where
    O: SessionObserver,
{
    #[must_use]
    pub fn with_observer(observer: O) -> Self {
        Self {
            board: Board::EMPTY,
            state: SessionState::AwaitingHumanMove,
            history: Vec::with_capacity(Board::CELL_COUNT),
            forecast: None,
            observer,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Moves played in the current game, oldest first.
    #[must_use]
    pub fn history(&self) -> &[(CellIndex, Mark)] {
        &self.history
    }

    /// Forecast attached to the latest computer move of the current game.
    #[must_use]
    pub fn forecast(&self) -> Option<Outcome> {
        self.forecast
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Places the human's mark on `index`.
    ///
    /// Fails with [`IllegalMove`] when the index is out of range, the cell is
    /// occupied, or it is not the human's turn. A failed call changes nothing.
    pub fn apply_human_move(&mut self, index: usize) -> Result<MoveReport, SessionError> {
        if !self.state.is_awaiting_human_move() {
            return Err(IllegalMove::NotHumanTurn(self.state).into());
        }
        let index = CellIndex::try_from(index)?;
        self.apply(index, HUMAN_MARK, None)
    }

    /// Asks `selector` for the computer's move and applies it.
    pub fn apply_computer_move<S>(&mut self, selector: &mut S) -> Result<MoveReport, SessionError>
    where
        S: MoveSelector + ?Sized,
    {
        if !self.state.is_awaiting_computer_move() {
            return Err(IllegalMove::NotComputerTurn(self.state).into());
        }
        let selection = selector.select_move(&self.board, COMPUTER_MARK)?;
        let index = selection.index().ok_or(SessionError::NoMoveSelected)?;
        let report = self.apply(index, COMPUTER_MARK, selection.forecast())?;
        self.forecast = selection.forecast();
        Ok(report)
    }

    /// Clears the board and waits for the human's opening move.
    ///
    /// Valid in every state.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.state = SessionState::AwaitingHumanMove;
        self.history.clear();
        self.forecast = None;
        debug!("session reset");
    }

    fn apply(
        &mut self,
        index: CellIndex,
        mark: Mark,
        forecast: Option<Outcome>,
    ) -> Result<MoveReport, SessionError> {
        self.board.place(index, mark)?;
        self.history.push((index, mark));
        self.observer.move_applied(index, mark);

        self.state = match self.board.outcome() {
            Some(outcome) => {
                self.observer.terminal(outcome);
                SessionState::Terminal(outcome)
            }
            None => SessionState::awaiting(mark.opponent()),
        };
        debug!(%index, %mark, board = %self.board, state = %self.state, "move applied");

        Ok(MoveReport {
            index,
            mark,
            forecast,
            state: self.state,
        })
    }
}
