//! Game session logic and the seams to its collaborators.
//!
//! - [`GameSession`] - The human-versus-computer state machine
//! - [`SessionState`] - Whose turn it is, or how the game ended
//! - [`MoveSelector`] - Chooses moves for the computer side (implemented by the evaluator)
//! - [`SessionObserver`] - Receives move and game-over notifications (the presentation layer)
//!
//! # Game Flow
//!
//! 1. A new [`GameSession`] starts with an empty board, awaiting the human (X)
//! 2. The human places a mark with [`GameSession::apply_human_move`]
//! 3. The computer (O) replies through [`GameSession::apply_computer_move`]
//! 4. Repeat until a line is completed or the board fills up
//! 5. [`GameSession::reset`] starts the next game
//!
//! # Example
//!
//! ```
//! use oxitac_engine::{CellIndex, GameSession, MoveSelector, Selection, SessionState};
//!
//! // A selector that always takes the first empty cell.
//! struct FirstEmpty;
//!
//! impl MoveSelector for FirstEmpty {
//!     fn select_move(
//!         &mut self,
//!         board: &oxitac_engine::Board,
//!         _mover: oxitac_engine::Mark,
//!     ) -> Result<Selection, oxitac_engine::InvariantViolation> {
//!         Ok(Selection::new(board.empty_cells().first().copied(), None))
//!     }
//! }
//!
//! let mut session = GameSession::new();
//! session.apply_human_move(4).unwrap();
//! assert!(session.state().is_awaiting_computer_move());
//!
//! let report = session.apply_computer_move(&mut FirstEmpty).unwrap();
//! assert_eq!(report.index(), CellIndex::ALL[0]);
//! assert_eq!(*session.state(), SessionState::AwaitingHumanMove);
//! ```

pub use self::{game_session::*, observer::*, selector::*};

mod game_session;
mod observer;
mod selector;
