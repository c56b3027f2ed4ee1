//! Move selection for the 3x3 game.
//!
//! - [`minimax`] - Exhaustive game-theoretic search returning the outcome under
//!   optimal play and the first move (in ascending cell order) that achieves it
//! - [`random_selector`] - Uniformly random legal moves, used to simulate a
//!   fallible opponent
//!
//! Both implement [`oxitac_engine::MoveSelector`], so either can drive the
//! computer side of a [`oxitac_engine::GameSession`].
//!
//! # Example
//!
//! ```
//! use oxitac_engine::{Board, Mark, Outcome};
//! use oxitac_evaluator::minimax;
//!
//! let board: Board = "XX-OO----".parse().unwrap();
//! let evaluation = minimax::evaluate(&board, Mark::A).unwrap();
//!
//! assert_eq!(evaluation.outcome(), Outcome::WinForA);
//! assert_eq!(evaluation.best_move().map(|m| m.index()), Some(2));
//! ```
//!
//! # Search Size
//!
//! The full game tree from the empty board has 549,946 positions, small enough
//! that no transposition table is needed. Alpha-beta pruning
//! ([`minimax::SearchMode::AlphaBeta`]) is available and returns the same
//! outcome and the same move.

pub mod minimax;
pub mod random_selector;
