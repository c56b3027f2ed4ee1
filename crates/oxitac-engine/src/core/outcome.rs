use serde::{Deserialize, Serialize};

use super::cell::Mark;

/// Game-theoretic result of a position.
///
/// Variants are declared in ascending order so the derived [`Ord`] is the
/// minimax order: `WinForB < Draw < WinForA`. X ([`Mark::A`]) maximizes,
/// O ([`Mark::B`]) minimizes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    #[display("O wins")]
    WinForB,
    #[display("draw")]
    Draw,
    #[display("X wins")]
    WinForA,
}

impl Outcome {
    /// Outcome in which `mark` has completed a line.
    #[must_use]
    pub const fn for_winner(mark: Mark) -> Self {
        match mark {
            Mark::A => Outcome::WinForA,
            Mark::B => Outcome::WinForB,
        }
    }

    #[must_use]
    pub const fn winner(self) -> Option<Mark> {
        match self {
            Outcome::WinForA => Some(Mark::A),
            Outcome::WinForB => Some(Mark::B),
            Outcome::Draw => None,
        }
    }

    /// The least favourable outcome for `mark`.
    #[must_use]
    pub const fn worst_for(mark: Mark) -> Self {
        Self::for_winner(mark.opponent())
    }

    /// Returns `true` if `self` is strictly preferable to `other` for `mark`.
    #[must_use]
    pub fn is_better_for(self, mark: Mark, other: Self) -> bool {
        match mark {
            Mark::A => self > other,
            Mark::B => self < other,
        }
    }
}
