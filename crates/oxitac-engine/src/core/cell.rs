use serde::{Deserialize, Serialize};

use crate::IllegalMove;

/// Symbol a player places on the board.
///
/// X ([`Mark::A`]) is the human side and always moves first; O ([`Mark::B`])
/// is the computer side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Mark {
    #[display("X")]
    #[serde(rename = "x", alias = "X")]
    A,
    #[display("O")]
    #[serde(rename = "o", alias = "O")]
    B,
}

impl Mark {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Mark::A => Mark::B,
            Mark::B => Mark::A,
        }
    }

    #[must_use]
    pub const fn cell(self) -> Cell {
        match self {
            Mark::A => Cell::MarkA,
            Mark::B => Cell::MarkB,
        }
    }
}

/// Content of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    MarkA,
    MarkB,
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        mark.cell()
    }
}

impl Cell {
    #[must_use]
    pub const fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::MarkA => Some(Mark::A),
            Cell::MarkB => Some(Mark::B),
        }
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::MarkA => 'X',
            Cell::MarkB => 'O',
        }
    }

    /// Parses a single board character.
    ///
    /// `0` is accepted for O since that is how the computer mark is often typed.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '-' | '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::MarkA),
            'O' | 'o' | '0' => Some(Cell::MarkB),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Index of a board cell, `0..=8`, row-major (`index = row * 3 + col`).
///
/// The "no move" sentinel is expressed as `Option::<CellIndex>::None`.
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
)]
#[serde(try_from = "usize", into = "usize")]
pub struct CellIndex(u8);

impl CellIndex {
    pub const CENTER: Self = Self(4);

    pub const ALL: [Self; 9] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
    ];

    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.index() / 3
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.index() % 3
    }
}

impl TryFrom<usize> for CellIndex {
    type Error = IllegalMove;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(IllegalMove::OutOfRange(index))
    }
}

impl From<CellIndex> for usize {
    fn from(index: CellIndex) -> Self {
        index.index()
    }
}
