use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{IllegalMove, InvariantViolation, ParseBoardError};

use super::{
    cell::{Cell, CellIndex, Mark},
    outcome::Outcome,
};

const fn line(a: usize, b: usize, c: usize) -> [CellIndex; 3] {
    [CellIndex::ALL[a], CellIndex::ALL[b], CellIndex::ALL[c]]
}

/// The eight winning lines: three rows, three columns, two diagonals.
pub const LINES: [[CellIndex; 3]; 8] = [
    line(0, 1, 2),
    line(3, 4, 5),
    line(6, 7, 8),
    line(0, 3, 6),
    line(1, 4, 7),
    line(2, 5, 8),
    line(0, 4, 8),
    line(2, 4, 6),
];

/// The 3x3 grid, stored row-major.
///
/// `Board` is `Copy`: every search and every session owns its own value, so
/// a board is never aliased between two evaluations.
///
/// # Text format
///
/// Nine cells, `-` for empty, `X` for [`Mark::A`] and `O` for [`Mark::B`]:
///
/// ```
/// use oxitac_engine::{Board, Cell, CellIndex};
///
/// let board: Board = "XX-OO----".parse().unwrap();
/// assert_eq!(board.get(CellIndex::ALL[3]), Cell::MarkB);
/// assert!(!board.is_terminal_win());
/// assert_eq!(board.to_string(), "XX-OO----");
/// ```
///
/// Whitespace and `|`, `/`, `,` separators are ignored when parsing, so
/// `"XX-/OO-/---"` is the same board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; Board::CELL_COUNT],
}

impl Board {
    pub const CELL_COUNT: usize = 9;

    pub const EMPTY: Self = Self {
        cells: [Cell::Empty; Self::CELL_COUNT],
    };

    /// Builds a board from a cell slice, which must hold exactly nine cells.
    pub fn from_cells(cells: &[Cell]) -> Result<Self, InvariantViolation> {
        let cells = cells
            .try_into()
            .map_err(|_| InvariantViolation::WrongCellCount { len: cells.len() })?;
        Ok(Self { cells })
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell; Self::CELL_COUNT] {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, index: CellIndex) -> Cell {
        self.cells[index.index()]
    }

    /// Overwrites a cell without any legality check.
    ///
    /// Used by the search to apply and roll back hypothetical moves.
    pub fn set(&mut self, index: CellIndex, cell: Cell) {
        self.cells[index.index()] = cell;
    }

    /// Places `mark` on an empty cell.
    pub fn place(&mut self, index: CellIndex, mark: Mark) -> Result<(), IllegalMove> {
        if !self.get(index).is_empty() {
            return Err(IllegalMove::Occupied(index));
        }
        self.set(index, mark.cell());
        Ok(())
    }

    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// Returns the mark owning the first completed line, in [`LINES`] order.
    #[must_use]
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.get(a).mark()?;
            (self.get(b) == self.get(a) && self.get(c) == self.get(a)).then_some(mark)
        })
    }

    /// Returns `true` if any line holds three identical marks.
    #[must_use]
    pub fn is_terminal_win(&self) -> bool {
        self.winner().is_some()
    }

    /// Empty cells in ascending index order.
    ///
    /// The order is the tie-break order of the evaluator.
    #[must_use]
    pub fn empty_cells(&self) -> ArrayVec<CellIndex, { Board::CELL_COUNT }> {
        CellIndex::ALL
            .into_iter()
            .filter(|index| self.get(*index).is_empty())
            .collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Classifies a finished board; `None` while the game is still in play.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        if let Some(mark) = self.winner() {
            return Some(Outcome::for_winner(mark));
        }
        self.is_full().then_some(Outcome::Draw)
    }

    /// Side to move assuming X opened the game.
    #[must_use]
    pub fn side_to_move(&self) -> Mark {
        if self.count(Cell::MarkA) > self.count(Cell::MarkB) {
            Mark::B
        } else {
            Mark::A
        }
    }

    /// Checks that the mark counts could come from alternating play.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mark_a = self.count(Cell::MarkA);
        let mark_b = self.count(Cell::MarkB);
        if mark_a.abs_diff(mark_b) > 1 {
            return Err(InvariantViolation::MarkImbalance { mark_a, mark_b });
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|ch| !ch.is_whitespace() && !matches!(ch, '|' | '/' | ','))
            .map(|ch| Cell::from_char(ch).ok_or(ParseBoardError::InvalidChar(ch)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_cells(&cells)?)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
