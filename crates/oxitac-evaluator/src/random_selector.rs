use oxitac_engine::{Board, InvariantViolation, Mark, MoveSelector, Selection};
use rand::{SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;

/// Picks a uniformly random empty cell.
///
/// Stands in for an imperfect human when simulating games. The same seed
/// always yields the same sequence of choices.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: Pcg32,
}

impl RandomSelector {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl MoveSelector for RandomSelector {
    fn select_move(&mut self, board: &Board, _mover: Mark) -> Result<Selection, InvariantViolation> {
        board.validate()?;
        if board.outcome().is_some() {
            return Ok(Selection::new(None, None));
        }
        let index = board.empty_cells().choose(&mut self.rng).copied();
        Ok(Selection::new(index, None))
    }
}
