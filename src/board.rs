use std::fmt::{Display, Formatter};
use std::hash::Hasher;

use itertools::Itertools;
use ndarray::Array2;
use rustc_hash::FxHasher;

use crate::config::SolverConfig;
use crate::heuristic::Heuristic;
use crate::moves::{Move, Pour};
use crate::solver::{Solution, Solver, SolverFailure};
use crate::tally::ColorTally;
use crate::tube::{ColorID, Tube, TubeState, CAPACITY};

/// One configuration of every tube.
///
/// Boards should be built using a [`BoardBuilder`](crate::builder::BoardBuilder), which rejects malformed input.
/// Once its moves are generated a board never changes again, except for moves being deleted from its move list.
#[derive(Clone, Debug)]
pub struct Board {
    tubes: Vec<Tube>,
    // rank ascending; the last one is tried next
    moves: Option<Vec<Move>>,
    fingerprint: Option<u64>,
}

impl Board {
    /// A board holding `tubes` in the given order, with no moves generated yet.
    pub fn from_tubes(tubes: Vec<Tube>) -> Self {
        Self {
            tubes,
            moves: None,
            fingerprint: None,
        }
    }

    /// All tubes, in order.
    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    /// # Panics
    /// If `index` is out of bounds.
    pub fn tube(&self, index: usize) -> &Tube {
        &self.tubes[index]
    }

    /// The remaining candidate moves, lowest rank first. Empty until [`Self::generate_moves`] has run.
    pub fn moves(&self) -> &[Move] {
        self.moves.as_deref().unwrap_or_default()
    }

    /// The highest ranked remaining move, i.e. the one the solver tries next.
    pub fn current_move(&self) -> Option<&Move> {
        self.moves().last()
    }

    /// Whether every tube is empty or closed.
    pub fn is_solved(&self) -> bool {
        self.tubes.iter().all(|tube| matches!(tube.state(), TubeState::Empty | TubeState::Closed))
    }

    /// Generate and rank every legal move from this board, returning how many there are.
    ///
    /// A donor is any [`Regular`](TubeState::Regular) or [`Filled`](TubeState::Filled) tube,
    /// a recipient any other tube that [accepts](Tube::can_accept) the donor's top color.
    /// Empty tubes are interchangeable, so only the first one on the board is ever a recipient.
    /// A move takes as much of the donor's top run as the recipient has room for.
    ///
    /// Moves are computed once; later calls return the number of moves still in the list.
    pub fn generate_moves<H: Heuristic + ?Sized>(&mut self, heuristic: &H) -> usize {
        if let Some(moves) = &self.moves {
            return moves.len();
        }

        self.fingerprint = Some(self.compute_fingerprint());

        let tally = ColorTally::from_tubes(&self.tubes);
        let first_empty = self.tubes.iter().position(Tube::is_empty);
        let tubes = &self.tubes;

        let mut moves = (0..tubes.len()).cartesian_product(0..tubes.len())
            .filter(|(donor, recipient)| donor != recipient)
            .filter_map(|(donor, recipient)| {
                let (from, to) = (&tubes[donor], &tubes[recipient]);
                if !matches!(from.state(), TubeState::Regular | TubeState::Filled) {
                    return None;
                }

                let color = from.top_color()?;
                if !to.can_accept(color) || (to.is_empty() && first_empty != Some(recipient)) {
                    return None;
                }

                let count = to.room().min(from.top_run_length());
                Some(Move {
                    from: donor,
                    to: recipient,
                    color,
                    count,
                    rank: heuristic.rank(tubes, &tally, donor, recipient, count),
                })
            })
            .collect_vec();

        // stable, so among equal ranks the last generated wins
        moves.sort_by_key(|mv| mv.rank);

        let count = moves.len();
        self.moves = Some(moves);
        count
    }

    /// Remove `mv` from the move list so it is never tried again. Returns whether it was present.
    pub fn delete_move(&mut self, mv: &Move) -> bool {
        let Some(moves) = self.moves.as_mut() else {
            return false;
        };

        match moves.iter().rposition(|candidate| candidate == mv) {
            Some(index) => {
                moves.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every move pouring `color`, returning how many were removed.
    pub(crate) fn drop_color(&mut self, color: ColorID) -> usize {
        let Some(moves) = self.moves.as_mut() else {
            return 0;
        };

        let before = moves.len();
        moves.retain(|mv| mv.color != color);
        before - moves.len()
    }

    /// Order-independent digest of the tube contents.
    ///
    /// Two boards holding the same tubes in any order share a fingerprint.
    /// Distinct contents colliding is possible, if unlikely; use [`Self::same_state`] for an exact answer.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint.unwrap_or_else(|| self.compute_fingerprint())
    }

    /// Whether both boards hold the same tubes, in any order.
    pub fn same_state(&self, other: &Board) -> bool {
        self.tubes.len() == other.tubes.len()
            && self.fingerprint() == other.fingerprint()
            && self.signature() == other.signature()
    }

    fn signature(&self) -> Vec<u32> {
        self.tubes.iter().map(Tube::packed).sorted_unstable().collect_vec()
    }

    fn compute_fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.signature().into_iter().for_each(|packed| hasher.write_u32(packed));
        hasher.finish()
    }

    /// Move up to `count` units from the top of one tube to another without checking colors.
    /// Invalidates generated moves and the cached fingerprint.
    pub(crate) fn transfer(&mut self, from: usize, to: usize, count: usize) -> usize {
        self.moves = None;
        self.fingerprint = None;

        let mut moved = 0;
        while moved < count {
            let Some(color) = self.tubes[from].pop() else {
                break;
            };
            if !self.tubes[to].push(color) {
                self.tubes[from].push(color);
                break;
            }
            moved += 1;
        }

        moved
    }

    /// Replay a reported pour, checking it is legal first.
    ///
    /// Returns `false` and leaves the board alone if the tubes don't exist, the donor's top run is not `pour.count` units of `pour.color` or more,
    /// or the recipient cannot take them.
    pub fn pour(&mut self, pour: &Pour) -> bool {
        let (Some(from), Some(to)) = (self.tubes.get(pour.from), self.tubes.get(pour.to)) else {
            return false;
        };

        let legal = pour.from != pour.to
            && pour.count > 0
            && from.top_color() == Some(pour.color)
            && from.top_run_length() >= pour.count
            && to.can_accept(pour.color)
            && to.room() >= pour.count;
        if !legal {
            return false;
        }

        self.transfer(pour.from, pour.to, pour.count) == pour.count
    }

    /// Solve this board with a default [`Solver`], returning the pours that solve it.
    ///
    /// Use a [`Solver`] directly to set a break limit, cancel from another thread, or keep statistics across runs.
    pub fn solve(self) -> Result<Solution, SolverFailure> {
        Solver::new(SolverConfig::default()).solve(self)
    }
}

fn display_color(color: ColorID) -> char {
    match color {
        0 => '.',
        color => char::from_digit(color as u32, 36).unwrap_or('#'),
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // one column per tube, top level in the first row
        let grid = Array2::from_shape_fn((CAPACITY, self.tubes.len()), |(row, column)| {
            let level = CAPACITY - 1 - row;
            display_color(self.tubes[column].colors().get(level).copied().unwrap_or(0))
        });

        for row in grid.rows() {
            writeln!(f, "{}", row.iter().collect::<String>())?;
        }

        Ok(())
    }
}
