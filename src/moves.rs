use std::fmt::{Display, Formatter};

use petgraph::stable_graph::NodeIndex;
use strum::Display as StrumDisplay;

use crate::board::Board;
use crate::heuristic::{Heuristic, Rank};
use crate::tree::SearchTree;
use crate::tube::ColorID;

/// One pour as reported to the host: `count` units of `color` from tube `from` into tube `to`.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Pour {
    /// Index of the donor tube.
    pub from: usize,
    /// Index of the recipient tube.
    pub to: usize,
    /// Units moved.
    pub count: usize,
    /// Color moved.
    pub color: ColorID,
}

impl Display for Pour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({}x{})", self.from, self.to, self.count, self.color)
    }
}

/// A candidate pour generated by a [`Board`], with the rank it was given at generation time.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Move {
    /// Index of the donor tube.
    pub from: usize,
    /// Index of the recipient tube.
    pub to: usize,
    /// Color of the donor's top run.
    pub color: ColorID,
    /// Units this move transfers.
    pub count: usize,
    /// Heuristic score; the highest ranked move of a board is tried first.
    pub rank: Rank,
}

/// Why an applied move did not produce a useful successor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum Rejection {
    /// Nothing could be transferred.
    NothingMoved,
    /// The successor is unsolved and has no moves of its own.
    DeadEnd,
    /// The successor repeats a board on its own lineage, `depth` steps above it (0 is the board the move came from).
    Repeats {
        /// Steps from the board the move came from up to the repeated one.
        depth: usize,
    },
}

impl Move {
    /// The host-facing record of this move.
    pub fn pour(&self) -> Pour {
        Pour {
            from: self.from,
            to: self.to,
            count: self.count,
            color: self.color,
        }
    }

    /// Apply this move to the board at `before` and judge whether the successor is progress.
    ///
    /// The successor is accepted if it is solved outright, or if it has moves of its own and does not repeat any board on the lineage from `before` back to the root.
    /// Moves of an accepted, unsolved successor are already generated with `heuristic`.
    /// `before` itself is never modified; attaching the successor to the tree is up to the caller.
    ///
    /// # Panics
    /// If the transfer moves fewer units than [`Self::count`], which means the move was not generated for this board.
    pub fn apply<H: Heuristic + ?Sized>(&self, tree: &SearchTree, before: NodeIndex, heuristic: &H) -> Result<Board, Rejection> {
        let mut after = Board::from_tubes(tree.board(before).tubes().to_vec());

        let moved = after.transfer(self.from, self.to, self.count);
        assert_eq!(moved, self.count, "move {:?} does not fit the board it was generated from", self);
        if moved == 0 {
            return Err(Rejection::NothingMoved);
        }

        if after.is_solved() {
            return Ok(after);
        }

        if after.generate_moves(heuristic) == 0 {
            return Err(Rejection::DeadEnd);
        }

        if let Some(depth) = tree.lineage(before).position(|ancestor| tree.board(ancestor).same_state(&after)) {
            return Err(Rejection::Repeats { depth });
        }

        Ok(after)
    }
}
