//! Move ranking strategies.
//!
//! A [`Heuristic`] scores every candidate pour while a [`Board`](crate::Board) generates its moves.
//! Candidates are tried highest rank first, so the heuristic alone decides the order in which the solver explores the tree;
//! it never changes which moves are legal.

use crate::tally::ColorTally;
use crate::tube::{Tube, CAPACITY};

/// Desirability of a candidate move. Higher is tried first.
pub type Rank = i32;

/// A ranking strategy for candidate pours.
pub trait Heuristic {
    /// Rank pouring `count` units from `tubes[donor]` into `tubes[recipient]`.
    ///
    /// `tubes` is the board before the pour and `tally` was built from it.
    fn rank(&self, tubes: &[Tube], tally: &ColorTally, donor: usize, recipient: usize, count: usize) -> Rank;
}

/// The default hand-tuned ranking.
///
/// Starts from how much of the donor's color the recipient could still take, then
/// - rewards merging into a recipient that is a single run all the way down,
/// - rewards draining a donor that is a single run all the way down,
/// - penalises pours that leave part of the donor's top run behind,
/// - rewards pours that complete a closed tube, preferring those that move fewer units.
#[derive(Copy, Clone, Debug, Default)]
pub struct PourRank;

impl Heuristic for PourRank {
    fn rank(&self, tubes: &[Tube], tally: &ColorTally, donor: usize, recipient: usize, count: usize) -> Rank {
        let (donor, recipient) = (&tubes[donor], &tubes[recipient]);
        let Some(color) = donor.top_color() else {
            return Rank::MIN;
        };
        let donor_run = donor.top_run_length();
        let recipient_run = recipient.top_run_length();

        let mut rank = recipient.room().min(tally.get(color)) as Rank;
        if recipient.is_uniform() {
            rank += 3;
        }
        if donor.is_uniform() {
            rank += 2;
        }
        if donor_run > recipient.room() {
            rank -= 4;
        }
        if donor_run + recipient_run == CAPACITY {
            rank += (CAPACITY - count) as Rank;
        }

        rank
    }
}

/// Ranks every candidate equally, leaving moves in generation order.
///
/// Useful as a baseline when comparing strategies.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unranked;

impl Heuristic for Unranked {
    fn rank(&self, _tubes: &[Tube], _tally: &ColorTally, _donor: usize, _recipient: usize, _count: usize) -> Rank {
        0
    }
}
