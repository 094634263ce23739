#![warn(missing_docs)]

//! # `decant`
//!
//! A solver for color sort puzzles, also sold as "water sort" or "ball sort": tubes hold stacked units of color,
//! and the goal is to pour them around until every tube is empty or full of a single color.
//! Begin by building a board using a [`BoardBuilder`](builder::BoardBuilder), or load one from a [`PuzzleFile`](config::PuzzleFile).
//! Then call [`solve()`](crate::Board::solve), consuming the board and yielding the [pours](moves::Pour) that solve it.
//! A [`Solver`](solver::Solver) does the same with a break limit, a cancellation flag and statistics across runs.
//!
//! # Internals
//! A pour moves the top run of one tube, i.e. its topmost units of a single color, onto a tube that is empty or topped with that color.
//! Only as many units as fit are moved.
//!
//! The search is a depth-first search over boards, held in a [`SearchTree`](tree::SearchTree) that only ever contains the lineage of the board being worked on.
//! Every board generates its legal moves once and ranks them with a [`Heuristic`](heuristic::Heuristic).
//! The default ranking, [`PourRank`](heuristic::PourRank), starts from how much of the poured color the recipient could still take
//! and favors pours between tubes holding a single color or pours that close a tube, penalising pours that leave part of the donor's top run behind.
//!
//! The best ranked move is applied to a copy of the board. The copy is kept if it is solved,
//! or if it has moves of its own and does not repeat any board on its lineage, compared regardless of tube order.
//! Otherwise the move is deleted; a board which runs out of moves is abandoned and the move that produced it deleted in turn.
//!
//! This alone is exhaustive and can take very long on large boards. A break limit bounds it:
//! after so many failed attempts the search returns to the root and gives up every opening pouring the color it was exploring.

pub use board::Board;
pub use builder::BoardBuilder;
pub use moves::Pour;
pub use solver::{Solution, Solver, SolverFailure};

/// Board state and move generation.
pub mod board;
/// Checked construction of boards.
pub mod builder;
/// Puzzle files and solver settings.
pub mod config;
pub mod heuristic;
/// Candidate moves and the pours reported for them.
pub mod moves;
pub mod solver;
/// Per-run counters and timings.
pub mod statistics;
/// Per-color totals of pourable units.
pub mod tally;
/// The arena of boards held by a search.
pub mod tree;
/// Fixed capacity stacks of color.
pub mod tube;
/// Entry points for JavaScript hosts.
#[cfg(feature = "wasm")]
pub mod wasm;
mod tests;
