//! The backtracking search and its host-facing driver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, info, trace};
use petgraph::stable_graph::NodeIndex;
use strum::Display;

use crate::board::Board;
use crate::config::SolverConfig;
use crate::heuristic::{Heuristic, PourRank};
use crate::moves::{Move, Pour};
use crate::statistics::{RunOutcome, RunSummary, Statistics};
use crate::tree::SearchTree;

/// Reasons a [`Solver`] may fail.
///
/// Neither is an error in the board; both are ordinary ends of a search and carry no partial solution.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SolverFailure {
    /// Every board reachable from the root, less whatever the break limit pruned, was tried without reaching a solved board.
    #[error("search exhausted without finding a solution")]
    Exhausted,
    /// The host raised the cancellation flag.
    #[error("search cancelled")]
    Cancelled,
}

/// Where a search stands. Every state but [`Searching`](Self::Searching) is final.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum SearchState {
    /// Still attempting moves.
    Searching,
    /// The current board is solved.
    Solved,
    /// No moves are left at the root.
    Exhausted,
    /// Stopped through the cancellation flag.
    Cancelled,
}

/// A successful run: the pours that solve the board, in the order to play them.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Pours from the initial board to a solved one.
    pub pours: Vec<Pour>,
    /// Wall-clock time the search took.
    pub elapsed: Duration,
    /// Counters of the run.
    pub summary: RunSummary,
}

impl Solution {
    /// Number of pours.
    pub fn len(&self) -> usize {
        self.pours.len()
    }

    /// Whether there is nothing to pour.
    pub fn is_empty(&self) -> bool {
        self.pours.is_empty()
    }

    /// Play every pour on a copy of `board`, returning the board after each one.
    ///
    /// Returns `None` if some pour is illegal on the board it is played on, i.e. this solution is not for `board`.
    pub fn replay(&self, board: &Board) -> Option<Vec<Board>> {
        let mut current = Board::from_tubes(board.tubes().to_vec());

        self.pours.iter()
            .map(|pour| {
                current.pour(pour).then(|| current.clone())
            })
            .collect()
    }
}

/// Backtracking search for a sequence of pours that solves a [`Board`].
///
/// The search always tries the highest ranked move of the board it stands on.
/// A move that produces a dead end or repeats a board on the current lineage is deleted and the next best one is tried;
/// a board left without moves is abandoned and the search climbs back to its parent.
/// With a [break limit](SolverConfig::break_limit), every that many failed attempts the search returns to the root
/// and gives up on every opening that pours the color of the current one.
///
/// One solver can run many searches; [`Self::statistics`] accumulates over all of them.
pub struct Solver<H = PourRank> {
    config: SolverConfig,
    heuristic: H,
    cancel: Arc<AtomicBool>,
    statistics: Statistics,
}

impl Solver {
    /// A solver ranking moves with [`PourRank`].
    pub fn new(config: SolverConfig) -> Self {
        Self::with_heuristic(config, PourRank)
    }
}

impl<H: Heuristic> Solver<H> {
    /// A solver ranking moves with `heuristic`.
    pub fn with_heuristic(config: SolverConfig, heuristic: H) -> Self {
        Self {
            config,
            heuristic,
            cancel: Arc::new(AtomicBool::new(false)),
            statistics: Statistics::default(),
        }
    }

    /// The settings this solver was created with.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The flag a host sets, typically from another thread, to stop a running search.
    ///
    /// The flag is checked before every attempted move. It is never cleared by the solver;
    /// while it is set every run ends as [`SolverFailure::Cancelled`].
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Timings and outcomes of every run so far.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Search for a solution of `board`, returning the pours that solve it or why none was found.
    ///
    /// A board that has no legal move to begin with, solved or not, ends the search as [`SolverFailure::Exhausted`] at once.
    pub fn solve(&mut self, board: Board) -> Result<Solution, SolverFailure> {
        let started = Instant::now();
        let mut search = Search::new(board, &self.heuristic, self.config.break_limit.map(|limit| limit.get()));

        while search.state == SearchState::Searching {
            if self.cancel.load(Ordering::Relaxed) {
                search.state = SearchState::Cancelled;
                break;
            }
            search.step();
        }

        let elapsed = started.elapsed();
        let summary = search.summary;
        let (outcome, result) = match search.state {
            SearchState::Solved => (RunOutcome::Solved, Ok(Solution { pours: search.pours(), elapsed, summary })),
            SearchState::Cancelled => (RunOutcome::Cancelled, Err(SolverFailure::Cancelled)),
            SearchState::Exhausted | SearchState::Searching => (RunOutcome::Exhausted, Err(SolverFailure::Exhausted)),
        };

        info!("search {} after {:?}: {} expanded, {} failed, {} restarts",
            search.state, elapsed, summary.expanded, summary.failed_attempts, summary.restarts);
        self.statistics.record(outcome, elapsed, summary);

        result
    }
}

/// One run of the search, advanced an attempted move at a time.
pub(crate) struct Search<'h, H: ?Sized> {
    tree: SearchTree,
    board: NodeIndex,
    heuristic: &'h H,
    break_limit: Option<u32>,
    failed_since_restart: u32,
    pub(crate) state: SearchState,
    pub(crate) summary: RunSummary,
}

impl<'h, H: Heuristic + ?Sized> Search<'h, H> {
    pub(crate) fn new(mut root: Board, heuristic: &'h H, break_limit: Option<u32>) -> Self {
        let state = match root.generate_moves(heuristic) {
            0 => SearchState::Exhausted,
            _ => SearchState::Searching,
        };
        let tree = SearchTree::new(root);

        Self {
            board: tree.root(),
            tree,
            heuristic,
            break_limit,
            failed_since_restart: 0,
            state,
            summary: RunSummary::default(),
        }
    }

    /// Attempt the current move of the current board, then either advance, backtrack, or restart.
    pub(crate) fn step(&mut self) -> SearchState {
        if self.state != SearchState::Searching {
            return self.state;
        }

        let Some(mv) = self.tree.board(self.board).current_move().copied() else {
            self.state = SearchState::Exhausted;
            return self.state;
        };

        match mv.apply(&self.tree, self.board, self.heuristic) {
            Ok(after) => {
                self.summary.expanded += 1;
                self.board = self.tree.attach(self.board, mv, after);
                if self.tree.board(self.board).is_solved() {
                    self.state = SearchState::Solved;
                }
            }
            Err(rejection) => {
                trace!("{} rejected at depth {}: {}", mv.pour(), self.depth(), rejection);
                self.summary.failed_attempts += 1;
                self.failed_since_restart += 1;

                match self.break_limit {
                    Some(limit) if self.failed_since_restart >= limit => self.restart(),
                    _ => self.backtrack(mv),
                }
            }
        }

        self.state
    }

    /// Delete `failed` from the current board, then climb while the board is left without moves.
    fn backtrack(&mut self, failed: Move) {
        self.tree.board_mut(self.board).delete_move(&failed);

        while self.tree.board(self.board).current_move().is_none() {
            let Some((parent, via)) = self.tree.detach(self.board) else {
                self.state = SearchState::Exhausted;
                return;
            };

            self.summary.backtracks += 1;
            self.board = parent;
            self.tree.board_mut(parent).delete_move(&via);
        }
    }

    /// Go back to the root and drop every opening pouring the color of the current best one.
    fn restart(&mut self) {
        self.failed_since_restart = 0;
        self.summary.restarts += 1;

        self.tree.prune_to_root();
        self.board = self.tree.root();

        let root = self.tree.board_mut(self.board);
        if let Some(color) = root.current_move().map(|mv| mv.color) {
            let dropped = root.drop_color(color);
            debug!("restart {}: dropped {} openings pouring color {}, {} left",
                self.summary.restarts, dropped, color, root.moves().len());
        }

        if root.current_move().is_none() {
            self.state = SearchState::Exhausted;
        }
    }

    /// Pours from the root to the current board.
    pub(crate) fn pours(&self) -> Vec<Pour> {
        self.tree.path_to(self.board).iter().map(Move::pour).collect_vec()
    }

    pub(crate) fn depth(&self) -> usize {
        self.tree.len() - 1
    }
}
