#[cfg(test)]
mod tests {
    use std::num::NonZero;
    use std::sync::atomic::Ordering;

    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use crate::builder::{BoardBuilder, BuilderInvalidReason};
    use crate::config::{PuzzleFile, SolverConfig};
    use crate::moves::Pour;
    use crate::solver::{Solver, SolverFailure};
    use crate::tube::ColorID;

    fn pour(from: usize, to: usize, count: usize, color: ColorID) -> Pour {
        Pour { from, to, count, color }
    }

    #[test]
    fn solve_two_pours() {
        let board = BoardBuilder::new()
            .add_tube(&[1, 1, 1, 2])
            .add_tube(&[2, 2, 2])
            .add_tube(&[1])
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), "2..
12.
12.
121
");

        let solution = board.clone().solve().unwrap();
        assert_eq!(solution.pours, vec![pour(0, 1, 1, 2), pour(2, 0, 1, 1)]);
        assert_eq!(solution.pours.iter().join(", "), "0 -> 1 (1x2), 2 -> 0 (1x1)");

        let replayed = solution.replay(&board).unwrap();
        assert_eq!(format!("{}", replayed.last().unwrap()), "12.
12.
12.
12.
");
    }

    #[test]
    fn solve_three_colors() {
        let board = BoardBuilder::new()
            .add_tube(&[1, 2, 3, 1])
            .add_tube(&[2, 3, 1, 2])
            .add_tube(&[3, 1, 2, 3])
            .add_empty_tubes(2)
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), "123..
312..
231..
123..
");

        let mut solver = Solver::new(SolverConfig::default());
        let solution = solver.solve(board.clone()).unwrap();
        assert_eq!(solution.len(), 12);
        assert_eq!(solution.pours[0], pour(2, 3, 1, 3));
        assert_eq!(solution.pours[11], pour(4, 0, 3, 1));
        assert_eq!(solution.summary.failed_attempts, 6);
        assert_eq!(solution.summary.restarts, 0);

        let replayed = solution.replay(&board).unwrap();
        assert_eq!(format!("{}", replayed[0]), "12...
312..
231..
1233.
");
        assert!(replayed.last().unwrap().is_solved());
        assert_eq!(format!("{}", replayed.last().unwrap()), "123..
123..
123..
123..
");
    }

    #[test]
    fn break_limit_restarts_from_the_root() {
        let board = BoardBuilder::new()
            .add_tube(&[1, 2, 3, 4])
            .add_tube(&[4, 3, 2, 1])
            .add_tube(&[2, 4, 1, 3])
            .add_tube(&[3, 1, 4, 2])
            .add_empty_tubes(2)
            .build()
            .unwrap();

        let mut solver = Solver::new(SolverConfig { break_limit: NonZero::new(3) });
        let solution = solver.solve(board.clone()).unwrap();
        assert_eq!(solution.len(), 14);
        assert_eq!(solution.summary.restarts, 2);
        assert_eq!(solution.summary.failed_attempts, 7);
        assert_eq!(format!("{}", solution.replay(&board).unwrap().last().unwrap()), "1423..
1423..
1423..
1423..
");

        // without the limit the first opening is kept
        let exhaustive = board.solve().unwrap();
        assert_eq!(exhaustive.len(), 15);
        assert_eq!(exhaustive.pours[0], pour(3, 4, 1, 2));
        assert_eq!(exhaustive.summary.restarts, 0);
    }

    #[test]
    fn break_limit_of_one_runs_out_of_colors() {
        let board = BoardBuilder::new()
            .add_tube(&[1, 2, 3, 1])
            .add_tube(&[2, 3, 1, 2])
            .add_tube(&[3, 1, 2, 3])
            .add_empty_tubes(2)
            .build()
            .unwrap();

        let mut root = board.clone();
        root.generate_moves(&crate::heuristic::PourRank);
        let opening_colors = root.moves().iter().map(|mv| mv.color).unique().count();

        let mut solver = Solver::new(SolverConfig { break_limit: NonZero::new(1) });
        assert_eq!(solver.solve(board).unwrap_err(), SolverFailure::Exhausted);
        assert_eq!(solver.statistics().last_run.restarts as usize, opening_colors);
        assert_eq!(opening_colors, 3);
    }

    #[test]
    fn break_limit_of_one_keeps_the_last_color() {
        let board = BoardBuilder::new()
            .add_tube(&[1, 3, 3, 3])
            .add_tube(&[2, 2, 3, 1])
            .add_tube(&[2, 1, 1, 2])
            .add_empty_tubes(2)
            .build()
            .unwrap();

        let mut solver = Solver::new(SolverConfig { break_limit: NonZero::new(1) });
        let solution = solver.solve(board.clone()).unwrap();

        // openings pouring 3 and then 2 are given up, the one pouring 1 succeeds
        assert_eq!(solution.summary.restarts, 2);
        assert_eq!(solution.summary.failed_attempts, 2);
        assert_eq!(solution.pours[0], pour(1, 3, 1, 1));
        assert_eq!(solution.len(), 7);
        assert_eq!(format!("{}", solution.replay(&board).unwrap().last().unwrap()), "12..3
12..3
12..3
12..3
");
    }

    #[test]
    fn closed_tube_has_nothing_to_do() {
        let board = BoardBuilder::new().add_tube(&[5, 5, 5, 5]).add_empty_tubes(1).build().unwrap();
        assert!(board.is_solved());
        assert_eq!(board.solve().unwrap_err(), SolverFailure::Exhausted);
    }

    #[test]
    fn incompatible_tubes_are_exhausted() {
        let board = BoardBuilder::new().add_tube(&[1, 2, 1, 2]).add_tube(&[2, 1, 2, 1]).build().unwrap();
        assert_eq!(board.solve().unwrap_err(), SolverFailure::Exhausted);
        assert_eq!(SolverFailure::Exhausted.to_string(), "search exhausted without finding a solution");
    }

    #[test]
    fn cancellation_belongs_to_the_host() {
        let board = BoardBuilder::new()
            .add_tube(&[1, 2, 1, 2])
            .add_tube(&[2, 1, 2, 1])
            .add_empty_tubes(2)
            .build()
            .unwrap();

        let mut solver = Solver::new(SolverConfig::default());
        let cancel = solver.cancel_flag();

        cancel.store(true, Ordering::Relaxed);
        assert_eq!(solver.solve(board.clone()).unwrap_err(), SolverFailure::Cancelled);
        assert_eq!(solver.solve(board.clone()).unwrap_err(), SolverFailure::Cancelled);

        cancel.store(false, Ordering::Relaxed);
        assert_eq!(solver.solve(board).unwrap().len(), 8);

        let statistics = solver.statistics();
        assert_eq!((statistics.runs, statistics.solved, statistics.cancelled, statistics.exhausted), (3, 1, 2, 0));
        assert_eq!(statistics.average(), statistics.last);
        assert!(statistics.max >= statistics.last);
    }

    #[test]
    fn puzzle_file_to_solution() {
        let puzzle = PuzzleFile::parse("
            tubes = [[1, 1, 1, 2], [2, 2, 2], [1]]
        ").unwrap();

        let mut solver = Solver::new(puzzle.solver);
        let solution = solver.solve(puzzle.board().unwrap()).unwrap();
        assert_eq!(solution.len(), 2);
    }

    #[test]
    fn builder_rejects_before_search() {
        let mut builder = BoardBuilder::new();
        builder.add_tube(&[1, 2, 3, 4, 1]);
        assert_eq!(builder.build().unwrap_err(), &vec![BuilderInvalidReason::TubeOverCapacity { tube: 0, len: 5 }]);
    }

    #[test]
    fn random_puzzles_replay_to_solved() {
        let mut rng = StdRng::seed_from_u64(0xdeca);

        for colors in 2..=5u8 {
            let mut units = (1..=colors).flat_map(|color| [color; 4]).collect_vec();
            units.shuffle(&mut rng);

            let mut builder = BoardBuilder::new();
            units.chunks(4).for_each(|tube| { builder.add_tube(tube); });
            let board = builder.add_empty_tubes(2).build().unwrap();

            let mut solver = Solver::new(SolverConfig { break_limit: NonZero::new(500) });
            let solution = solver.solve(board.clone()).unwrap();
            let replayed = solution.replay(&board).unwrap();
            assert_eq!(replayed.len(), solution.len());
            assert!(replayed.last().unwrap().is_solved());
        }
    }
}
