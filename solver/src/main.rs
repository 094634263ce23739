use std::num::NonZero;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use decant::config::PuzzleFile;
use decant::{Solver, SolverFailure};

/// Solve a color sort puzzle.
#[derive(Parser)]
#[command(name = "solver", about = "Solve a color sort puzzle")]
struct Cli {
    /// Path to a TOML puzzle file
    #[arg(long, default_value = "puzzles/three_colors.toml")]
    puzzle: PathBuf,

    /// Override the number of failed attempts before restarting from the root
    #[arg(long)]
    break_limit: Option<NonZero<u32>>,

    /// Cancel the search after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print only the pours, not the board after each one
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut puzzle = PuzzleFile::load(&cli.puzzle)
        .with_context(|| format!("loading puzzle from {}", cli.puzzle.display()))?;
    if let Some(break_limit) = cli.break_limit {
        puzzle.solver.break_limit = Some(break_limit);
    }

    let board = puzzle.board()
        .with_context(|| format!("building the board of {}", cli.puzzle.display()))?;
    println!("{}", board);

    let mut solver = Solver::new(puzzle.solver);
    let cancel = solver.cancel_flag();

    let (tx, rx) = mpsc::channel();
    let initial = board.clone();
    let worker = thread::spawn(move || {
        let result = solver.solve(initial);
        // main may have stopped listening after a timeout; the result is still joined below
        let _ = tx.send(());
        (result, solver)
    });

    if let Some(seconds) = cli.timeout {
        if rx.recv_timeout(Duration::from_secs(seconds)).is_err() {
            log::warn!("no solution after {seconds}s, cancelling");
            cancel.store(true, Ordering::Relaxed);
        }
    }

    let (result, solver) = worker.join()
        .map_err(|_| anyhow::anyhow!("solver thread panicked"))?;
    let statistics = solver.statistics();

    match result {
        Ok(solution) => {
            let boards = solution.replay(&board)
                .context("solution does not replay on the puzzle")?;

            for (step, (pour, after)) in solution.pours.iter().zip(boards).enumerate() {
                println!("{}: {}", step + 1, pour);
                if !cli.quiet {
                    println!("{}", after);
                }
            }

            println!("solved in {} pours, {:?}", solution.len(), solution.elapsed);
            log::info!("{} boards expanded, {} failed attempts, {} backtracks, {} restarts",
                solution.summary.expanded, solution.summary.failed_attempts,
                solution.summary.backtracks, solution.summary.restarts);
        }
        Err(SolverFailure::Cancelled) => println!("cancelled after {:?}", statistics.last),
        Err(SolverFailure::Exhausted) => println!("no solution found after {:?}", statistics.last),
    }

    Ok(())
}
