use std::time::Duration;

/// Counters from a single run of the solver.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    /// Successor boards accepted into the search tree.
    pub expanded: u64,
    /// Moves whose successor was rejected.
    pub failed_attempts: u64,
    /// Boards abandoned after running out of moves.
    pub backtracks: u64,
    /// Restarts from the root forced by the break limit.
    pub restarts: u32,
}

/// Timings and outcomes across every run of one [`Solver`](crate::solver::Solver), for display by the host.
#[derive(Clone, Debug, Default)]
pub struct Statistics {
    /// Runs started.
    pub runs: u32,
    /// Runs that found a solution.
    pub solved: u32,
    /// Runs that ran out of boards to try.
    pub exhausted: u32,
    /// Runs stopped by the host.
    pub cancelled: u32,
    /// Duration of the latest run, whatever its outcome.
    pub last: Duration,
    /// Longest run so far, whatever its outcome.
    pub max: Duration,
    /// Counters of the latest run.
    pub last_run: RunSummary,
    solved_total: Duration,
}

/// How a run ended, as far as statistics go.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum RunOutcome {
    Solved,
    Exhausted,
    Cancelled,
}

impl Statistics {
    pub(crate) fn record(&mut self, outcome: RunOutcome, elapsed: Duration, summary: RunSummary) {
        self.runs += 1;
        self.last = elapsed;
        self.max = self.max.max(elapsed);
        self.last_run = summary;

        match outcome {
            RunOutcome::Solved => {
                self.solved += 1;
                self.solved_total += elapsed;
            }
            RunOutcome::Exhausted => self.exhausted += 1,
            RunOutcome::Cancelled => self.cancelled += 1,
        }
    }

    /// Mean duration of the runs that found a solution; zero before the first one.
    pub fn average(&self) -> Duration {
        match self.solved {
            0 => Duration::ZERO,
            solved => self.solved_total / solved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_counts_only_solved_runs() {
        let mut statistics = Statistics::default();
        assert_eq!(statistics.average(), Duration::ZERO);

        statistics.record(RunOutcome::Solved, Duration::from_millis(30), RunSummary::default());
        statistics.record(RunOutcome::Exhausted, Duration::from_millis(500), RunSummary::default());
        statistics.record(RunOutcome::Solved, Duration::from_millis(10), RunSummary { restarts: 2, ..Default::default() });

        assert_eq!(statistics.runs, 3);
        assert_eq!((statistics.solved, statistics.exhausted, statistics.cancelled), (2, 1, 0));
        assert_eq!(statistics.average(), Duration::from_millis(20));
        assert_eq!(statistics.last, Duration::from_millis(10));
        assert_eq!(statistics.max, Duration::from_millis(500));
        assert_eq!(statistics.last_run.restarts, 2);
    }
}
