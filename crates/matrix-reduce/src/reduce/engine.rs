use super::{Executor, MinRow, MinRowSum, ReductionResult, TotalSum};
use crate::matrix::Matrix;
use crate::report::RunOutcome;
use crate::timing::timed;

/// Runs both reductions through one executor.
pub struct Engine<E> {
    executor: E,
}

impl<E: Executor> Engine<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn total_sum(&self, matrix: &Matrix) -> i64 {
        self.executor.reduce(matrix, &TotalSum)
    }

    pub fn min_row(&self, matrix: &Matrix) -> MinRow {
        self.executor.reduce(matrix, &MinRowSum)
    }

    /// Both reductions, untimed.
    pub fn reduce(&self, matrix: &Matrix) -> ReductionResult {
        let (total_sum, min_row) = self
            .executor
            .join(|| self.total_sum(matrix), || self.min_row(matrix));
        ReductionResult { total_sum, min_row }
    }

    /// Both reductions, each timed on its own and together as one section.
    ///
    /// The two families share nothing but the read-only matrix, so the
    /// executor may run them concurrently.
    pub fn run(&self, matrix: &Matrix) -> RunOutcome {
        let section = timed(|| {
            self.executor.join(
                || timed(|| self.total_sum(matrix)),
                || timed(|| self.min_row(matrix)),
            )
        });
        let (sum, min_row) = section.value;

        log::debug!(
            "[{}] section {:.6}s (sum {:.6}s, min-row {:.6}s)",
            self.executor.name(),
            section.timing.seconds(),
            sum.timing.seconds(),
            min_row.timing.seconds(),
        );

        RunOutcome {
            result: ReductionResult {
                total_sum: sum.value,
                min_row: min_row.value,
            },
            total_sum_time: sum.timing,
            min_row_time: min_row.timing,
            section_time: section.timing,
        }
    }
}
