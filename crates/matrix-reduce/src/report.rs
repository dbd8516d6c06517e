//! Results of a parallel and a sequential run, side by side.

use core::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::reduce::{Engine, Parallel, ReductionResult, Sequential};
use crate::timing::Timing;

/// One executor's results and timings.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RunOutcome {
    pub result: ReductionResult,
    pub total_sum_time: Timing,
    pub min_row_time: Timing,
    /// Both reductions together, as one section.
    pub section_time: Timing,
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub rows: usize,
    pub cols: usize,
    pub threads: usize,
    pub parallel: RunOutcome,
    pub sequential: RunOutcome,
    /// Parallel and sequential results agree.
    pub consistent: bool,
    /// Sequential section time over parallel section time.
    pub speedup: f64,
}

impl Report {
    pub fn new(
        rows: usize,
        cols: usize,
        threads: usize,
        parallel: RunOutcome,
        sequential: RunOutcome,
    ) -> Self {
        Self {
            rows,
            cols,
            threads,
            consistent: parallel.result == sequential.result,
            speedup: parallel.section_time.speedup_over(sequential.section_time),
            parallel,
            sequential,
        }
    }

    /// Run both reductions on a `threads`-worker pool, then again as a
    /// linear scan, and collect the results.
    pub fn measure(matrix: &Matrix, threads: usize) -> Result<Self> {
        let parallel = Engine::new(Parallel::new(threads)?);
        let threads = parallel.executor().threads();

        let par = parallel.run(matrix);
        let seq = Engine::new(Sequential).run(matrix);

        let report = Self::new(matrix.rows(), matrix.cols(), threads, par, seq);
        if !report.consistent {
            log::error!(
                "parallel result {:?} differs from sequential {:?}",
                par.result,
                seq.result
            );
        }
        Ok(report)
    }
}

fn write_outcome(f: &mut fmt::Formatter<'_>, label: &str, run: &RunOutcome) -> fmt::Result {
    let result = &run.result;
    writeln!(f, "Results ({}):", label)?;
    writeln!(f, "Total sum of all elements: {}", result.total_sum)?;
    // Reported 1-based; "0" means the matrix had no rows.
    writeln!(
        f,
        "Row with minimum sum: {}",
        result.min_row.index_or_sentinel() + 1
    )?;
    writeln!(f, "Minimum row sum: {}", result.min_row.sum)?;
    writeln!(
        f,
        "Total sum time: {:.6} seconds",
        run.total_sum_time.seconds()
    )?;
    writeln!(f, "Min row time: {:.6} seconds", run.min_row_time.seconds())?;
    writeln!(
        f,
        "Total execution time ({}): {:.6} seconds",
        label,
        run.section_time.seconds()
    )
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_outcome(f, "parallel", &self.parallel)?;
        writeln!(f)?;
        write_outcome(f, "sequential", &self.sequential)?;
        writeln!(f)?;
        writeln!(
            f,
            "Threads: {}, matrix: {}x{}, speedup: {:.2}x",
            self.threads, self.rows, self.cols, self.speedup
        )?;
        if !self.consistent {
            writeln!(f, "WARNING: parallel and sequential results differ")?;
        }
        Ok(())
    }
}
