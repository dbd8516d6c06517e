//! Parallel and sequential reductions over a randomly generated integer matrix.
//!
//! Two reductions are computed over the same read-only [`Matrix`]: the sum of
//! all elements, and the row with the smallest row-sum. Each one runs through
//! a [`reduce::Executor`], either a linear scan or a row-blocked parallel
//! pass on a fixed-size worker pool, and every run is wrapped by the
//! [`timing`] harness so the two strategies can be compared.

pub mod error;
pub mod matrix;
pub mod reduce;
pub mod report;
pub mod timing;

pub use error::{Error, Result};
pub use matrix::{Matrix, ELEMENT_RANGE};
pub use reduce::{
    Engine, Executor, MinRow, MinRowSum, Parallel, Reduction, ReductionResult, Sequential,
    TotalSum,
};
pub use report::{Report, RunOutcome};
pub use timing::{timed, Timed, Timing};
