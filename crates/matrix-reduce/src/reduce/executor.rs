//! Work distribution strategies.

use rayon::{ThreadPool, ThreadPoolBuilder};
use spin::Mutex;

use super::{partition_rows, reduce_rows, Reduction};
use crate::error::Result;
use crate::matrix::Matrix;

/// Drives a [`Reduction`] over a matrix.
pub trait Executor: Sync {
    fn name(&self) -> &'static str;

    fn reduce<R: Reduction>(&self, matrix: &Matrix, reduction: &R) -> R::Output;

    /// Run two independent computations, concurrently where the executor
    /// supports it.
    fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send;
}

/// Plain linear scan on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequential;

impl Executor for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn reduce<R: Reduction>(&self, matrix: &Matrix, reduction: &R) -> R::Output {
        reduce_rows(reduction, matrix, 0..matrix.rows())
    }

    fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        (a(), b())
    }
}

/// Row-blocked reduction on a fixed-size worker pool.
///
/// Rows are split into at most `threads` contiguous blocks. Each block is
/// folded on a pool worker, and its partial is merged exactly once into a
/// shared accumulator under a lock. Lock traffic is one acquisition per
/// block, never per row.
///
/// The lock is a spin lock and the critical section is a single `merge`.
/// With more workers than cores, a holder preempted inside that section
/// leaves the others spinning until it is rescheduled, which inflates the
/// measured time but never changes the result.
pub struct Parallel {
    pool: ThreadPool,
    threads: usize,
}

impl Parallel {
    /// Start a pool with `threads` workers. Zero is clamped to one.
    pub fn new(threads: usize) -> Result<Self> {
        let threads = threads.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("row-reduce-{}", i))
            .build()?;
        log::debug!("[parallel] pool started with {} workers", threads);
        Ok(Self { pool, threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Executor for Parallel {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn reduce<R: Reduction>(&self, matrix: &Matrix, reduction: &R) -> R::Output {
        let blocks = partition_rows(matrix.rows(), self.threads);
        log::trace!("[parallel] {} rows in {} blocks", matrix.rows(), blocks.len());

        let acc = Mutex::new(reduction.identity());
        self.pool.scope(|s| {
            for block in blocks {
                let acc = &acc;
                s.spawn(move |_| {
                    let partial = reduce_rows(reduction, matrix, block);
                    let mut guard = acc.lock();
                    let current = core::mem::replace(&mut *guard, reduction.identity());
                    *guard = reduction.merge(current, partial);
                });
            }
        });
        acc.into_inner()
    }

    fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        self.pool.install(|| rayon::join(a, b))
    }
}
