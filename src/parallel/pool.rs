//! Rayon thread pool sizing for estimate workloads.

use rayon::ThreadPoolBuilder;
use thiserror::Error;

use crate::combat::ValidationError;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to build worker pool: {0}")]
    Build(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// How many worker threads a parallel estimate uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// 0 means the global Rayon pool (one thread per core).
    pub workers: usize,
}

impl WorkerPool {
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Runs `f` on a pool of this size. A zero worker count runs on the global pool.
    pub fn install<F, R>(&self, f: F) -> Result<R, PoolError>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return Ok(f());
        }
        let pool = ThreadPoolBuilder::new().num_threads(self.workers).build()?;
        Ok(pool.install(f))
    }
}
