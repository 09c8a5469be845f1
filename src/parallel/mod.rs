pub mod batch;
pub mod pool;

pub use batch::{batch_ranges, run_estimate_batches};
pub use pool::WorkerPool;
