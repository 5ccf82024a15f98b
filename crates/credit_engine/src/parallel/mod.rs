//! Rayon-based parallelisation utilities.
//!
//! Scenario losses live in one preallocated buffer. Parallel execution
//! splits it into fixed-size batches; each batch is written by exactly
//! one task and receives its own pre-drawn seed, so the output never
//! depends on how Rayon schedules the batches.

use rayon::prelude::*;

/// Default number of scenarios per parallel batch.
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Number of batches needed to cover `len` items.
///
/// A zero batch size is treated as one.
#[inline]
pub fn batch_count(len: usize, batch_size: usize) -> usize {
    len.div_ceil(batch_size.max(1))
}

/// Processes disjoint mutable batches of `buffer` in parallel.
///
/// `processor` receives the batch index, the index of the batch's first
/// element within `buffer`, and the batch itself. Batches are
/// `batch_size` long except possibly the last.
pub fn process_batches_mut<T, F>(buffer: &mut [T], batch_size: usize, processor: F)
where
    T: Send,
    F: Fn(usize, usize, &mut [T]) + Sync + Send,
{
    let batch_size = batch_size.max(1);
    buffer
        .par_chunks_mut(batch_size)
        .enumerate()
        .for_each(|(batch, chunk)| processor(batch, batch * batch_size, chunk));
}
