use std::{num::NonZeroUsize, ops::Range};

/// Half-open index range handed to one worker.
pub type Chunk = Range<usize>;

/// Splits `0..total` into `workers` contiguous chunks. The first
/// `total % workers` chunks take one extra item.
pub fn partition(total: usize, workers: NonZeroUsize) -> Vec<Chunk> {
    let workers = workers.get();
    let base = total / workers;
    let remainder = total % workers;

    let mut start = 0;
    (0..workers)
        .map(|i| {
            let end = start + base + (i < remainder) as usize;
            let chunk = start..end;
            start = end;
            chunk
        })
        .collect()
}
