//! Thread-per-chunk reduction
//!
//! Every worker owns its accumulator and counter and hands them back through
//! its join handle, so nothing is written by more than one thread and the
//! token list is only ever read. Workers are scoped to a single call: spawned
//! fresh, joined all together, then combined in chunk order.

use std::{ops::Range, thread};

use tracing::{debug, warn};

use crate::{decode::decode, Error, Reduction, Result, Token, WorkerResult};

/// Body of one worker.
pub fn reduce_chunk(tokens: &[Token]) -> WorkerResult {
    let mut local = WorkerResult::default();
    for token in tokens {
        local.sum += decode(token);
        local.count += 1;
    }
    local
}

/// Runs one worker per chunk and combines their results.
///
/// A worker that cannot be started aborts the whole reduction. A worker that
/// panics is excluded from the totals and listed in [`Reduction::failed`].
///
/// Panics if a chunk is out of bounds for `tokens`.
pub fn reduce_parallel(tokens: &[Token], chunks: &[Range<usize>]) -> Result<Reduction> {
    reduce_parallel_with(tokens, chunks, reduce_chunk)
}

/// [`reduce_parallel`] with a custom worker body.
pub fn reduce_parallel_with<F>(
    tokens: &[Token],
    chunks: &[Range<usize>],
    worker: F,
) -> Result<Reduction>
where
    F: Fn(&[Token]) -> WorkerResult + Sync,
{
    let worker = &worker;
    thread::scope(|s| {
        let mut handles = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            let slice = &tokens[chunk.clone()];
            let spawned = thread::Builder::new()
                .name(format!("reduce-{i}"))
                .spawn_scoped(s, move || worker(slice));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    // Joined here so the scope does not re-raise their panics.
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(Error::Spawn { worker: i, source });
                }
            }
        }

        // Full barrier: nothing is combined until every worker is joined.
        let joined = handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Vec<_>>();

        let mut total = Reduction::default();
        for (i, (result, chunk)) in joined.into_iter().zip(chunks).enumerate() {
            match result {
                Ok(result) => {
                    debug!(worker = i, count = result.count, "worker finished");
                    total += result;
                }
                Err(_) => {
                    warn!(
                        worker = i,
                        start = chunk.start,
                        end = chunk.end,
                        "worker panicked, its chunk is missing from the totals"
                    );
                    total.failed.push(i);
                }
            }
        }
        Ok(total)
    })
}
