//! Times the parallel and sequential reductions over the same tokens and
//! derives speed-up and efficiency from the two timings.

use std::{fmt, num::NonZeroUsize, time::Instant};

use tracing::{info, warn};

use crate::{
    cpu::{reduce_parallel, reduce_sequential},
    partition::partition,
    Reduction, Result, Token,
};

/// One result row of the report log.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchmarkRecord {
    pub threads: usize,
    /// Memory budget in bytes.
    pub memory: usize,
    pub parallel_ms: u64,
    pub serial_ms: u64,
    pub speedup: f64,
    pub efficiency: f64,
}

#[derive(Clone, Debug)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed_ms: u64,
}

impl<T> Timed<T> {
    fn measure<F: FnOnce() -> Result<T>>(f: F) -> Result<Self> {
        let start = Instant::now();
        let value = f()?;
        Ok(Self {
            value,
            elapsed_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Benchmark {
    pub parallel: Timed<Reduction>,
    pub sequential: Timed<Reduction>,
    pub record: BenchmarkRecord,
}

/// `serial_ms / parallel_ms`, 0 when the parallel pass took no measurable time.
pub fn speedup(serial_ms: u64, parallel_ms: u64) -> f64 {
    if parallel_ms == 0 {
        return 0.;
    }
    serial_ms as f64 / parallel_ms as f64
}

/// `speedup / workers`, 0 without workers.
pub fn efficiency(speedup: f64, workers: usize) -> f64 {
    if workers == 0 {
        return 0.;
    }
    speedup / workers as f64
}

pub fn run(tokens: &[Token], workers: NonZeroUsize, memory: usize) -> Result<Benchmark> {
    let parallel = Timed::measure(|| {
        let chunks = partition(tokens.len(), workers);
        reduce_parallel(tokens, &chunks)
    })?;
    info!(
        workers = workers.get(),
        elapsed_ms = parallel.elapsed_ms,
        "parallel reduction done"
    );

    let sequential = Timed::measure(|| Ok(reduce_sequential(tokens)))?;
    info!(elapsed_ms = sequential.elapsed_ms, "sequential reduction done");
    let sequential = Timed {
        value: Reduction::new(sequential.value, tokens.len()),
        elapsed_ms: sequential.elapsed_ms,
    };

    if parallel.value.sum != sequential.value.sum {
        warn!(
            parallel = %parallel.value.sum,
            sequential = %sequential.value.sum,
            failed_workers = parallel.value.failed.len(),
            "parallel and sequential sums differ"
        );
    }

    let speedup = speedup(sequential.elapsed_ms, parallel.elapsed_ms);
    let record = BenchmarkRecord {
        threads: workers.get(),
        memory,
        parallel_ms: parallel.elapsed_ms,
        serial_ms: sequential.elapsed_ms,
        speedup,
        efficiency: efficiency(speedup, workers.get()),
    };

    Ok(Benchmark {
        parallel,
        sequential,
        record,
    })
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n[Parallel] {}", self.parallel.value)?;
        if !self.parallel.value.failed.is_empty() {
            writeln!(
                f,
                "WARNING: workers {:?} failed, totals are incomplete",
                self.parallel.value.failed
            )?;
        }
        writeln!(f, "Time: {} ms", self.parallel.elapsed_ms)?;

        writeln!(f, "\n[Sequential] {}", self.sequential.value)?;
        writeln!(f, "Time: {} ms", self.sequential.elapsed_ms)?;

        writeln!(f, "\nSpeed-Up = {:.4}", self.record.speedup)?;
        writeln!(f, "Efficiency = {:.4}", self.record.efficiency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WideSum;

    #[test]
    fn test_ratios() {
        assert_eq!(speedup(100, 25), 4.);
        assert_eq!(speedup(100, 0), 0.);
        assert_eq!(speedup(0, 0), 0.);
        assert_eq!(efficiency(4., 8), 0.5);
        assert_eq!(efficiency(4., 0), 0.);
        assert!(speedup(7, 0).is_finite());
    }

    #[test]
    fn test_run() {
        let tokens = [
            Token::new(b"00000000000000000000000000000001"),
            Token::new(b"00000000000000000000000000000002"),
            Token::new(b"00000000000000000000000000000003"),
        ];
        let benchmark = run(&tokens, NonZeroUsize::new(3).unwrap(), 1000).unwrap();

        for reduction in [&benchmark.parallel.value, &benchmark.sequential.value] {
            assert_eq!(reduction.sum, WideSum::from(6));
            assert_eq!(reduction.count, 3);
            assert_eq!(reduction.average(), WideSum::from(2));
        }

        let record = benchmark.record;
        assert_eq!(record.threads, 3);
        assert_eq!(record.memory, 1000);
        assert_eq!(record.parallel_ms, benchmark.parallel.elapsed_ms);
        assert_eq!(record.serial_ms, benchmark.sequential.elapsed_ms);
        assert_eq!(record.speedup, speedup(record.serial_ms, record.parallel_ms));
        assert_eq!(record.efficiency, record.speedup / 3.);
    }

    #[test]
    fn test_run_empty() {
        let benchmark = run(&[], NonZeroUsize::new(4).unwrap(), 33).unwrap();
        assert_eq!(benchmark.parallel.value, Reduction::default());
        assert_eq!(benchmark.sequential.value, Reduction::default());
        assert!(benchmark.record.speedup.is_finite());
        assert!(benchmark.record.efficiency.is_finite());
    }

    #[test]
    fn test_display() {
        let benchmark = Benchmark {
            parallel: Timed {
                value: Reduction {
                    sum: WideSum::from(4),
                    count: 2,
                    failed: vec![1],
                },
                elapsed_ms: 5,
            },
            sequential: Timed {
                value: Reduction::new(WideSum::from(6), 3),
                elapsed_ms: 10,
            },
            record: BenchmarkRecord {
                threads: 3,
                memory: 99,
                parallel_ms: 5,
                serial_ms: 10,
                speedup: 2.,
                efficiency: 2. / 3.,
            },
        };
        assert_eq!(
            benchmark.to_string(),
            "\n[Parallel] Count = 2, Sum = 4, Avg = 2\n\
             WARNING: workers [1] failed, totals are incomplete\n\
             Time: 5 ms\n\
             \n[Sequential] Count = 3, Sum = 6, Avg = 2\n\
             Time: 10 ms\n\
             \nSpeed-Up = 2.0000\n\
             Efficiency = 0.6667\n"
        );
    }
}
