pub mod bench;
pub mod cpu;
pub mod decode;
pub mod loader;
pub mod partition;
pub mod report;
pub mod wide;


use std::{
    collections::TryReserveError,
    fmt, io,
    ops::AddAssign,
    path::PathBuf,
};

pub use wide::WideSum;

/// Hex digits per token.
pub const TOKEN_LEN: usize = 32;
/// Memory budget charged per token: the digits plus one separator.
pub const TOKEN_STRIDE: usize = TOKEN_LEN + 1;

/// A fixed-width token. Input shorter than [`TOKEN_LEN`] is right-padded with
/// NUL bytes, which decode as the digit 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token([u8; TOKEN_LEN]);

impl Token {
    /// Builds a token from at most [`TOKEN_LEN`] bytes; extra bytes are dropped.
    pub fn new(bytes: &[u8]) -> Self {
        let mut buf = [0u8; TOKEN_LEN];
        let len = bytes.len().min(TOKEN_LEN);
        buf[..len].copy_from_slice(&bytes[..len]);
        Self(buf)
    }

    pub fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.0.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
        write!(f, "Token(\"{}\")", self.0[..end].escape_ascii())
    }
}

/// Sum and item count produced by one worker over its chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkerResult {
    pub sum: WideSum,
    pub count: usize,
}

impl AddAssign for WorkerResult {
    fn add_assign(&mut self, rhs: Self) {
        self.sum += rhs.sum;
        self.count += rhs.count;
    }
}

/// Combined totals of a reduction pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reduction {
    pub sum: WideSum,
    pub count: usize,
    /// Indices of chunks whose worker died; their tokens are missing from
    /// `sum` and `count`.
    pub failed: Vec<usize>,
}

impl Reduction {
    pub fn new(sum: WideSum, count: usize) -> Self {
        Self {
            sum,
            count,
            failed: Vec::new(),
        }
    }

    /// `sum / count`, or zero for an empty reduction.
    pub fn average(&self) -> WideSum {
        self.sum.div_count(self.count)
    }
}

impl AddAssign<WorkerResult> for Reduction {
    fn add_assign(&mut self, rhs: WorkerResult) {
        self.sum += rhs.sum;
        self.count += rhs.count;
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Count = {}, Sum = {}, Avg = {}",
            self.count,
            self.sum,
            self.average()
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("memory budget of {budget} bytes cannot hold a single token ({} bytes each)", TOKEN_STRIDE)]
    Capacity { budget: usize },

    #[error("cannot access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot allocate token storage")]
    Alloc(#[from] TryReserveError),

    #[error("cannot start worker {worker}")]
    Spawn {
        worker: usize,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
