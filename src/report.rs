//! Append-only CSV log of benchmark records.

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
};

use crate::{bench::BenchmarkRecord, Error, Result};

pub const HEADER: &str = "threads,memory,parallel_ms,serial_ms,speed_up,efficiency";

impl BenchmarkRecord {
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.6},{:.6}",
            self.threads,
            self.memory,
            self.parallel_ms,
            self.serial_ms,
            self.speedup,
            self.efficiency
        )
    }
}

/// Appends `record` to the log at `path`, writing the header first if the
/// log is new or empty.
pub fn append(path: &Path, record: &BenchmarkRecord) -> Result<()> {
    let io_err = |source: io::Error| Error::Io {
        path: path.to_owned(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;

    let mut out = String::new();
    if file.metadata().map_err(io_err)?.len() == 0 {
        out.push_str(HEADER);
        out.push('\n');
    }
    out.push_str(&record.to_csv_row());
    out.push('\n');

    file.write_all(out.as_bytes()).map_err(io_err)
}
