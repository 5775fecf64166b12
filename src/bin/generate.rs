//! Writes random 128-bit values as 32-digit lowercase hex, one per line.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Number of tokens
    #[arg(long, default_value_t = 10_000_000)]
    count: usize,

    #[arg(long, default_value = "numbers.txt")]
    output: PathBuf,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let file = File::create(&args.output)
        .with_context(|| format!("Creating {} failed", args.output.display()))?;
    let mut out = BufWriter::new(file);
    for _ in 0..args.count {
        writeln!(out, "{:032x}", rng.gen::<u128>())?;
    }
    out.flush()?;

    Ok(())
}
