use std::{num::NonZeroUsize, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use hex_reduce::{bench, loader, report};

/// Sums 32-digit hex tokens with a thread-per-chunk reduction and with a
/// single-threaded pass, then reports speed-up and efficiency.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of worker threads
    threads: NonZeroUsize,

    /// Memory budget in bytes, each token costs 33
    memory: NonZeroUsize,

    /// Whitespace separated hex tokens
    #[arg(long, default_value = "numbers.txt")]
    input: PathBuf,

    /// CSV log the result row is appended to
    #[arg(long, default_value = "result.csv")]
    report: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = app(args) {
        tracing::error!("Benchmark aborted: {err:?}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn app(args: Args) -> anyhow::Result<()> {
    let memory = args.memory.get();
    let tokens = loader::load(&args.input, memory).context("Loading tokens failed")?;
    println!("Tokens read: {}", tokens.len());

    let benchmark = bench::run(&tokens, args.threads, memory)?;
    print!("{}", benchmark);

    report::append(&args.report, &benchmark.record).context("Writing report failed")?;
    Ok(())
}
