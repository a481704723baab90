
//! Compress or expand standard input to standard output.
//!
//! ```text
//! huffpack compress < input > input.huff
//! huffpack expand < input.huff > input
//! ```
//!
//! The modes may also be written as `-zip` and `-unzip`.

use clap::{Parser, Subcommand};
use huffpack::prelude::*;
use std::ffi::OsString;
use std::io::{self, BufWriter};
use std::process;

const EXIT_ERROR: i32 = 1;


#[derive(Parser, Debug)]
#[command(name = "huffpack", about = "Static Huffman compression of standard input", version)]
#[command(arg_required_else_help = true)]
#[command(after_help = "The modes may also be written as `-zip` and `-unzip`.")]
struct Cli {
    #[command(subcommand)]
    mode: Mode,

    /// Log compression statistics to stderr
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable colored log output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Compress standard input and write the result to standard output
    #[command(visible_alias = "zip")]
    Compress,

    /// Expand compressed standard input and write the original bytes to standard output
    #[command(visible_alias = "unzip")]
    Expand,
}


fn init_tracing(cli: &Cli) {
    // stdout carries the binary stream, so logs always go to stderr.
    // without --verbose, only warnings are shown and RUST_LOG is ignored.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "debug".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Rewrite the single-dash mode names `-zip` and `-unzip` to their subcommands.
fn dashed_modes(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "-zip" { OsString::from("zip") }
            else if arg == "-unzip" { OsString::from("unzip") }
            else { arg }
        })
        .collect()
}

fn main() {
    let cli = Cli::parse_from(dashed_modes(std::env::args_os()));
    init_tracing(&cli);

    if let Err(error) = run(cli.mode) {
        eprintln!("error: {}", error);
        process::exit(EXIT_ERROR);
    }
}

fn run(mode: Mode) -> Result<()> {
    let input = io::stdin().lock();
    let output = BufWriter::new(io::stdout().lock());

    match mode {
        Mode::Compress => {
            let summary = compress_read(input, output)?;

            if let Some(ratio) = summary.ratio() {
                tracing::info!(
                    "compressed {} bytes to {} bytes ({:.1}%)",
                    summary.original_bytes, summary.compressed_bytes, ratio * 100.0
                );
            }
        },

        Mode::Expand => {
            let count = expand(input, output)?;
            tracing::info!("expanded {} bytes", count);
        },
    }

    Ok(())
}
