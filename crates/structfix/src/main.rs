//! The structfix CLI.
//!
//! `structfix [OPTIONS] <PATH>...` fills in the type of every nested struct
//! literal whose field is declared with an inline `struct { ... }` type.
//!
//! Options:
//! - `-w`, `--write` - Write results back to the source files
//! - `--json` - Output diagnostics as JSON (one object per line)
//! - `--no-color` - Disable colorized output
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=structfix=debug`) for logs on stderr.

mod diagnostics;
mod driver;
mod loader;
mod sink;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::diagnostics::DiagnosticOptions;
use crate::driver::Driver;
use crate::sink::{InPlaceSink, StreamSink};

#[derive(Parser)]
#[command(
    name = "structfix",
    version,
    about = "Fill in the types of nested struct literals in Go source"
)]
struct Cli {
    /// Go source files or package directories
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Write results to the source files instead of stdout
    #[arg(short, long)]
    write: bool,

    /// Output diagnostics as JSON (one object per line) instead of human-readable format
    #[arg(long)]
    json: bool,

    /// Disable colorized output
    #[arg(long = "no-color")]
    no_color: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let diag_opts = DiagnosticOptions {
        color: !cli.no_color && !cli.json,
        json: cli.json,
    };

    let result = if cli.write {
        Driver::new(InPlaceSink).run(&cli.paths)
    } else {
        Driver::new(StreamSink::new(io::stdout().lock())).run(&cli.paths)
    };

    match result {
        Ok(summary) => {
            tracing::debug!(files = summary.files, rewrites = summary.rewrites, "done");
        }
        Err(e) => {
            eprint!("{}", diagnostics::render(&e, &diag_opts));
            process::exit(1);
        }
    }
}

/// Log to stderr when `RUST_LOG` is set; stdout carries fixed source.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}
