use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use sigtree_cli::args::CliArgs;
use sigtree_cli::{driver, tracing_config};

fn main() -> Result<ExitCode> {
    // Initialize tracing if SIGTREE_LOG or RUST_LOG is set (zero cost otherwise).
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let stdout = std::io::stdout();
    let status = driver::run(&args, &cwd, &mut stdout.lock())?;
    Ok(ExitCode::from(status.code()))
}
