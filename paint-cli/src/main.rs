use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use paint_cli::app;
use paint_cli::cli::Cli;
use paint_cli::logging::{self, LogControl};

// ─── logging ─────────────────────────────────────────────────────────────────

/// Applies the command line logging flags on top of the defaults.
///
/// * `--log-level` replaces the `RUST_LOG` / `info` filter.
/// * `--log-file` appends every record to the given file.
/// * `--quiet` hides console output; the file (if any) still receives it.
fn configure_logging(
    control: &LogControl,
    cli: &Cli,
) -> anyhow::Result<()> {
    if let Some(level) = &cli.log_level {
        control.set_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        control.log_to_file(path)?;
    }
    if cli.quiet {
        control.set_console_enabled(false)?;
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let control = logging::init()?;

    let cli = Cli::parse();
    configure_logging(&control, &cli).context("Failed to configure logging")?;
    debug!(command = ?cli.command, "starting");

    let stdout = io::stdout();
    let result = app::run(&cli, &mut stdout.lock());

    control.close_file();
    result
}
