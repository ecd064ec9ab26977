//! Application entry point.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use memocalc_cli::{build_calculator, Repl};

use crate::config::AppConfig;
use crate::logging;

/// Run an interactive session on stdin/stdout.
pub fn run(config: &AppConfig) -> Result<()> {
    let calc_config = config.calculator_config()?;
    calc_config.validate()?;
    logging::init(&calc_config.log_file())?;
    info!(base_dir = %calc_config.base_dir.display(), "Starting calculator");

    let calculator = build_calculator(calc_config)?;
    let interrupt = Arc::new(AtomicBool::new(false));
    ctrlc_handler(Arc::clone(&interrupt))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut repl =
        Repl::new(calculator, stdin.lock(), stdout.lock()).with_interrupt(interrupt);
    let end = repl.run().context("terminal I/O failed")?;
    info!(?end, "Session finished");
    Ok(())
}

fn ctrlc_handler(interrupt: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        interrupt.store(true, Ordering::SeqCst);
    })
    .context("Error setting Ctrl+C handler")
}
