//! MemoCalc: interactive decimal calculator.

use std::process::ExitCode;

use memocalc_lib::{app, config, errors};

fn main() -> ExitCode {
    let config = config::AppConfig::parse();
    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Fatal error: {e:#}");
            ExitCode::from(errors::exit_code(&e))
        }
    }
}
