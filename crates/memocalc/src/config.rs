//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::str::FromStr;

use clap::builder::BoolishValueParser;
use clap::Parser;
use rust_decimal::Decimal;

use memocalc_core::constants::{
    DEFAULT_MAX_HISTORY_SIZE, DEFAULT_MAX_UNDO_DEPTH, DEFAULT_PRECISION,
};
use memocalc_core::CalculatorConfig;

use crate::errors::AppError;

/// MemoCalc: interactive decimal calculator with undo/redo and saved history.
#[derive(Parser, Debug)]
#[command(name = "memocalc", version, about)]
pub struct AppConfig {
    /// Directory for logs and saved history [default: current directory].
    #[arg(long, env = "CALCULATOR_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Maximum number of calculations kept in history.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_HISTORY_SIZE,
        env = "CALCULATOR_MAX_HISTORY_SIZE",
        value_parser = parse_positive_usize
    )]
    pub max_history_size: usize,

    /// Maximum number of undo steps.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_UNDO_DEPTH,
        env = "CALCULATOR_MAX_UNDO_DEPTH",
        value_parser = parse_positive_usize
    )]
    pub max_undo_depth: usize,

    /// Save history after every calculation.
    #[arg(
        long,
        default_value = "true",
        env = "CALCULATOR_AUTO_SAVE",
        action = clap::ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub auto_save: bool,

    /// Decimal places shown in results (1-28).
    #[arg(
        long,
        default_value_t = DEFAULT_PRECISION,
        env = "CALCULATOR_PRECISION",
        value_parser = clap::value_parser!(u32).range(1..=28)
    )]
    pub precision: u32,

    /// Largest accepted operand magnitude [default: largest representable].
    #[arg(long, env = "CALCULATOR_MAX_INPUT_VALUE", value_parser = parse_positive_decimal)]
    pub max_input_value: Option<Decimal>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Build the calculator configuration, resolving the base directory.
    pub fn calculator_config(&self) -> Result<CalculatorConfig, AppError> {
        let base_dir = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(AppError::CurrentDir)?,
        };
        Ok(CalculatorConfig {
            base_dir,
            max_history_size: self.max_history_size,
            max_undo_depth: self.max_undo_depth,
            auto_save: self.auto_save,
            precision: self.precision,
            max_input_value: self.max_input_value.unwrap_or(Decimal::MAX),
        })
    }
}

fn parse_positive_usize(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_positive_decimal(s: &str) -> Result<Decimal, String> {
    let value = Decimal::from_str(s.trim()).map_err(|e| e.to_string())?;
    if value <= Decimal::ZERO {
        return Err("must be greater than zero".to_string());
    }
    Ok(value)
}
