//! `clinic-hours` CLI — resolve opening hours and validate appointment slots
//! from a clinic configuration document.
//!
//! ## Usage
//!
//! ```sh
//! # Print the normalized configuration
//! clinic-hours -c clinic.json normalize
//!
//! # Resolve one date
//! clinic-hours -c clinic.json resolve 2024-12-25
//!
//! # Validate a slot (exit status 2 when rejected)
//! clinic-hours -c clinic.json validate 2024-12-23T09:00 2024-12-23T09:30
//!
//! # Resolve a date range for a calendar view
//! clinic-hours -c clinic.json calendar 2024-12-01 2024-12-31
//!
//! # List 30-minute slots every 15 minutes
//! clinic-hours -c clinic.json slots 2024-12-23 --duration 30 --step 15
//!
//! # Read the configuration from stdin
//! cat clinic.json | clinic-hours resolve 2024-12-25
//! ```
//!
//! Output is JSON on stdout. Logs go to stderr (`RUST_LOG` or `-v`).

use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clinic_hours::time::parse_date;
use clinic_hours::ClinicCalendar;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Exit status for a rejected slot.
const EXIT_REJECTED: i32 = 2;

#[derive(Parser)]
#[command(
    name = "clinic-hours",
    version,
    about = "Clinic opening hours and appointment slot validation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true, env = "CLINIC_HOURS_CONFIG")]
    config: Option<String>,

    /// Increase log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the normalized configuration document
    Normalize {
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Resolve the opening window of one date (YYYY-MM-DD)
    Resolve { date: String },
    /// Validate an appointment slot; exits with status 2 when rejected
    Validate { start: String, end: String },
    /// Resolve every date in an inclusive range
    Calendar { from: String, to: String },
    /// List bookable slots on a date
    Slots {
        date: String,
        /// Slot length in minutes
        #[arg(long)]
        duration: u32,
        /// Minutes between slot starts (defaults to the slot length)
        #[arg(long)]
        step: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let raw = read_input(cli.config.as_deref())?;
    let calendar = ClinicCalendar::from_json(&raw).context("Failed to load clinic configuration")?;
    tracing::debug!(
        holidays = calendar.holidays.len(),
        exceptions = calendar.exceptions.len(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Normalize { output } => {
            let json = serde_json::to_string_pretty(&calendar)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Resolve { date } => {
            let date = parse_date(&date).context("Failed to parse date")?;
            print_json(&calendar.resolve_day(date))?;
        }
        Commands::Validate { start, end } => {
            let result = calendar.validate_slot(&start, &end);
            print_json(&result)?;
            if !result.valid {
                process::exit(EXIT_REJECTED);
            }
        }
        Commands::Calendar { from, to } => {
            let from = parse_date(&from).context("Failed to parse range start")?;
            let to = parse_date(&to).context("Failed to parse range end")?;
            let days = calendar
                .resolve_range(from, to)
                .context("Failed to resolve date range")?;
            print_json(&days)?;
        }
        Commands::Slots {
            date,
            duration,
            step,
        } => {
            let date = parse_date(&date).context("Failed to parse date")?;
            let slots = calendar.available_slots(date, duration, step.unwrap_or(duration));
            print_json(&slots)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// `-v` when set.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
