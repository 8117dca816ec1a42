//! Command-line entry point.
//!
//! Usage:
//!
//! ```text
//! tz-validation-gen --start_year 2000 --until_year 2100 --epoch_year 2050 \
//!     [--nzd_file DIR] < zones.txt > validation_data.json
//! ```
//!
//! Zone names arrive one per line on stdin; blank lines and `#` comments are
//! ignored. The JSON fixture is written to stdout, diagnostics to stderr.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

use std::io::{self, BufRead, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use log::info;

use tz_validation_gen::dataset::{build_validation_data, GenerateOptions};
use tz_validation_gen::json;
use tz_validation_gen::provider::TzdbSource;

/// Generates a JSON validation fixture of time zone transitions and
/// periodic samples for cross-checking an independent time zone engine.
#[derive(Debug, Parser)]
#[command(name = "tz-validation-gen", version)]
struct Cli {
    /// First year of the sampled range (inclusive).
    #[arg(long = "start_year")]
    start_year: i32,

    /// End year of the sampled range (exclusive).
    #[arg(long = "until_year")]
    until_year: i32,

    /// Year whose January 1, 00:00:00 UTC anchors emitted epoch seconds.
    #[arg(long = "epoch_year")]
    epoch_year: i32,

    /// Load TZif data from this zoneinfo directory instead of the bundled
    /// tzdb.
    #[arg(long = "nzd_file", value_name = "PATH")]
    nzd_file: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap exits with 2 on bad arguments; the fixture contract is 0
            // for --help/--version and 1 for any argument error.
            let _ = err.print();
            return Ok(ExitCode::from(u8::from(err.use_stderr())));
        }
    };

    let source = match &cli.nzd_file {
        Some(path) => TzdbSource::from_dir(path)?,
        None => TzdbSource::bundled(),
    };

    let zones = read_zones(io::stdin().lock())?;
    info!(
        "generating test data for {} zones, years [{}, {})",
        zones.len(),
        cli.start_year,
        cli.until_year
    );

    let options = GenerateOptions {
        start_year: cli.start_year,
        until_year: cli.until_year,
        epoch_year: cli.epoch_year,
    };
    let data = build_validation_data(&options, &source, &zones)?;

    // Nothing reaches stdout until the dataset is complete, so a failed run
    // never leaves a partial document behind.
    let stdout = io::stdout().lock();
    json::write_json(BufWriter::new(stdout), &data)?;
    Ok(ExitCode::SUCCESS)
}

/// Reads zone names, one per line. Blank lines and lines starting with `#`
/// are skipped; surrounding whitespace is trimmed.
fn read_zones<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut zones = Vec::new();
    for line in reader.lines() {
        let line = line.wrap_err("failed to read zone names from stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        zones.push(trimmed.to_string());
    }
    Ok(zones)
}
