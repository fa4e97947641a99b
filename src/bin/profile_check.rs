// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Profile Check Binary
//!
//! Validates (or sanitizes) a user profile stored as JSON and prints the
//! report. Exits with status 1 when the profile is rejected.

use anyhow::{Context, Result};
use clap::Parser;
use pierre_recommendations::{
    config::Config,
    logging::{LogFormat, LoggingConfig},
    validation::{UserProfileValidator, ValidationOptions},
};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "profile-check")]
#[command(about = "Validate or sanitize a Pierre user profile")]
pub struct Args {
    /// Profile JSON file
    profile: PathBuf,

    /// Treat warnings as errors
    #[arg(long, default_value = "false")]
    strict: bool,

    /// Skip required-field checks
    #[arg(long, default_value = "false")]
    partial: bool,

    /// Print the sanitized profile instead of a validation report
    #[arg(long, default_value = "false")]
    sanitize: bool,

    /// Emit logs as JSON lines
    #[arg(long, default_value = "false")]
    json_logs: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut logging = LoggingConfig::from_env();
    if args.json_logs {
        logging.format = LogFormat::Json;
    }
    logging.init()?;

    let config = Config::load(args.config)?;
    let validator = UserProfileValidator::with_config(config.validation);

    let raw = fs::read_to_string(&args.profile)
        .with_context(|| format!("Failed to read profile: {}", args.profile.display()))?;
    let profile: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse profile: {}", args.profile.display()))?;

    if args.sanitize {
        let sanitized = validator.sanitize(&profile);
        println!("{}", serde_json::to_string_pretty(&sanitized)?);
        return Ok(ExitCode::SUCCESS);
    }

    let options = ValidationOptions {
        strict: args.strict || validator.config().strict_by_default,
        allow_partial: args.partial,
    };
    let report = validator.validate(&profile, options);
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!(
        profile = %args.profile.display(),
        valid = report.is_valid,
        "Profile check finished"
    );

    Ok(if report.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
