//! Command-line front end for the artifact rating engine.
//!
//! # Usage
//!
//! Rate artifacts whose metadata snapshots live in a directory:
//!
//! ```bash
//! artifact-rank rate --metadata-dir snapshots model:google/gemma-3-270m https://huggingface.co/datasets/bookcorpus/bookcorpus
//! ```
//!
//! For an artifact with id `model/google/gemma-3-270m`, the snapshot is read from
//! `snapshots/model_google_gemma-3-270m.json` (or `.yaml`/`.yml`). An optional
//! `model_google_gemma-3-270m.tar.gz` bundle supplies the file listing when the snapshot has none.
//!
//! Add `--json` for machine-readable output, `--short` for one line per artifact, and `--check` to exit with
//! failure when any artifact is disqualified or could not be rated.
//!
//! Check whether a license can be used for a given purpose:
//!
//! ```bash
//! artifact-rank license "Apache-2.0" --target "GPL-3.0" --use-case "fine-tune+inference"
//! ```
//!
//! # Configuration
//!
//! Configuration is read from the first of `rating.toml`, `rating.yml`, `rating.yaml`, or `rating.json` found in
//! the current directory, or from the file named by `--config`. Environment variables such as `PASS_THRESHOLD`
//! and `ENABLE_AUGMENTED_SUMMARY` override file values.
//!
//! ```bash
//! artifact-rank init rating.yml        # write the default configuration
//! artifact-rank validate -c rating.yml # check a configuration file
//! ```

use artifact_rank::Result;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

mod commands;

use crate::commands::{
    InitArgs, LicenseArgs, RateArgs, ValidateArgs, check_license, init_config, rate_artifacts, validate_config,
};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "artifact-rank", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rate artifacts and report their scores
    Rate(Box<RateArgs>),
    /// Check whether a license can be used under a target license
    License(LicenseArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        Command::Rate(rate_args) => rate_artifacts(rate_args).await,
        Command::License(license_args) => check_license(license_args),
        Command::Init(init_args) => init_config(init_args),
        Command::Validate(validate_args) => validate_config(validate_args),
    }
}
