use super::common::ConfigArgs;
use artifact_rank::Result;
use artifact_rank::facts::{ArtifactRef, DirectorySource};
use artifact_rank::metrics::MetricRegistry;
use artifact_rank::rating::{RatingCoordinator, RatingStore};
use artifact_rank::reports::{ColorMode, ReportEntry, generate_console, generate_json};
use camino::Utf8PathBuf;
use clap::Parser;
use futures_util::future::join_all;
use ohno::bail;
use std::sync::Arc;

#[derive(Parser, Debug)]
pub struct RateArgs {
    /// Artifacts to rate (a hosting URL or `<kind>:<name>[@<version>]`)
    #[arg(value_name = "ARTIFACT", required = true)]
    pub artifacts: Vec<ArtifactRef>,

    /// Directory holding the metadata snapshots and bundles of the artifacts
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub metadata_dir: Utf8PathBuf,

    /// Print the ratings as JSON instead of as a console report
    #[arg(long)]
    pub json: bool,

    /// Show only a single line per artifact with its id, status, and net score
    #[arg(long)]
    pub short: bool,

    /// Exit with failure if any artifact did not complete its rating
    #[arg(long)]
    pub check: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    #[command(flatten)]
    pub config: ConfigArgs,
}

pub async fn rate_artifacts(args: &RateArgs) -> Result<()> {
    let config = args.config.load()?;

    let registry = Arc::new(MetricRegistry::standard(&config)?);
    let source = Arc::new(DirectorySource::new(args.metadata_dir.clone()));
    let coordinator = RatingCoordinator::new(source, registry, Arc::new(RatingStore::new()), &config);

    let outcomes = join_all(args.artifacts.iter().map(|artifact| coordinator.rate(artifact))).await;

    let entries: Vec<_> = args
        .artifacts
        .iter()
        .zip(outcomes)
        .map(|(artifact, outcome)| ReportEntry { id: artifact.id(), outcome })
        .collect();

    if args.json {
        println!("{}", generate_json(&entries)?);
    } else {
        let mut output = String::new();
        generate_console(&entries, config.pass_threshold, args.color, args.short, &mut output)?;
        print!("{output}");
    }

    if args.check {
        check_outcomes(&entries)?;
    }

    Ok(())
}

fn check_outcomes(entries: &[ReportEntry]) -> Result<()> {
    let rejected: Vec<_> = entries.iter().filter(|entry| !entry.outcome.is_completed()).collect();

    if rejected.is_empty() {
        println!("\n✓ Rating Check: all {} artifact(s) passed", entries.len());
        return Ok(());
    }

    eprintln!("\n✗ Rating Check: {} artifact(s) did not pass:", rejected.len());
    for entry in &rejected {
        match entry.outcome.result() {
            Some(result) => eprintln!("  - {} (net score: {:.2})", entry.id, result.net_score),
            None => eprintln!("  - {} (no rating available)", entry.id),
        }
    }

    bail!("rating check failed: {} artifact(s) did not pass", rejected.len())
}
