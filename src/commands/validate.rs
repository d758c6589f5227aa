use super::common::print_warnings;
use artifact_rank::Result;
use artifact_rank::config::Config;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::EnrichableExt;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file [default: one of rating.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

pub fn validate_config(args: &ValidateArgs) -> Result<()> {
    let config_path = args.config.as_ref();
    let (_, warnings) =
        Config::load(&Utf8PathBuf::from("."), config_path).map_err(|e| e.enrich("configuration validation failed"))?;

    println!("Configuration validation successful");
    if let Some(path) = config_path {
        println!("Config file: {path}");
    }

    print_warnings(&warnings);
    Ok(())
}
