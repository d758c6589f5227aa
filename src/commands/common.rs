//! Plumbing shared between subcommands.

use artifact_rank::Result;
use artifact_rank::config::Config;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by the subcommands that load a configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to configuration file [default: one of rating.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl ConfigArgs {
    /// Initialize logging, then load the configuration from the current directory or the explicit path.
    pub fn load(&self) -> Result<Config> {
        init_logging(self.log_level);

        let (config, warnings) = Config::load(Utf8Path::new("."), self.config.as_ref())?;
        print_warnings(&warnings);
        Ok(config)
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}

pub fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }

    eprintln!("\n⚠️  Configuration validation warnings:");
    for warning in warnings {
        eprintln!("   {warning}");
    }
    eprintln!();
}
