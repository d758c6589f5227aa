use crate::Result;
use crate::license::{LicenseClass, analyze};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::thread;
use url::Url;

/// The default configuration YAML content, embedded from `default_config.yml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yml");

/// Configuration file names probed when no explicit path is given, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &["rating.toml", "rating.yml", "rating.yaml", "rating.json"];

pub const ENV_ENABLE_AUGMENTED_SUMMARY: &str = "ENABLE_AUGMENTED_SUMMARY";
pub const ENV_AUGMENTED_MODEL_ID: &str = "AUGMENTED_MODEL_ID";
pub const ENV_AUGMENTED_ENDPOINT: &str = "AUGMENTED_ENDPOINT";
pub const ENV_AUGMENTED_TIMEOUT_MS: &str = "AUGMENTED_TIMEOUT_MS";
pub const ENV_PASS_THRESHOLD: &str = "PASS_THRESHOLD";
pub const ENV_RATING_WAIT_TIMEOUT_MS: &str = "RATING_WAIT_TIMEOUT_MS";

fn default_augmented_endpoint() -> String {
    "http://localhost:11434/api/generate".to_string()
}

const fn default_augmented_timeout_ms() -> u64 {
    5000
}

const fn default_pass_threshold() -> f64 {
    0.5
}

const fn default_rating_wait_timeout_ms() -> u64 {
    30_000
}

fn default_license_target() -> String {
    "apache-2".to_string()
}

fn default_license_use_case() -> String {
    "fine-tune+inference".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Score READMEs with the generative client before falling back to the heuristic
    #[serde(default)]
    pub enable_augmented_summary: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augmented_model_id: Option<String>,

    #[serde(default = "default_augmented_endpoint")]
    pub augmented_endpoint: String,

    #[serde(default = "default_augmented_timeout_ms")]
    pub augmented_timeout_ms: u64,

    /// Net score at or above which a rating is Completed rather than Disqualified
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,

    #[serde(default = "default_rating_wait_timeout_ms")]
    pub rating_wait_timeout_ms: u64,

    /// Upper bound on metrics computed at once [default: available parallelism]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_metrics: Option<usize>,

    #[serde(default = "default_license_target")]
    pub license_target: String,

    #[serde(default = "default_license_use_case")]
    pub license_use_case: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_augmented_summary: false,
            augmented_model_id: None,
            augmented_endpoint: default_augmented_endpoint(),
            augmented_timeout_ms: default_augmented_timeout_ms(),
            pass_threshold: default_pass_threshold(),
            rating_wait_timeout_ms: default_rating_wait_timeout_ms(),
            max_concurrent_metrics: None,
            license_target: default_license_target(),
            license_use_case: default_license_use_case(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults, then apply overrides from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an environment override is malformed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        Self::load_with_env(base_dir, config_path, |name| std::env::var(name).ok())
    }

    /// Load configuration from a file or use defaults, then apply overrides obtained through `lookup`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an override is malformed
    pub fn load_with_env(
        base_dir: &Utf8Path,
        config_path: Option<&Utf8PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, Vec<String>)> {
        let mut config = Self::load_file(base_dir, config_path)?;
        config.apply_env_overrides(lookup)?;

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    fn load_file(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading rating configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let mut found = None;
            for name in CONFIG_FILE_NAMES {
                let path = base_dir.join(name);
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        found = Some((path, text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading rating configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok(Self::default());
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        Ok(config)
    }

    /// Override file settings with environment values
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup(ENV_ENABLE_AUGMENTED_SUMMARY) {
            self.enable_augmented_summary = parse_bool(ENV_ENABLE_AUGMENTED_SUMMARY, &value)?;
        }

        if let Some(value) = lookup(ENV_AUGMENTED_MODEL_ID) {
            let value = value.trim();
            self.augmented_model_id = (!value.is_empty()).then(|| value.to_string());
        }

        if let Some(value) = lookup(ENV_AUGMENTED_ENDPOINT) {
            self.augmented_endpoint = value.trim().to_string();
        }

        if let Some(value) = lookup(ENV_AUGMENTED_TIMEOUT_MS) {
            self.augmented_timeout_ms = value
                .trim()
                .parse::<u64>()
                .into_app_err_with(|| format!("invalid value '{value}' for {ENV_AUGMENTED_TIMEOUT_MS}"))?;
        }

        if let Some(value) = lookup(ENV_PASS_THRESHOLD) {
            let threshold = value
                .trim()
                .parse::<f64>()
                .into_app_err_with(|| format!("invalid value '{value}' for {ENV_PASS_THRESHOLD}"))?;
            if !threshold.is_finite() {
                bail!("invalid value '{value}' for {ENV_PASS_THRESHOLD}: must be a finite number");
            }
            self.pass_threshold = threshold;
        }

        if let Some(value) = lookup(ENV_RATING_WAIT_TIMEOUT_MS) {
            self.rating_wait_timeout_ms = value
                .trim()
                .parse::<u64>()
                .into_app_err_with(|| format!("invalid value '{value}' for {ENV_RATING_WAIT_TIMEOUT_MS}"))?;
        }

        Ok(())
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Save the default configuration to a file, preserving comments for YAML format
    ///
    /// YAML output is the commented `default_config.yml` verbatim. Other formats are serialized from `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default_with_comments(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();

        if matches!(extension, "yml" | "yaml") {
            fs::write(output_path, DEFAULT_CONFIG_YAML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        } else {
            self.save(output_path)?;
        }

        Ok(())
    }

    #[must_use]
    pub const fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.rating_wait_timeout_ms)
    }

    #[must_use]
    pub const fn augmented_timeout(&self) -> Duration {
        Duration::from_millis(self.augmented_timeout_ms)
    }

    /// Number of metrics that may run at the same time.
    #[must_use]
    pub fn metric_parallelism(&self) -> usize {
        match self.max_concurrent_metrics {
            Some(n) if n > 0 => n,
            _ => thread::available_parallelism().map_or(1, core::num::NonZeroUsize::get),
        }
    }

    /// The model id to use for augmented summaries, when they are enabled and usable.
    #[must_use]
    pub fn augmented_model(&self) -> Option<&str> {
        if !self.enable_augmented_summary {
            return None;
        }

        self.augmented_model_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Validate the configuration to detect settings that cannot behave as intended
    fn validate(&self, warnings: &mut Vec<String>) {
        if !(0.0..=1.0).contains(&self.pass_threshold) {
            warnings.push(format!(
                "pass_threshold {} is outside [0, 1]; every artifact will be {}",
                self.pass_threshold,
                if self.pass_threshold.is_nan() || self.pass_threshold > 1.0 { "disqualified" } else { "accepted" }
            ));
        }

        if self.rating_wait_timeout_ms == 0 {
            warnings.push("rating_wait_timeout_ms is 0; callers will never wait for an in-flight rating".to_string());
        }

        if self.max_concurrent_metrics == Some(0) {
            warnings.push("max_concurrent_metrics is 0; using the available parallelism instead".to_string());
        }

        if self.enable_augmented_summary {
            if self.augmented_model().is_none() {
                warnings.push("augmented summaries are enabled but augmented_model_id is not set; the heuristic will be used".to_string());
            }

            if self.augmented_timeout_ms == 0 {
                warnings.push("augmented_timeout_ms is 0; every augmented summary will time out".to_string());
            }

            if Url::parse(&self.augmented_endpoint).is_err() {
                warnings.push(format!("augmented_endpoint '{}' is not a valid URL", self.augmented_endpoint));
            }
        }

        match analyze(&self.license_target).class {
            LicenseClass::NoLicense => warnings.push("license_target is empty; every license check will be restricted".to_string()),
            LicenseClass::Unknown => warnings.push(format!(
                "license_target '{}' is not a recognized license; license checks will require manual review",
                self.license_target
            )),
            LicenseClass::Permissive | LicenseClass::Copyleft => {}
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => bail!("invalid value '{value}' for {name}; expected true or false"),
    }
}
