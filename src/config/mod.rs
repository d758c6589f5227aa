//! Engine configuration.
//!
//! Settings come from an optional `rating.toml|yml|yaml|json` file, are overridden by environment
//! variables, and are then validated. Validation never fails; it produces warnings for settings that
//! cannot behave as intended.

#[expect(clippy::module_inception, reason = "the module and its primary type share a name")]
mod config;

pub use config::{
    CONFIG_FILE_NAMES, Config, DEFAULT_CONFIG_YAML, ENV_AUGMENTED_ENDPOINT, ENV_AUGMENTED_MODEL_ID, ENV_AUGMENTED_TIMEOUT_MS,
    ENV_ENABLE_AUGMENTED_SUMMARY, ENV_PASS_THRESHOLD, ENV_RATING_WAIT_TIMEOUT_MS,
};
