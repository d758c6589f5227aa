//! Rendering of rating outcomes for people and for tools.

mod console;
mod json;

use crate::facts::ArtifactId;
use crate::rating::RatingOutcome;
use clap::ValueEnum;

pub use console::generate as generate_console;
pub use json::generate as generate_json;

/// One artifact and what rating it produced.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub id: ArtifactId,
    pub outcome: RatingOutcome,
}

/// Whether console output uses colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    #[default]
    Auto,
}
