//! Rating orchestration.
//!
//! The [`RatingCoordinator`] is the engine's entry point. For each artifact it collects a metadata snapshot,
//! runs every registered metric on the [`MetricExecutor`], combines the results into a net score, and records
//! the outcome in the [`RatingStore`].
//!
//! # Lifecycle
//!
//! A rating record starts out [`RatingStatus::Pending`] and moves exactly once to one of:
//!
//! - [`RatingStatus::Completed`]: the net score reached the pass threshold
//! - [`RatingStatus::Disqualified`]: the net score fell short of the pass threshold
//! - [`RatingStatus::Failed`]: the metadata could not be collected or the computation was lost
//!
//! Terminal records are kept until they are re-rated, which starts a new cycle, or forgotten.

mod aggregate;
mod coordinator;
mod executor;
mod record;
mod store;

pub use aggregate::{aggregate, net_score};
pub use coordinator::RatingCoordinator;
pub use executor::MetricExecutor;
pub use record::{RatingOutcome, RatingResult, RatingSnapshot, RatingStatus, Terminal, Unavailability};
pub use store::{Admission, CycleWatch, RatingStore};
