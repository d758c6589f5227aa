//! Metric computation over artifact metadata.
//!
//! Each metric implements the [`Metric`] trait: a name plus a pure function from a [`Metadata`](crate::facts::Metadata)
//! snapshot to a [`Measurement`]. [`Metric::score`] wraps the measurement into a [`MetricValue`], clamping it into
//! `[0, 1]` and recording how long it took.
//!
//! # Implementation Model
//!
//! Most metrics produce a single [`Score::Scalar`]. `size_score` produces a [`Score::ByTarget`] map with one
//! entry per deployment target; when a net score is computed, such maps collapse to their mean.
//!
//! Some metrics attach [`Findings`] to their value: the license metric reports its decision and restrictions,
//! and the README risk metric reports its summary and risk flags.
//!
//! The built-in metrics are assembled by [`MetricRegistry::standard`]. Their names double as keys in the
//! [`weights::WEIGHTS`] table used to compute net scores.

mod metric;
mod metric_value;
mod registry;
pub mod scorers;
pub mod text_signals;
pub mod weights;

pub use metric::{Measurement, Metric};
pub use metric_value::{Findings, MetricValue, Score, clamp_unit};
pub use registry::MetricRegistry;
