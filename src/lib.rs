//! artifact-rank crate
//!
//! This crate holds the rating engine behind the `artifact-rank` tool: metadata collection, the metric registry,
//! the concurrent metric executor, the single-flight rating coordinator, and the license compatibility analyzer.

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod config;

#[doc(hidden)]
pub mod facts;

#[doc(hidden)]
pub mod license;

#[doc(hidden)]
pub mod metrics;

#[doc(hidden)]
pub mod rating;

#[doc(hidden)]
pub mod reports;
