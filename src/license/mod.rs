//! License normalization and compatibility analysis.
//!
//! The analyzer is pure and stateless. The rating engine uses it as the body of the `license` metric, and
//! ingestion code can call [`check`] directly to vet an upload before rating it.

mod compatibility;
mod normalize;

pub use compatibility::{LicenseDecision, check};
pub use normalize::{LicenseClass, NO_LICENSE, NormalizedLicense, analyze, normalize};
