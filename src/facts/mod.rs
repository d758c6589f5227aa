//! Artifact references and the metadata snapshots metrics are computed from.
//!
//! A [`MetadataSource`] turns an [`ArtifactRef`] into a [`Metadata`] snapshot. How a source obtains its data is
//! up to the source; the [`Collector`] wraps a source and fills in the file listing from packaged bundles when
//! the snapshot lacks one. [`DirectorySource`] is a file-backed source used by the command-line tool and tests.

mod artifact_ref;
mod bundle;
mod collector;
mod directory_source;
mod metadata;
mod source;

pub use artifact_ref::{ArtifactId, ArtifactKind, ArtifactRef};
pub use collector::Collector;
pub use directory_source::DirectorySource;
pub use metadata::{CommitStat, LineageEntry, Metadata, VcsStats};
pub use source::MetadataSource;
