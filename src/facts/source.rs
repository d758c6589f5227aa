use crate::Result;
use crate::facts::{ArtifactId, ArtifactRef, Metadata};
use bytes::Bytes;
use ohno::app_err;

/// A place metadata snapshots come from.
///
/// Implementations may scrape hosting APIs, read a registry database, or load files; the engine only relies on
/// this interface. Any error returned here is treated as a failure to rate the artifact.
pub trait MetadataSource: Send + Sync + 'static {
    /// Fetch the metadata snapshot for an artifact.
    fn fetch_metadata(&self, artifact: &ArtifactRef) -> impl Future<Output = Result<Metadata>> + Send;

    /// Download the packaged contents of an artifact as a gzip-compressed tarball.
    ///
    /// Sources that cannot supply packaged contents keep the default, which always fails.
    fn download_artifact_bytes(&self, id: &ArtifactId, version: Option<&str>) -> impl Future<Output = Result<Bytes>> + Send {
        let message = format!(
            "artifact bundles are not available for '{id}' (version {})",
            version.unwrap_or("latest")
        );
        async move { Err(app_err!("{message}")) }
    }
}
