use crate::Result;
use crate::facts::bundle;
use crate::facts::{ArtifactRef, Metadata, MetadataSource};
use ohno::{EnrichableExt, IntoAppError};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Log target for collector
const LOG_TARGET: &str = " collector";

/// Gathers the metadata snapshot used to rate one artifact.
///
/// The collector asks its source for the artifact's metadata and, when the snapshot does not list the
/// artifact's files, tries to fill the listing from the packaged bundle. Bundle problems never fail collection.
#[derive(Debug)]
pub struct Collector<S> {
    source: Arc<S>,
}

impl<S> Clone for Collector<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: MetadataSource> Collector<S> {
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Collect the metadata snapshot for `artifact`.
    pub async fn collect(&self, artifact: &ArtifactRef) -> Result<Metadata> {
        let mut metadata = self
            .source
            .fetch_metadata(artifact)
            .await
            .map_err(|e| e.enrich_with(|| format!("could not fetch metadata for '{artifact}'")))?;

        if metadata.repo_files.is_empty() {
            match self.list_bundle_files(artifact).await {
                Ok(files) => {
                    log::debug!(target: LOG_TARGET, "Listed {} files from the bundle of {artifact}", files.len());
                    metadata.repo_files = files;
                }
                Err(e) => {
                    log::debug!(target: LOG_TARGET, "No file listing for {artifact}: {e:#}");
                }
            }
        }

        Ok(metadata)
    }

    async fn list_bundle_files(&self, artifact: &ArtifactRef) -> Result<BTreeSet<String>> {
        let bytes = self.source.download_artifact_bytes(&artifact.id(), artifact.version()).await?;

        tokio::task::spawn_blocking(move || bundle::list_files(bytes.as_ref()))
            .await
            .into_app_err("bundle listing task panicked")?
    }
}
