use crate::Result;
use crate::facts::{ArtifactId, ArtifactRef, Metadata, MetadataSource};
use bytes::Bytes;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, bail};
use std::fs;
use std::io;

const LOG_TARGET: &str = " directory";

/// A metadata source backed by snapshot files in a directory.
///
/// For an artifact whose id is `model/google/gemma`, the source looks for `model_google_gemma.json`,
/// `model_google_gemma.yaml`, or `model_google_gemma.yml`, and for a `model_google_gemma.tar.gz` bundle.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: Utf8PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    fn load_snapshot(dir: &Utf8Path, id: &ArtifactId) -> Result<Metadata> {
        let stem = id.file_stem();

        for extension in ["json", "yaml", "yml"] {
            let path = dir.join(format!("{stem}.{extension}"));
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e).into_app_err_with(|| format!("reading metadata snapshot {path}")),
            };

            log::debug!(target: LOG_TARGET, "Loading metadata for {id} from {path}");

            return if extension == "json" {
                serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON metadata snapshot {path}"))
            } else {
                serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML metadata snapshot {path}"))
            };
        }

        bail!("no metadata snapshot for '{id}' in {dir}")
    }
}

impl MetadataSource for DirectorySource {
    async fn fetch_metadata(&self, artifact: &ArtifactRef) -> Result<Metadata> {
        let dir = self.dir.clone();
        let id = artifact.id();

        tokio::task::spawn_blocking(move || Self::load_snapshot(&dir, &id))
            .await
            .into_app_err("metadata loading task panicked")?
    }

    async fn download_artifact_bytes(&self, id: &ArtifactId, _version: Option<&str>) -> Result<Bytes> {
        let path = self.dir.join(format!("{}.tar.gz", id.file_stem()));

        tokio::task::spawn_blocking(move || fs::read(&path).map(Bytes::from).into_app_err_with(|| format!("reading artifact bundle {path}")))
            .await
            .into_app_err("bundle loading task panicked")?
    }
}
