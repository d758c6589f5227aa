use crate::Result;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString, IntoStaticStr};
use url::Url;

/// The kind of artifact being rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, StrumDisplay, EnumString, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Model,
    Dataset,
    Code,
}

/// Stable identifier of an artifact, used to key rating records.
///
/// Ids have the form `<kind>/<name>` or `<kind>/<name>@<version>` and are always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(Box<str>);

impl ArtifactId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A form of the id that is safe to use as a single file name component.
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.0
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '.') { c } else { '_' })
            .collect()
    }
}

impl Display for ArtifactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference to an artifact as supplied by a caller.
///
/// References come either as hosting URLs or in the compact `<kind>:<name>[@<version>]` form:
///
/// - `https://huggingface.co/google/gemma-3-270m`
/// - `https://huggingface.co/datasets/bookcorpus/bookcorpus`
/// - `https://github.com/google-research/bert`
/// - `model:google/gemma-3-270m@1.0`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactRef {
    kind: ArtifactKind,
    name: Box<str>,
    version: Option<Box<str>>,
    url: Option<Url>,
}

impl ArtifactRef {
    #[must_use]
    pub fn new(kind: ArtifactKind, name: impl AsRef<str>, version: Option<&str>) -> Self {
        Self {
            kind,
            name: Box::from(name.as_ref()),
            version: version.map(Box::from),
            url: None,
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.starts_with("http://") || text.starts_with("https://") {
            let url = Url::parse(text).into_app_err_with(|| format!("invalid artifact URL '{text}'"))?;
            return Self::from_url(url);
        }

        let Some((kind, rest)) = text.split_once(':') else {
            bail!("invalid artifact reference '{text}': expected a URL or '<kind>:<name>[@<version>]'");
        };

        let kind = ArtifactKind::from_str(kind).map_err(|_e| app_err!("unknown artifact kind '{kind}' in '{text}'"))?;

        let (name, version) = match rest.rsplit_once('@') {
            Some((name, version)) => (name, Some(version)),
            None => (rest, None),
        };

        if name.is_empty() {
            bail!("invalid artifact reference '{text}': empty name");
        }

        if version.is_some_and(str::is_empty) {
            bail!("invalid artifact reference '{text}': empty version");
        }

        Ok(Self::new(kind, name, version))
    }

    fn from_url(url: Url) -> Result<Self> {
        let segments: Vec<_> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let (kind, name) = match url.host_str() {
            Some("huggingface.co" | "www.huggingface.co") => match segments.as_slice() {
                ["datasets", owner, name, ..] => (ArtifactKind::Dataset, format!("{owner}/{name}")),
                ["datasets", name] => (ArtifactKind::Dataset, (*name).to_string()),
                [owner, name, ..] => (ArtifactKind::Model, format!("{owner}/{name}")),
                [name] => (ArtifactKind::Model, (*name).to_string()),
                _ => bail!("invalid Hugging Face URL: {url}"),
            },
            Some("github.com" | "www.github.com") => match segments.as_slice() {
                [owner, repo, ..] => (ArtifactKind::Code, format!("{owner}/{}", repo.trim_end_matches(".git"))),
                _ => bail!("invalid repository URL format: {url}"),
            },
            _ => bail!("unsupported artifact host: {url}"),
        };

        Ok(Self {
            kind,
            name: Box::from(name),
            version: None,
            url: Some(url),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[must_use]
    pub const fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    #[must_use]
    pub fn id(&self) -> ArtifactId {
        let id = match &self.version {
            Some(version) => format!("{}/{}@{version}", self.kind, self.name),
            None => format!("{}/{}", self.kind, self.name),
        };
        ArtifactId(id.to_ascii_lowercase().into_boxed_str())
    }
}

impl Display for ArtifactRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.url {
            Some(url) => write!(f, "{url}"),
            None => match &self.version {
                Some(version) => write!(f, "{}:{}@{version}", self.kind, self.name),
                None => write!(f, "{}:{}", self.kind, self.name),
            },
        }
    }
}

impl FromStr for ArtifactRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        Self::parse(s).map_err(|e| e.to_string())
    }
}
