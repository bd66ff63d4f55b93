use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    clip::{ClipName, ClipTable},
    error::Result,
};

/// Where a clip's wav bytes come from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ClipSource {
    Path { path: PathBuf },
    Url { url: String },
    #[serde(skip)]
    Bytes(Vec<u8>),
}

impl ClipSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ClipSource::Path { path: path.into() }
    }

    pub fn url(url: impl Into<String>) -> Self {
        ClipSource::Url { url: url.into() }
    }

    pub async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            ClipSource::Path { path } => {
                debug!("Reading clip from {:?}", path);
                Ok(tokio::fs::read(path).await?)
            }
            ClipSource::Url { url } => {
                debug!("Fetching clip from {}", url);
                let bytes = reqwest::get(url).await?.error_for_status()?.bytes().await?;
                Ok(bytes.to_vec())
            }
            ClipSource::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

/// The complete clip mapping handed to the bank. Names without a source stay
/// silent for the lifetime of the bank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipSources(ClipTable<Option<ClipSource>>);

impl ClipSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: ClipName, source: ClipSource) -> Self {
        self.0[name] = Some(source);
        self
    }

    pub fn get(&self, name: ClipName) -> Option<&ClipSource> {
        self.0[name].as_ref()
    }

    pub fn configured(&self) -> impl Iterator<Item = (ClipName, &ClipSource)> {
        self.0
            .iter()
            .filter_map(|(name, source)| source.as_ref().map(|s| (name, s)))
    }
}

impl FromIterator<(ClipName, ClipSource)> for ClipSources {
    fn from_iter<I: IntoIterator<Item = (ClipName, ClipSource)>>(iter: I) -> Self {
        let mut sources = ClipSources::new();
        for (name, source) in iter {
            sources = sources.with(name, source);
        }
        sources
    }
}
