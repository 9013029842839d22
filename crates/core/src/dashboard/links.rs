//! Download links for located artifacts.

use serde::Serialize;

use crate::artifacts::Artifact;

/// Turns artifact file names into links under a base URL.
///
/// The base URL comes from the caller (request context or configuration);
/// the engine never guesses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url/file_name`, with the file name percent-encoded.
    pub fn link_for(&self, artifact: &Artifact) -> String {
        format!(
            "{}/{}",
            self.base_url,
            urlencoding::encode(&artifact.file_name)
        )
    }

    pub fn optional_link(&self, artifact: Option<&Artifact>) -> Option<String> {
        artifact.map(|a| self.link_for(a))
    }
}

/// Links for everything the dashboard offers for download.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLinks {
    pub positions: Option<String>,
    pub trades: Option<String>,
    pub equity_image: Option<String>,
    pub pnl_image: Option<String>,
}
