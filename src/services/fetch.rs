//! Raw text retrieval for data sources
//!
//! Sources are file identifiers resolved against a base. An `http(s)://`
//! base is fetched over the network, anything else is a local directory.

use crate::error::IngestError;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved location of a data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Remote(String),
    Local(PathBuf),
}

impl SourceLocation {
    /// Resolve `id` against `base`
    ///
    /// An `id` that is itself a URL is used as is.
    pub fn resolve(base: &str, id: &str) -> Self {
        if is_url(id) {
            return SourceLocation::Remote(id.to_string());
        }
        if is_url(base) {
            let url = if base.ends_with('/') {
                format!("{}{}", base, id)
            } else {
                format!("{}/{}", base, id)
            };
            SourceLocation::Remote(url)
        } else {
            SourceLocation::Local(PathBuf::from(base).join(id))
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocation::Remote(url) => write!(f, "{}", url),
            SourceLocation::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Fetch the raw text behind `location`
pub fn fetch_text(location: &SourceLocation) -> Result<String, IngestError> {
    debug!(%location, "Fetching source text");
    match location {
        SourceLocation::Remote(url) => fetch_remote(url),
        SourceLocation::Local(path) => fs::read_to_string(path).map_err(|source| IngestError::Read {
            path: path.clone(),
            source,
        }),
    }
}

fn fetch_remote(url: &str) -> Result<String, IngestError> {
    let wrap = |source| IngestError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(wrap)?;

    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(wrap)
}
