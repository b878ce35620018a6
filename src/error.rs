//! Typed errors for data ingestion
//!
//! Everything else in the app reports through `anyhow`. Ingestion failures
//! get their own type because the viewer keeps them as a distinct state.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("loader stopped before reporting a result")]
    Interrupted,
}
