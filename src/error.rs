use std::path::PathBuf;

use thiserror::Error;

/// Percentile of an empty sample was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot compute a percentile of an empty magnitude sample")]
pub struct EmptyInputError;

/// Everything that can go wrong between "open a feed" and "draw the buckets".
#[derive(Debug, Error)]
pub enum QuakeError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),

    #[error(transparent)]
    EmptyInput(#[from] EmptyInputError),
}

pub type Result<T> = std::result::Result<T, QuakeError>;
