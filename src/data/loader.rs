use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::error::{QuakeError, Result};

use super::model::{FeatureCollection, QuakeDataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a feed from a local path or an `http(s)://` URL.
///
/// Expected layout (USGS GeoJSON summary feed):
///
/// ```json
/// {
///   "type": "FeatureCollection",
///   "features": [
///     {
///       "type": "Feature",
///       "properties": { "mag": 2.3, "place": "...", "time": 1700000000000, "url": "..." },
///       "geometry": { "type": "Point", "coordinates": [-117.5, 35.7, 8.2] },
///       "id": "ci40000000"
///     }
///   ]
/// }
/// ```
pub fn load_source(source: &str) -> Result<QuakeDataset> {
    if is_url(source) {
        fetch_url(source)
    } else {
        load_file(Path::new(source))
    }
}

pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read and parse a GeoJSON file from disk.
pub fn load_file(path: &Path) -> Result<QuakeDataset> {
    let text = std::fs::read_to_string(path).map_err(|source| QuakeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_geojson(&path.display().to_string(), &text)
}

/// Fetch a feed over HTTP. Non-success statuses become [`QuakeError::Http`].
pub fn fetch_url(url: &str) -> Result<QuakeDataset> {
    let resp = reqwest::blocking::get(url)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(QuakeError::Http {
            status: status.as_u16(),
        });
    }

    let text = resp.text()?;
    parse_geojson(url, &text)
}

/// Parse a FeatureCollection body. Features are kept in feed order.
pub fn parse_geojson(source: &str, text: &str) -> Result<QuakeDataset> {
    let collection: FeatureCollection = serde_json::from_str(text)?;
    Ok(QuakeDataset::from_features(source, collection.features))
}

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// Load `source` on a worker thread; the UI polls the returned receiver.
///
/// `limit` keeps only the first N features of the feed.
pub fn spawn_load(source: String, limit: Option<usize>) -> Receiver<Result<QuakeDataset>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        log::debug!("Loading {source}");
        let result = load_source(&source).map(|ds| match limit {
            Some(n) => ds.truncated(n),
            None => ds,
        });
        // Receiver is gone when a newer load replaced this one.
        let _ = tx.send(result);
    });
    rx
}
