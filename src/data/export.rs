use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{QuakeError, Result};

use super::model::Quake;

// ---------------------------------------------------------------------------
// CSV export of the visible features
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct QuakeRow<'a> {
    id: &'a str,
    time: Option<String>,
    mag: Option<f64>,
    place: &'a str,
    longitude: Option<f64>,
    latitude: Option<f64>,
    depth_km: Option<f64>,
    url: &'a str,
}

impl<'a> From<&'a Quake> for QuakeRow<'a> {
    fn from(q: &'a Quake) -> Self {
        QuakeRow {
            id: q.id.as_deref().unwrap_or(""),
            time: q.time().map(|t| t.to_rfc3339()),
            mag: q.magnitude(),
            place: q.place(),
            longitude: q.longitude(),
            latitude: q.latitude(),
            depth_km: q.depth(),
            url: q.properties.url.as_deref().unwrap_or(""),
        }
    }
}

/// Write `quakes` as CSV with a header row.
pub fn write_csv<W: Write>(writer: W, quakes: &[&Quake]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for q in quakes {
        wtr.serialize(QuakeRow::from(*q))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn export_csv(path: &Path, quakes: &[&Quake]) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|source| QuakeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(file, quakes)
}
