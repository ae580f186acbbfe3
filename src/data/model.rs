use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GeoJSON wire types (USGS earthquake feed layout)
// ---------------------------------------------------------------------------

/// Top-level `FeatureCollection`. Unknown members (`metadata`, `bbox`) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Quake>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct QuakeProperties {
    /// Magnitude; the feed publishes `null` for some events.
    #[serde(default)]
    pub mag: Option<f64>,
    #[serde(default)]
    pub place: Option<String>,
    /// Origin time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Geometry {
    /// `[longitude, latitude, depth_km]`
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Quake – one feature of the collection
// ---------------------------------------------------------------------------

/// A single earthquake event. The binning code only reads its magnitude.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Quake {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: QuakeProperties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Quake {
    /// Raw magnitude as published.
    pub fn magnitude(&self) -> Option<f64> {
        self.properties.mag
    }

    /// Magnitude if it takes part in binning (finite and strictly positive).
    pub fn binnable_magnitude(&self) -> Option<f64> {
        self.properties.mag.filter(|m| m.is_finite() && *m > 0.0)
    }

    fn coordinate(&self, i: usize) -> Option<f64> {
        self.geometry.as_ref()?.coordinates.get(i).copied()
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinate(0)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinate(1)
    }

    /// Depth in kilometres.
    pub fn depth(&self) -> Option<f64> {
        self.coordinate(2)
    }

    /// `[lon, lat]`, when the geometry has both.
    pub fn position(&self) -> Option<[f64; 2]> {
        Some([self.longitude()?, self.latitude()?])
    }

    pub fn place(&self) -> &str {
        self.properties.place.as_deref().unwrap_or("Unknown location")
    }

    pub fn time(&self) -> Option<DateTime<Local>> {
        let ms = self.properties.time?;
        Local.timestamp_millis_opt(ms).single()
    }
}

impl fmt::Display for Quake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.magnitude() {
            Some(m) => write!(f, "M {m} – {}", self.place()),
            None => write!(f, "M ? – {}", self.place()),
        }
    }
}

// ---------------------------------------------------------------------------
// QuakeDataset – the loaded feed
// ---------------------------------------------------------------------------

/// All features of one feed plus the magnitudes that feed the bin builder.
#[derive(Debug, Clone, Default)]
pub struct QuakeDataset {
    /// Where the feed came from (path or URL), for the status line.
    pub source: String,
    pub features: Vec<Quake>,
    /// Positive magnitudes in feature order.
    pub magnitudes: Vec<f64>,
}

impl QuakeDataset {
    pub fn from_features(source: impl Into<String>, features: Vec<Quake>) -> Self {
        let magnitudes = features
            .iter()
            .filter_map(Quake::binnable_magnitude)
            .collect();
        QuakeDataset {
            source: source.into(),
            features,
            magnitudes,
        }
    }

    /// Keep only the first `limit` features.
    pub fn truncated(self, limit: usize) -> Self {
        if limit >= self.features.len() {
            return self;
        }
        let mut features = self.features;
        features.truncate(limit);
        Self::from_features(self.source, features)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
