use clap::Parser;

use crate::color::MarkerStyle;

/// Feed read when no source is given on the command line.
pub const DEFAULT_SOURCE: &str = "./data/all_month.geojson";

/// Initial map center, `[lat, lon]`.
pub const MAP_CENTER: [f64; 2] = [20.0, 0.0];

pub const DEFAULT_ZOOM: u8 = 2;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Step through earthquake magnitude buckets on a map.
#[derive(Debug, Clone, Parser)]
#[command(name = "quake-slider", version, about)]
pub struct ViewerConfig {
    /// GeoJSON feed: a file path or an http(s) URL.
    #[arg(default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Only keep the first N features of the feed.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Initial map zoom (1 shows the whole globe; each step halves the span).
    #[arg(short, long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    /// Marker radius per unit of magnitude.
    #[arg(long, default_value_t = MarkerStyle::default().radius_scale)]
    pub radius_scale: f32,

    /// Exponent applied to magnitude before scaling the marker radius.
    #[arg(long, default_value_t = MarkerStyle::default().radius_exponent)]
    pub radius_exponent: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let style = MarkerStyle::default();
        Self {
            source: DEFAULT_SOURCE.to_string(),
            limit: None,
            zoom: DEFAULT_ZOOM,
            radius_scale: style.radius_scale,
            radius_exponent: style.radius_exponent,
        }
    }
}

impl ViewerConfig {
    pub fn marker_style(&self) -> MarkerStyle {
        MarkerStyle {
            radius_scale: self.radius_scale,
            radius_exponent: self.radius_exponent,
            ..MarkerStyle::default()
        }
    }

    /// Half-width and half-height (degrees) of the initial view.
    ///
    /// Zoom 1 spans the full 360° of longitude; each further level halves it.
    pub fn initial_half_extent(&self) -> [f64; 2] {
        let lon_span = 360.0 / 2f64.powi(i32::from(self.zoom.max(1)) - 1);
        [lon_span / 2.0, (lon_span / 4.0).min(90.0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_bundled_feed() {
        let cfg = ViewerConfig::try_parse_from(["quake-slider"]).unwrap();
        assert_eq!(cfg.source, DEFAULT_SOURCE);
        assert_eq!(cfg.limit, None);
        assert_eq!(cfg.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn source_and_limit_from_args() {
        let cfg = ViewerConfig::try_parse_from([
            "quake-slider",
            "https://example.org/feed.geojson",
            "--limit",
            "100",
        ])
        .unwrap();
        assert_eq!(cfg.source, "https://example.org/feed.geojson");
        assert_eq!(cfg.limit, Some(100));
    }

    #[test]
    fn zoom_halves_the_view() {
        let mut cfg = ViewerConfig::default();
        cfg.zoom = 2;
        assert_eq!(cfg.initial_half_extent(), [90.0, 45.0]);
        cfg.zoom = 1;
        assert_eq!(cfg.initial_half_extent(), [180.0, 90.0]);
    }
}
