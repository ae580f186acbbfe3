use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::bins::BUCKET_COUNT;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` colours running from cool to hot hues (240° → 0°).
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    let steps = (n.max(2) - 1) as f32;
    (0..n)
        .map(|i| {
            let hue = 240.0 * (1.0 - i as f32 / steps);
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// One swatch per magnitude bucket, for the legend table.
pub fn bucket_palette() -> Vec<Color32> {
    generate_palette(BUCKET_COUNT)
}

// ---------------------------------------------------------------------------
// Marker styling: magnitude → radius, fill
// ---------------------------------------------------------------------------

/// How the map turns a magnitude into a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// radius = `radius_scale * mag ^ radius_exponent`
    pub radius_scale: f32,
    pub radius_exponent: f32,
    /// `(threshold, colour)` pairs, highest threshold first; a magnitude
    /// strictly above a threshold takes its colour.
    pub thresholds: Vec<(f64, Color32)>,
    pub default_fill: Color32,
    pub stroke: Color32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius_scale: 2.0,
            radius_exponent: 1.0,
            thresholds: vec![(5.0, Color32::RED), (3.0, Color32::from_rgb(255, 165, 0))],
            default_fill: Color32::YELLOW,
            stroke: Color32::BLACK,
        }
    }
}

impl MarkerStyle {
    pub fn radius(&self, magnitude: f64) -> f32 {
        let m = magnitude.max(0.0) as f32;
        (self.radius_scale * m.powf(self.radius_exponent)).max(1.0)
    }

    pub fn fill(&self, magnitude: f64) -> Color32 {
        self.thresholds
            .iter()
            .find(|(t, _)| magnitude > *t)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds() {
        let style = MarkerStyle::default();
        assert_eq!(style.fill(5.5), Color32::RED);
        assert_eq!(style.fill(5.0), Color32::from_rgb(255, 165, 0));
        assert_eq!(style.fill(3.0), Color32::YELLOW);
    }

    #[test]
    fn radius_scales_linearly_by_default() {
        let style = MarkerStyle::default();
        assert_eq!(style.radius(4.0), 8.0);
        // tiny or negative magnitudes still get a visible dot
        assert_eq!(style.radius(-1.0), 1.0);
    }

    #[test]
    fn palette_has_one_colour_per_bucket() {
        let p = bucket_palette();
        assert_eq!(p.len(), BUCKET_COUNT);
        assert_ne!(p[0], p[BUCKET_COUNT - 1]);
        assert!(generate_palette(0).is_empty());
    }
}
