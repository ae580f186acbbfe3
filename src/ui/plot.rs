use std::collections::BTreeMap;

use eframe::egui::{Color32, Pos2, Ui};
use egui_plot::{Line, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, Points};

use crate::config::MAP_CENTER;
use crate::state::AppState;

/// Extra pixels around a marker that still count as a click on it.
const CLICK_SLACK: f32 = 4.0;

// ---------------------------------------------------------------------------
// Map plot (central panel)
// ---------------------------------------------------------------------------

/// Render the earthquake map in the central panel.
///
/// Returns the feature index of a marker the user clicked, if any.
pub fn quake_map(ui: &mut Ui, state: &AppState, recenter: bool) -> Option<usize> {
    let [half_lon, half_lat] = state.config.initial_half_extent();
    let [center_lat, center_lon] = MAP_CENTER;
    let style = &state.marker_style;

    let response = Plot::new("quake_map")
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|_, p| format!("lon {:.2}\nlat {:.2}", p.x, p.y))
        .show(ui, |plot_ui| {
            if recenter {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [center_lon - half_lon, center_lat - half_lat],
                    [center_lon + half_lon, center_lat + half_lat],
                ));
            }

            // Base layer: the world frame and the equator.
            plot_ui.line(
                Line::new(PlotPoints::new(vec![
                    [-180.0, -90.0],
                    [180.0, -90.0],
                    [180.0, 90.0],
                    [-180.0, 90.0],
                    [-180.0, -90.0],
                ]))
                .color(Color32::DARK_GRAY)
                .width(1.0),
            );
            plot_ui.line(
                Line::new(PlotPoints::new(vec![[-180.0, 0.0], [180.0, 0.0]]))
                    .color(Color32::from_gray(70))
                    .width(0.5),
            );

            let Some(ds) = &state.dataset else {
                return None;
            };

            let mut markers = Vec::with_capacity(state.visible_indices.len());
            let mut styled = Vec::with_capacity(state.visible_indices.len());
            for &idx in &state.visible_indices {
                let quake = &ds.features[idx];
                let Some(pos) = quake.position() else {
                    continue;
                };
                let mag = quake.magnitude().unwrap_or(0.0);
                let radius = style.radius(mag);
                styled.push((pos, radius, style.fill(mag).gamma_multiply(0.8)));

                let screen = plot_ui.screen_from_plot(PlotPoint::new(pos[0], pos[1]));
                markers.push((idx, screen, radius));
            }

            let groups = group_markers(styled);
            // All outlines first so every fill sits on top of them.
            for group in &groups {
                plot_ui.points(
                    Points::new(group.positions.clone())
                        .shape(MarkerShape::Circle)
                        .radius(group.radius + 1.0)
                        .color(style.stroke)
                        .filled(true),
                );
            }
            for group in groups {
                plot_ui.points(
                    Points::new(group.positions)
                        .shape(MarkerShape::Circle)
                        .radius(group.radius)
                        .color(group.fill)
                        .filled(true),
                );
            }

            let response = plot_ui.response();
            if !response.clicked() {
                return None;
            }
            let click = response.interact_pointer_pos()?;
            nearest_marker(markers, click)
        });

    response.inner
}

/// Markers drawn as one plot series: same fill, radius rounded to half a pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGroup {
    pub radius: f32,
    pub fill: Color32,
    pub positions: Vec<[f64; 2]>,
}

/// Bucket `(position, radius, fill)` markers into shared series.
///
/// Groups come out ordered by radius, then colour, so small markers are
/// drawn under large ones.
pub fn group_markers(
    markers: impl IntoIterator<Item = ([f64; 2], f32, Color32)>,
) -> Vec<MarkerGroup> {
    let mut groups: BTreeMap<(u32, [u8; 4]), MarkerGroup> = BTreeMap::new();
    for (pos, radius, fill) in markers {
        let half_px = (radius * 2.0).round().max(0.0) as u32;
        groups
            .entry((half_px, fill.to_array()))
            .or_insert_with(|| MarkerGroup {
                radius: half_px as f32 / 2.0,
                fill,
                positions: Vec::new(),
            })
            .positions
            .push(pos);
    }
    groups.into_values().collect()
}

/// Index of the marker closest to `click` whose (slackened) disc contains it.
pub fn nearest_marker(
    markers: impl IntoIterator<Item = (usize, Pos2, f32)>,
    click: Pos2,
) -> Option<usize> {
    markers
        .into_iter()
        .filter_map(|(idx, center, radius)| {
            let d = center.distance(click);
            (d <= radius + CLICK_SLACK).then_some((idx, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_sharing_size_and_fill_become_one_series() {
        let red = Color32::RED;
        let yellow = Color32::YELLOW;
        let groups = group_markers(vec![
            ([0.0, 0.0], 8.0, red),
            ([1.0, 1.0], 8.1, red),
            ([2.0, 2.0], 8.0, yellow),
            ([3.0, 3.0], 2.0, yellow),
            ([4.0, 4.0], 8.0, red),
        ]);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].radius, 2.0);
        assert_eq!(groups[0].positions, vec![[3.0, 3.0]]);

        let big_red = groups
            .iter()
            .find(|g| g.fill == red && g.radius == 8.0)
            .unwrap();
        assert_eq!(big_red.positions, vec![[0.0, 0.0], [1.0, 1.0], [4.0, 4.0]]);

        let total: usize = groups.iter().map(|g| g.positions.len()).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn click_picks_the_closest_marker_in_reach() {
        let markers = vec![
            (3, Pos2::new(10.0, 10.0), 6.0),
            (7, Pos2::new(16.0, 10.0), 6.0),
            (9, Pos2::new(100.0, 100.0), 20.0),
        ];
        assert_eq!(nearest_marker(markers.clone(), Pos2::new(15.0, 10.0)), Some(7));
        assert_eq!(nearest_marker(markers.clone(), Pos2::new(9.0, 9.0)), Some(3));
        assert_eq!(nearest_marker(markers, Pos2::new(50.0, 50.0)), None);
    }
}
