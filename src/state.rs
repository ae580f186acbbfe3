use std::sync::mpsc::{Receiver, TryRecvError};

use crate::color::MarkerStyle;
use crate::config::ViewerConfig;
use crate::data::bins::{build_buckets, Bucket, BucketSet};
use crate::data::filter::visible_indices;
use crate::data::loader::spawn_load;
use crate::data::model::{Quake, QuakeDataset};
use crate::data::selection::{range_label, SelectionState};
use crate::error;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded dataset (None until a feed arrives).
    pub dataset: Option<QuakeDataset>,

    /// Buckets for the loaded dataset; None when it had no positive magnitudes.
    pub buckets: Option<BucketSet>,

    /// Slider position and "show all" toggle.
    pub selection: SelectionState,

    /// Indices of features passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Text shown above the slider.
    pub range_label: String,

    /// Feature whose details window is open.
    pub popup: Option<usize>,

    pub marker_style: MarkerStyle,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Pending background load, if any.
    pending: Option<Receiver<error::Result<QuakeDataset>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            marker_style: config.marker_style(),
            config,
            dataset: None,
            buckets: None,
            selection: SelectionState::default(),
            visible_indices: Vec::new(),
            range_label: String::new(),
            popup: None,
            status_message: None,
            pending: None,
        }
    }

    pub fn loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start loading `source` in the background, replacing any pending load.
    pub fn request_load(&mut self, source: String) {
        self.config.source = source.clone();
        self.status_message = None;
        self.pending = Some(spawn_load(source, self.config.limit));
    }

    /// Reload the current source.
    pub fn reload(&mut self) {
        self.request_load(self.config.source.clone());
    }

    /// Take the result of the background load if it has arrived.
    ///
    /// Returns true when the state changed and a repaint is due.
    pub fn poll_load(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                log::error!("Loader thread exited without a result");
                return true;
            }
        };
        self.pending = None;

        match outcome {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} features ({} with positive magnitude) from {}",
                    dataset.len(),
                    dataset.magnitudes.len(),
                    dataset.source
                );
                self.set_dataset(dataset);
            }
            // Logged only; the map keeps its base layer.
            Err(e) => log::error!("Error loading GeoJSON: {e}"),
        }
        true
    }

    /// Ingest a newly loaded dataset: rebuild buckets and reset the selection.
    pub fn set_dataset(&mut self, dataset: QuakeDataset) {
        self.buckets = match build_buckets(&dataset.magnitudes) {
            Ok(set) => {
                log::debug!(
                    "Built {} buckets, bounds {:?}, {} magnitudes below the first",
                    set.len(),
                    set.iter().map(|b| b.min).collect::<Vec<_>>(),
                    set.dropped()
                );
                Some(set)
            }
            Err(e) => {
                log::warn!("{}: {e}; showing all features", dataset.source);
                self.status_message = Some(format!("No magnitudes to bin: {e}"));
                None
            }
        };
        self.dataset = Some(dataset);
        self.selection = SelectionState::default();
        self.popup = None;
        self.on_selection_changed();
    }

    /// Single dispatch for every selection transition: refilter and relabel.
    pub fn on_selection_changed(&mut self) {
        self.visible_indices = match &self.dataset {
            Some(ds) => visible_indices(&ds.features, self.buckets.as_ref(), &self.selection),
            None => Vec::new(),
        };
        self.range_label = self
            .selected_bucket()
            .map(range_label)
            .unwrap_or_default();
        if self.popup.is_some_and(|i| !self.visible_indices.contains(&i)) {
            self.popup = None;
        }
        log::debug!(
            "Selection {:?}: {} visible",
            self.selection,
            self.visible_indices.len()
        );
    }

    pub fn selected_bucket(&self) -> Option<&Bucket> {
        self.buckets.as_ref()?.get(self.selection.index())
    }

    pub fn next_bucket(&mut self) {
        self.selection.next();
        self.on_selection_changed();
    }

    pub fn previous_bucket(&mut self) {
        self.selection.previous();
        self.on_selection_changed();
    }

    pub fn set_slider(&mut self, value: usize) {
        self.selection.set_from_slider(value);
        self.on_selection_changed();
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.selection.set_show_all(show_all);
        self.on_selection_changed();
    }

    /// Features currently on the map, in feed order.
    pub fn visible_quakes(&self) -> Vec<&Quake> {
        match &self.dataset {
            Some(ds) => self
                .visible_indices
                .iter()
                .filter_map(|&i| ds.features.get(i))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn popup_quake(&self) -> Option<&Quake> {
        self.dataset.as_ref()?.features.get(self.popup?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::QuakeProperties;

    fn dataset(mags: &[f64]) -> QuakeDataset {
        let features = mags
            .iter()
            .map(|&m| Quake {
                properties: QuakeProperties {
                    mag: Some(m),
                    ..Default::default()
                },
                ..Default::default()
            })
            .collect();
        QuakeDataset::from_features("test", features)
    }

    fn paired() -> QuakeDataset {
        let mags: Vec<f64> = (1..=8).flat_map(|m| [m as f64, m as f64]).collect();
        dataset(&mags)
    }

    #[test]
    fn new_dataset_selects_the_lowest_bucket() {
        let mut state = AppState::default();
        state.set_dataset(paired());
        assert_eq!(state.selection.index(), 0);
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.range_label, "Magnitude Range: 1 - 2");
    }

    #[test]
    fn navigation_refilters_and_relabels() {
        let mut state = AppState::default();
        state.set_dataset(paired());

        state.previous_bucket();
        assert_eq!(state.visible_indices, vec![14, 15]);
        assert_eq!(state.range_label, "Magnitude Range: 8 - 10");

        state.next_bucket();
        state.next_bucket();
        assert_eq!(state.visible_indices, vec![2, 3]);

        state.set_slider(4);
        assert_eq!(state.visible_indices, vec![8, 9]);

        state.set_show_all(true);
        assert_eq!(state.visible_quakes().len(), 16);
    }

    #[test]
    fn popup_closes_when_its_feature_leaves_the_map() {
        let mut state = AppState::default();
        state.set_dataset(paired());
        state.popup = Some(1);
        assert!(state.popup_quake().is_some());
        state.next_bucket();
        assert_eq!(state.popup, None);
    }

    #[test]
    fn feed_without_magnitudes_shows_everything() {
        let mut state = AppState::default();
        state.set_dataset(dataset(&[0.0, -1.0]));
        assert!(state.buckets.is_none());
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert!(state.range_label.is_empty());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn failed_load_keeps_the_map_usable() {
        let mut state = AppState::default();
        state.request_load("no/such/feed.geojson".into());
        let rx_done = (0..200).any(|_| {
            std::thread::sleep(std::time::Duration::from_millis(10));
            state.poll_load()
        });
        assert!(rx_done);
        assert!(!state.loading());
        assert!(state.dataset.is_none());
        assert!(state.buckets.is_none());
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.status_message, None);
    }
}
