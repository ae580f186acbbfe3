/// Data layer: feed loading, magnitude binning, and filtering.
///
/// Architecture:
/// ```text
///  .geojson file / http(s) URL
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse FeatureCollection → QuakeDataset
///   └──────────┘
///        │  positive magnitudes
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │   bins    │ ◀── │ quantile  │  8 percentile boundaries
///   └──────────┘     └──────────┘
///        │  BucketSet
///        ▼
///   ┌──────────┐
///   │  filter   │  SelectionState → visible features
///   └──────────┘
/// ```

pub mod bins;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod quantile;
pub mod selection;
