/// Data layer: core types, loading, filtering and chart derivation.
///
/// Architecture:
/// ```text
///  data-x3jzk.csv
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  blake3(content) → Arc<ExposureDataset>
///   └──────────┘
///        │ miss
///        ▼
///   ┌──────────┐
///   │  loader   │  clean cells, coerce scores, drop bad rows
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ ExposureDataset │  Vec<Record>, distinct groups / levels
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  top-N, exposure distribution, scatter points
///   └──────────┘
/// ```

pub mod cache;
pub mod derive;
pub mod filter;
pub mod loader;
pub mod model;
