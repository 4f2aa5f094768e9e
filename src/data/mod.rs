/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, payload bounds, site index
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site selector + payload range
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  proportion breakdown, scatter subset
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
