/// Data layer: core types, loading, and the transformation pipeline.
///
/// Architecture:
/// ```text
///  Postgres / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  SELECT * / parse file → RawTable (localized columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ normalize │  rename columns, coerce numerics, drop malformed rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  country selection + inclusive year range
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  combine  │  inner join on (country, year), guarded per-capita
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod pipeline;
