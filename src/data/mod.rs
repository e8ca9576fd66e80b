/// Data layer: core types, loading, filtering and metrics.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table → Dataset (schema check, numeric coercion)
///   └──────────┘
///        │            ┌───────┐
///        ├───────────▶│ cache │  memoized by path + mtime + size
///        ▼            └───────┘
///   ┌──────────┐
///   │  filter   │  Month ∧ Branch selections → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ metrics   │  revenue, achievement %, movements, billing, tonnage
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod schema;
