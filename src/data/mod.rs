/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → Table (Resolution derived once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<LaptopRecord>, read-only after load
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  equality predicate → matching row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  AggregationRequest → AggregationResult
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use aggregate::{AggFunc, AggregationRequest, AggregationResult, SortKey, SortOrder};
pub use error::{AggregateError, DataSourceError};
pub use filter::Predicate;
pub use model::{Column, ColumnKind, LaptopRecord, Table, Value};
