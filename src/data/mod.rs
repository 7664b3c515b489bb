/// Data layer: core types, file I/O, the dataset index, and point lookup.
///
/// Architecture:
/// ```text
///  DEFRA .csv files
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → DataSet
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ repository  │  (pollutant, year) → DataSet index
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  search   │     │  writer   │  DataSet → DEFRA .csv (live slot)
///   └──────────┘     └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod repository;
pub mod search;
pub mod writer;
