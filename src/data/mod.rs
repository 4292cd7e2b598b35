/// Data layer: distance tables, tabulation, persistence.
///
/// Architecture:
/// ```text
///   RedshiftGrid + CosmologyParameters
///        │
///        ▼
///   ┌──────────┐
///   │ sampler   │  evaluate D_A, D_C per z → DistanceTables
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐        .txt / .csv / .json / .parquet
///   │ writer    │  ──▶  one file per DistanceKind
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ loader    │  parse file → DistanceTable
///   └──────────┘
/// ```

pub mod format;
pub mod loader;
pub mod model;
pub mod sampler;
pub mod writer;
