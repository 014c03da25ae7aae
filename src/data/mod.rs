/// Data layer: table ingestion, normalization, and the document model.
///
/// Architecture:
/// ```text
///     .csv
///       │
///       ▼
///  ┌──────────┐
///  │  table    │  parse file → RawTable (2D string grid)
///  └──────────┘
///       │
///       ▼
///  ┌──────────────┐
///  │  normalize    │  delete / orient / extract / coerce
///  └──────────────┘
///       │
///       ▼
///  ┌──────────┐      ┌──────────┐
///  │  model    │ ───▶ │  output   │  Dataset + encoded labels → .json
///  └──────────┘      └──────────┘
/// ```
///
/// The viewer re-enters through `loader`, which reads the written
/// documents back.
pub mod encode;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod output;
pub mod table;
