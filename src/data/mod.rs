/// Data layer: typed columns, channels, and channel sets.
///
/// Architecture:
/// ```text
///  .csv / .json / in-memory columns
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse input → Table (per-column inferred types)
///   └──────────┘
///        │  select x_col / y_col, normalize datetimes
///        ▼
///   ┌──────────┐
///   │ Channel   │  named input dims + output + train mask
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ ChannelSet  │  ordered, name lookup, aggregate views
///   └────────────┘
/// ```
pub mod channel;
pub mod column;
pub mod loader;
pub mod set;
