//! Data layer: core types, loading, and the two chart queries.
//!
//! Architecture:
//! ```text
//!  spacex_launch_dash.csv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse + validate → LaunchDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ LaunchDataset │  Vec<LaunchRecord>, site / booster indices
//!   └───────────────┘
//!        │                         │
//!        ▼                         ▼
//!   ┌──────────┐             ┌──────────┐
//!   │ outcomes  │ → PieChart  │  filter   │ → ScatterChart
//!   └──────────┘             └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod filter;
pub mod outcomes;
