//! Data layer: raw tables, typed samples, and the reshaped grid.
//!
//! Architecture:
//! ```text
//!  coords<N>.csv   soln<N>.csv   group<N>.csv
//!        │              │              │
//!        ▼              ▼              ▼
//!   ┌──────────────────────────────────────┐
//!   │  loader   parse file → NumericTable   │
//!   └──────────────────────────────────────┘
//!        │              │              │
//!        ▼              ▼              ▼
//!   ┌──────────────────────┐     ┌──────────┐
//!   │ reshape  → Grid (X,Y,Z)│     │  group    │ → GroupData
//!   └──────────────────────┘     └──────────┘
//! ```

pub mod group;
pub mod loader;
pub mod model;
pub mod reshape;
