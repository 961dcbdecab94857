//! # Chainboard: Supply-Chain ETL + OTIF Analytics Dashboard
//!
//! Chainboard ingests a flat supply-chain CSV, normalizes it into five
//! relational tables, and serves an interactive dashboard computing
//! on-time-in-full (OTIF) delivery metrics.
//!
//! ## Pipeline
//!
//! ```text
//! CSV -> extract -> transform -> load -> MySQL
//!                                          |
//!                 dashboard <- metrics <---+
//! ```
//!
//! - **extract**: CSV file → [`RawTable`], headers trimmed.
//! - **transform**: pure projection into five normalized row sets; products
//!   and suppliers deduplicated by natural key.
//! - **load**: one all-or-nothing transaction; products upserted by SKU,
//!   everything else plain inserts.
//! - **metrics**: left joins on SKU plus per-transport-mode median shipping
//!   baselines → `on_time` / `in_full` / `otif` per sale.
//! - **dashboard**: axum server over the in-memory metric set with three
//!   categorical filters, a KPI block, and four grouped bar charts.
//!
//! The whole pipeline is batch and single-run: no concurrent writers, no
//! schema migration versioning, no incremental refresh.

pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod extract;
pub mod load;
pub mod metrics;
pub mod models;
pub mod schema;
pub mod schema_init;
pub mod table;
pub mod transform;

// Re-export key types
pub use config::{Config, DbConfig};
pub use db::{Database, PoolConfig};
pub use error::PipelineError;
pub use extract::read_csv;
pub use load::{load_all, LoadReport};
pub use metrics::{derive_metrics, load_dataset, MetricRow};
pub use table::RawTable;
pub use transform::{transform, NormalizedTables};
