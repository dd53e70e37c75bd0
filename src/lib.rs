//! In-memory aggregation and search engine for the public AI procurement
//! dashboard.
//!
//! `appalti-core` loads a dataset of contracts once into an immutable
//! [`record::RecordStore`] and derives everything the dashboard shows from
//! it: single-pass group-by aggregates, stable top-N rankings, headline
//! KPIs, substring search with highlighting, and sector filtering. Every
//! operation is synchronous and deterministic.

pub mod aggregation;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod format;
pub mod kpi;
pub mod query;
pub mod record;
pub mod types;

pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use record::{ContractRecord, RecordStore};
