//! Core module - dataset generation, filtering and aggregation

pub mod analytics;
pub mod cache;
pub mod config;
pub mod dimensions;
pub mod filter;
pub mod format;
pub mod generator;
pub mod rng;

pub use analytics::{Kpi, Pivot, ValueMode};
pub use cache::{dataset_digest, DataCache, RecordSource};
pub use config::{Config, ConfigError};
pub use dimensions::Tables;
pub use filter::{filter_records, FieldFilter, FilterState};
pub use generator::{GenerateError, Generator, ReseedPolicy};
pub use rng::Lcg;
