//! CLI command implementations

pub mod breakdown;
pub mod bubble;
pub mod completions;
pub mod dashboard;
pub mod fingerprint;
pub mod growth;
pub mod hierarchy;
pub mod kpi;
pub mod options;
pub mod pivot;
pub mod records;
pub mod waterfall;
