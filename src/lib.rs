//! Market Lens: synthetic market-research data and the aggregations behind
//! a segment-analysis dashboard
//!
//! The engine generates a deterministic, fully-crossed dataset of market
//! records, filters it by any facet and reduces it into year × facet pivots,
//! growth series and regional attractiveness metrics.

pub mod cli;
pub mod core;
pub mod entities;
