//! Market record - the atomic row of the synthetic dataset

use serde::Serialize;

use crate::entities::segment::{Segment, SegmentDetail};

/// Sales channel family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ChannelType {
    Offline,
    Online,
}

impl ChannelType {
    pub const ALL: [ChannelType; 2] = [ChannelType::Offline, ChannelType::Online];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelType::Offline => "Offline",
            ChannelType::Online => "Online",
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChannelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "offline" => Ok(ChannelType::Offline),
            "online" => Ok(ChannelType::Online),
            _ => Err(format!("Unknown channel type: {}", s)),
        }
    }
}

/// One generated combination of dimension values plus derived metrics
///
/// Dimension values borrow from the static dimension tables, so a full
/// dataset costs no string allocations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecord {
    pub record_id: u32,
    pub year: u16,
    pub region: &'static str,
    pub country: &'static str,

    #[serde(flatten)]
    pub segment: SegmentDetail,

    pub product_type: &'static str,
    pub blade_material: &'static str,
    pub handle_length: &'static str,
    pub application: &'static str,
    pub end_user: &'static str,
    pub distribution_channel_type: ChannelType,
    pub distribution_channel: &'static str,
    pub brand: &'static str,
    pub company: &'static str,

    /// Unit price (USD)
    pub price: f64,
    pub volume_units: u64,
    pub qty: u64,
    /// Price × volume before rounding
    pub revenue: f64,
    /// Revenue scaled by a factor in [0.9, 1.1)
    pub market_value_usd: f64,
    /// Same as `market_value_usd`; kept for chart components keyed on `value`
    pub value: f64,
    pub market_share_pct: f64,
    pub cagr: f64,
    pub yoy_growth: f64,
}

impl MarketRecord {
    /// Segment kind of this record
    pub fn segment_kind(&self) -> Segment {
        self.segment.segment()
    }

    /// Market value in US$ millions (the dashboard's "By Value" measure)
    pub fn value_millions(&self) -> f64 {
        self.market_value_usd / 1000.0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A hand-built record for engine tests; override fields with struct update syntax
    pub fn record(year: u16, region: &'static str, country: &'static str) -> MarketRecord {
        MarketRecord {
            record_id: 100000,
            year,
            region,
            country,
            segment: SegmentDetail::ProductType {
                solution_type: "Smartphone-Based Self-Scanning",
            },
            product_type: "Digging Shovel",
            blade_material: "Carbon Steel",
            handle_length: "Short Handle",
            application: "Forestry",
            end_user: "Residential Users",
            distribution_channel_type: ChannelType::Offline,
            distribution_channel: "Hardware Stores",
            brand: "Fiskars",
            company: "Fiskars Corporation",
            price: 10.0,
            volume_units: 100,
            qty: 100,
            revenue: 1000.0,
            market_value_usd: 1000.0,
            value: 1000.0,
            market_share_pct: 5.0,
            cagr: 2.0,
            yoy_growth: 3.0,
        }
    }
}
