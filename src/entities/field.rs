//! Facet names and typed facet values
//!
//! `Field` is the vocabulary shared by the filter engine, the pivot
//! aggregations and the CLI's `--filter FIELD=...` flags.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::entities::record::MarketRecord;

/// A filterable / pivotable record attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Year,
    Region,
    Country,
    Segment,
    ComponentType,
    ComponentCategory,
    ComponentSubCategory,
    CrossLevel1,
    CrossLevel2,
    CrossLevel3,
    CrossRetailLevel1,
    CrossRetailLevel2,
    CrossRetailLevel3,
    SolutionType,
    TechnologyType,
    RetailFormat,
    ModelType,
    ProductType,
    BladeMaterial,
    HandleLength,
    Application,
    EndUser,
    DistributionChannelType,
    DistributionChannel,
    Brand,
    Company,
}

/// Error returned when a field name is not recognized
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown field '{0}' (expected one of: {expected})", expected = Field::names().join(", "))]
pub struct FieldParseError(pub String);

impl Field {
    pub const ALL: [Field; 26] = [
        Field::Year,
        Field::Region,
        Field::Country,
        Field::Segment,
        Field::ComponentType,
        Field::ComponentCategory,
        Field::ComponentSubCategory,
        Field::CrossLevel1,
        Field::CrossLevel2,
        Field::CrossLevel3,
        Field::CrossRetailLevel1,
        Field::CrossRetailLevel2,
        Field::CrossRetailLevel3,
        Field::SolutionType,
        Field::TechnologyType,
        Field::RetailFormat,
        Field::ModelType,
        Field::ProductType,
        Field::BladeMaterial,
        Field::HandleLength,
        Field::Application,
        Field::EndUser,
        Field::DistributionChannelType,
        Field::DistributionChannel,
        Field::Brand,
        Field::Company,
    ];

    /// Sub-filters that only make sense within a specific segment selection
    pub const SEGMENT_SPECIFIC: [Field; 13] = [
        Field::ComponentType,
        Field::ComponentCategory,
        Field::ComponentSubCategory,
        Field::CrossLevel1,
        Field::CrossLevel2,
        Field::CrossLevel3,
        Field::CrossRetailLevel1,
        Field::CrossRetailLevel2,
        Field::CrossRetailLevel3,
        Field::SolutionType,
        Field::TechnologyType,
        Field::RetailFormat,
        Field::ModelType,
    ];

    /// camelCase name, matching the serialized record keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::Region => "region",
            Field::Country => "country",
            Field::Segment => "segment",
            Field::ComponentType => "componentType",
            Field::ComponentCategory => "componentCategory",
            Field::ComponentSubCategory => "componentSubCategory",
            Field::CrossLevel1 => "crossLevel1",
            Field::CrossLevel2 => "crossLevel2",
            Field::CrossLevel3 => "crossLevel3",
            Field::CrossRetailLevel1 => "crossRetailLevel1",
            Field::CrossRetailLevel2 => "crossRetailLevel2",
            Field::CrossRetailLevel3 => "crossRetailLevel3",
            Field::SolutionType => "solutionType",
            Field::TechnologyType => "technologyType",
            Field::RetailFormat => "retailFormat",
            Field::ModelType => "modelType",
            Field::ProductType => "productType",
            Field::BladeMaterial => "bladeMaterial",
            Field::HandleLength => "handleLength",
            Field::Application => "application",
            Field::EndUser => "endUser",
            Field::DistributionChannelType => "distributionChannelType",
            Field::DistributionChannel => "distributionChannel",
            Field::Brand => "brand",
            Field::Company => "company",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Field::ALL.iter().map(|f| f.as_str()).collect()
    }

    pub fn is_segment_specific(&self) -> bool {
        Field::SEGMENT_SPECIFIC.contains(self)
    }

    /// Read this field from a record
    ///
    /// Hierarchy fields of a different segment family are `None`.
    pub fn value(&self, record: &MarketRecord) -> Option<FieldValue> {
        let seg = &record.segment;
        let text = match self {
            Field::Year => return Some(FieldValue::Year(record.year)),
            Field::Region => Some(record.region),
            Field::Country => Some(record.country),
            Field::Segment => Some(seg.segment().label()),
            Field::ComponentType => seg.component_type(),
            Field::ComponentCategory => seg.component_category(),
            Field::ComponentSubCategory => seg.component_sub_category(),
            Field::CrossLevel1 => seg.cross_technology_levels().map(|l| l.0),
            Field::CrossLevel2 => seg.cross_technology_levels().map(|l| l.1),
            Field::CrossLevel3 => seg.cross_technology_levels().and_then(|l| l.2),
            Field::CrossRetailLevel1 => seg.cross_retail_levels().map(|l| l.0),
            Field::CrossRetailLevel2 => seg.cross_retail_levels().map(|l| l.1),
            Field::CrossRetailLevel3 => seg.cross_retail_levels().and_then(|l| l.2),
            Field::SolutionType => seg.solution_type(),
            Field::TechnologyType => seg.technology_type(),
            Field::RetailFormat => seg.retail_format(),
            Field::ModelType => seg.model_type(),
            Field::ProductType => Some(record.product_type),
            Field::BladeMaterial => Some(record.blade_material),
            Field::HandleLength => Some(record.handle_length),
            Field::Application => Some(record.application),
            Field::EndUser => Some(record.end_user),
            Field::DistributionChannelType => Some(record.distribution_channel_type.as_str()),
            Field::DistributionChannel => Some(record.distribution_channel),
            Field::Brand => Some(record.brand),
            Field::Company => Some(record.company),
        };
        text.map(FieldValue::Text)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = FieldParseError;

    /// Accepts camelCase, snake_case and kebab-case spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(|c| c.to_lowercase())
            .collect();
        Field::ALL
            .into_iter()
            .find(|f| f.as_str().to_lowercase() == normalized)
            .ok_or_else(|| FieldParseError(s.to_string()))
    }
}

/// A field value read from a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Year(u16),
    Text(&'static str),
}

impl FieldValue {
    /// Check a filter value against this field value
    ///
    /// Years compare numerically so `"2024"`, `" 2024 "` and `2024` all match.
    pub fn matches(&self, accepted: &str) -> bool {
        match self {
            FieldValue::Year(year) => accepted
                .trim()
                .parse::<f64>()
                .map(|v| v == f64::from(*year))
                .unwrap_or(false),
            FieldValue::Text(text) => *text == accepted,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(t) if t.is_empty())
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Year(y) => write!(f, "{}", y),
            FieldValue::Text(t) => write!(f, "{}", t),
        }
    }
}
