//! Segment kinds and their hierarchy payloads
//!
//! Every generated record belongs to exactly one segment. The segment decides
//! which family of hierarchical attributes the record carries, so the payload
//! is modelled as a tagged union instead of a bag of optional fields.

use serde::Serialize;

/// Top-level segment a record is classified under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Segment {
    #[serde(rename = "By Component")]
    ByComponent,
    #[serde(rename = "By Product Type")]
    ByProductType,
    #[serde(rename = "Cross - By Product Type and Technology")]
    CrossProductTechnology,
    #[serde(rename = "By Technology")]
    ByTechnology,
    #[serde(rename = "By Retail Format")]
    ByRetailFormat,
    #[serde(rename = "By Model Type")]
    ByModelType,
    #[serde(rename = "Cross - By Product Type and By Retail Format")]
    CrossProductRetail,
}

impl Segment {
    /// All segments in generation order. Index draws depend on this order.
    pub const ALL: [Segment; 7] = [
        Segment::ByComponent,
        Segment::ByProductType,
        Segment::CrossProductTechnology,
        Segment::ByTechnology,
        Segment::ByRetailFormat,
        Segment::ByModelType,
        Segment::CrossProductRetail,
    ];

    /// Display label used by filters and chart legends
    pub fn label(&self) -> &'static str {
        match self {
            Segment::ByComponent => "By Component",
            Segment::ByProductType => "By Product Type",
            Segment::CrossProductTechnology => "Cross - By Product Type and Technology",
            Segment::ByTechnology => "By Technology",
            Segment::ByRetailFormat => "By Retail Format",
            Segment::ByModelType => "By Model Type",
            Segment::CrossProductRetail => "Cross - By Product Type and By Retail Format",
        }
    }

    /// Cross segments combine two taxonomies into a three-level hierarchy
    pub fn is_cross(&self) -> bool {
        matches!(
            self,
            Segment::CrossProductTechnology | Segment::CrossProductRetail
        )
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Segment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Segment::ALL
            .into_iter()
            .find(|segment| segment.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown segment: {}", s))
    }
}

/// Hierarchy attributes carried by a record, one variant per segment
///
/// Serializes flat (tagged by the segment label) so a record renders in the
/// same shape the dashboard charts consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "segment")]
pub enum SegmentDetail {
    #[serde(rename = "By Component")]
    Component {
        #[serde(rename = "componentType")]
        component_type: &'static str,
        #[serde(rename = "componentCategory")]
        category: &'static str,
        #[serde(
            rename = "componentSubCategory",
            skip_serializing_if = "Option::is_none"
        )]
        sub_category: Option<&'static str>,
    },
    #[serde(rename = "By Product Type")]
    ProductType {
        #[serde(rename = "solutionType")]
        solution_type: &'static str,
    },
    #[serde(rename = "Cross - By Product Type and Technology")]
    CrossTechnology {
        #[serde(rename = "crossLevel1")]
        level1: &'static str,
        #[serde(rename = "crossLevel2")]
        level2: &'static str,
        #[serde(rename = "crossLevel3", skip_serializing_if = "Option::is_none")]
        level3: Option<&'static str>,
    },
    #[serde(rename = "By Technology")]
    Technology {
        #[serde(rename = "technologyType")]
        technology_type: &'static str,
    },
    #[serde(rename = "By Retail Format")]
    RetailFormat {
        #[serde(rename = "retailFormat")]
        retail_format: &'static str,
    },
    #[serde(rename = "By Model Type")]
    ModelType {
        #[serde(rename = "modelType")]
        model_type: &'static str,
    },
    #[serde(rename = "Cross - By Product Type and By Retail Format")]
    CrossRetail {
        #[serde(rename = "crossRetailLevel1")]
        level1: &'static str,
        #[serde(rename = "crossRetailLevel2")]
        level2: &'static str,
        #[serde(
            rename = "crossRetailLevel3",
            skip_serializing_if = "Option::is_none"
        )]
        level3: Option<&'static str>,
    },
}

impl SegmentDetail {
    /// The segment this payload belongs to
    pub fn segment(&self) -> Segment {
        match *self {
            SegmentDetail::Component { .. } => Segment::ByComponent,
            SegmentDetail::ProductType { .. } => Segment::ByProductType,
            SegmentDetail::CrossTechnology { .. } => Segment::CrossProductTechnology,
            SegmentDetail::Technology { .. } => Segment::ByTechnology,
            SegmentDetail::RetailFormat { .. } => Segment::ByRetailFormat,
            SegmentDetail::ModelType { .. } => Segment::ByModelType,
            SegmentDetail::CrossRetail { .. } => Segment::CrossProductRetail,
        }
    }

    pub fn component_type(&self) -> Option<&'static str> {
        match *self {
            SegmentDetail::Component { component_type, .. } => Some(component_type),
            _ => None,
        }
    }

    pub fn component_category(&self) -> Option<&'static str> {
        match *self {
            SegmentDetail::Component { category, .. } => Some(category),
            _ => None,
        }
    }

    pub fn component_sub_category(&self) -> Option<&'static str> {
        match *self {
            SegmentDetail::Component { sub_category, .. } => sub_category,
            _ => None,
        }
    }

    pub fn solution_type(&self) -> Option<&'static str> {
        match *self {
            SegmentDetail::ProductType { solution_type } => Some(solution_type),
            _ => None,
        }
    }

    pub fn technology_type(&self) -> Option<&'static str> {
        match *self {
            SegmentDetail::Technology { technology_type } => Some(technology_type),
            _ => None,
        }
    }

    pub fn retail_format(&self) -> Option<&'static str> {
        match *self {
            SegmentDetail::RetailFormat { retail_format } => Some(retail_format),
            _ => None,
        }
    }

    pub fn model_type(&self) -> Option<&'static str> {
        match *self {
            SegmentDetail::ModelType { model_type } => Some(model_type),
            _ => None,
        }
    }

    /// Cross product/technology levels (level1, level2, optional level3)
    pub fn cross_technology_levels(
        &self,
    ) -> Option<(&'static str, &'static str, Option<&'static str>)> {
        match *self {
            SegmentDetail::CrossTechnology {
                level1,
                level2,
                level3,
            } => Some((level1, level2, level3)),
            _ => None,
        }
    }

    /// Cross product/retail-format levels (level1, level2, optional level3)
    pub fn cross_retail_levels(
        &self,
    ) -> Option<(&'static str, &'static str, Option<&'static str>)> {
        match *self {
            SegmentDetail::CrossRetail {
                level1,
                level2,
                level3,
            } => Some((level1, level2, level3)),
            _ => None,
        }
    }
}
