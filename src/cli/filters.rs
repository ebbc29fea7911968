//! Filter flags shared by the analysis commands
//!
//! [`FilterArgs`] turns command-line selections into a [`FilterState`]; the
//! value enums here map short flag spellings onto the engine's types.

use clap::ValueEnum;
use tracing::debug;

use crate::core::analytics::ValueMode;
use crate::core::filter::FilterState;
use crate::entities::field::Field;
use crate::entities::record::{ChannelType, MarketRecord};
use crate::entities::segment::Segment;

/// Measure filter for `--mode`
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ModeFilter {
    /// Market value in US$ millions - default
    #[default]
    Value,
    /// Units sold
    Volume,
}

impl ModeFilter {
    pub fn to_value_mode(self) -> ValueMode {
        match self {
            ModeFilter::Value => ValueMode::ByValue,
            ModeFilter::Volume => ValueMode::ByVolume,
        }
    }
}

impl std::fmt::Display for ModeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeFilter::Value => write!(f, "value"),
            ModeFilter::Volume => write!(f, "volume"),
        }
    }
}

/// Channel family filter
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ChannelTypeFilter {
    /// Stores, distributors and wholesalers
    Offline,
    /// Marketplaces and brand websites
    Online,
}

impl ChannelTypeFilter {
    pub fn to_channel_type(self) -> ChannelType {
        match self {
            ChannelTypeFilter::Offline => ChannelType::Offline,
            ChannelTypeFilter::Online => ChannelType::Online,
        }
    }
}

/// Segment filter with short spellings of the segment labels
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SegmentFilter {
    /// By Component
    Component,
    /// By Product Type
    ProductType,
    /// Cross - By Product Type and Technology
    CrossTechnology,
    /// By Technology
    Technology,
    /// By Retail Format
    RetailFormat,
    /// By Model Type
    ModelType,
    /// Cross - By Product Type and By Retail Format
    CrossRetail,
}

impl SegmentFilter {
    pub fn to_segment(self) -> Segment {
        match self {
            SegmentFilter::Component => Segment::ByComponent,
            SegmentFilter::ProductType => Segment::ByProductType,
            SegmentFilter::CrossTechnology => Segment::CrossProductTechnology,
            SegmentFilter::Technology => Segment::ByTechnology,
            SegmentFilter::RetailFormat => Segment::ByRetailFormat,
            SegmentFilter::ModelType => Segment::ByModelType,
            SegmentFilter::CrossRetail => Segment::CrossProductRetail,
        }
    }
}

/// One `--filter FIELD=V1,V2` occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub field: Field,
    pub values: Vec<String>,
}

/// Parse `FIELD=V1,V2`
///
/// Commas inside parentheses belong to the value, so taxonomy names such as
/// `Others (Analytics & Dashboard Software, etc.)` survive intact.
pub fn parse_field_assignment(s: &str) -> Result<FieldAssignment, String> {
    let (name, values) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE[,VALUE...], got '{}'", s))?;
    let field = name.parse::<Field>().map_err(|e| e.to_string())?;
    let values = split_values(values);
    if values.is_empty() {
        return Err(format!("no values given for '{}'", field));
    }
    Ok(FieldAssignment { field, values })
}

fn split_values(s: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for ch in s.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                values.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    values.push(current);
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Parse an inclusive `FROM..TO` year range
pub fn parse_year_range(s: &str) -> Result<(u16, u16), String> {
    let (from, to) = s
        .split_once("..")
        .ok_or_else(|| format!("expected FROM..TO, got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<u16>()
            .map_err(|_| format!("invalid year '{}'", v.trim()))
    };
    let (from, to) = (parse(from)?, parse(to)?);
    Ok((from.min(to), from.max(to)))
}

/// Facet selections for the main analysis view
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Years to include
    #[arg(long, value_delimiter = ',')]
    pub year: Vec<u16>,

    /// Inclusive year range (e.g. 2025..2030)
    #[arg(long, value_parser = parse_year_range)]
    pub year_range: Option<(u16, u16)>,

    /// Regions to include
    #[arg(long, value_delimiter = ',')]
    pub region: Vec<String>,

    /// Countries to include (dropped when outside the selected regions)
    #[arg(long, value_delimiter = ',')]
    pub country: Vec<String>,

    /// Segments to include
    #[arg(long, value_enum, value_delimiter = ',')]
    pub segment: Vec<SegmentFilter>,

    #[arg(long, value_delimiter = ',')]
    pub product_type: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub blade_material: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub handle_length: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub application: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub end_user: Vec<String>,

    /// Channel families to include
    #[arg(long, value_enum, value_delimiter = ',')]
    pub channel_type: Vec<ChannelTypeFilter>,

    /// Distribution channels to include
    #[arg(long, value_delimiter = ',')]
    pub channel: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub brand: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub company: Vec<String>,

    /// Any field by name: FIELD=V1,V2 (repeatable; e.g. solutionType=Hardware)
    #[arg(long = "filter", value_name = "FIELD=VALUES", value_parser = parse_field_assignment)]
    pub filters: Vec<FieldAssignment>,
}

impl FilterArgs {
    /// No selection at all
    pub fn is_empty(&self) -> bool {
        self.year.is_empty()
            && self.year_range.is_none()
            && self.region.is_empty()
            && self.country.is_empty()
            && self.segment.is_empty()
            && self.product_type.is_empty()
            && self.blade_material.is_empty()
            && self.handle_length.is_empty()
            && self.application.is_empty()
            && self.end_user.is_empty()
            && self.channel_type.is_empty()
            && self.channel.is_empty()
            && self.brand.is_empty()
            && self.company.is_empty()
            && self.filters.is_empty()
    }

    /// Build the filter state, cascading the region selection over countries
    pub fn to_state(&self, records: &[MarketRecord], mode: ValueMode) -> miette::Result<FilterState> {
        let mut state = FilterState::default();
        state.years = self.year.clone();
        state.year_range = self.year_range;
        state.countries = self.country.clone();
        state.product_types = self.product_type.clone();
        state.blade_materials = self.blade_material.clone();
        state.handle_lengths = self.handle_length.clone();
        state.applications = self.application.clone();
        state.end_users = self.end_user.clone();
        state.channel_types = self.channel_type.iter().map(|t| t.to_channel_type()).collect();
        state.channels = self.channel.clone();
        state.brands = self.brand.clone();
        state.companies = self.company.clone();
        state.value_mode = mode;
        state.set_segments(self.segment.iter().map(|s| s.to_segment()).collect());

        let mut regions = self.region.clone();
        for assignment in &self.filters {
            apply_assignment(&mut state, &mut regions, assignment)?;
        }

        let requested = state.countries.len();
        state.set_regions(regions, records);
        if state.countries.len() < requested {
            debug!(
                dropped = requested - state.countries.len(),
                "countries outside the selected regions dropped"
            );
        }
        Ok(state)
    }
}

/// Route a generic `--filter` onto the matching state field
fn apply_assignment(
    state: &mut FilterState,
    regions: &mut Vec<String>,
    assignment: &FieldAssignment,
) -> miette::Result<()> {
    let values = assignment.values.clone();
    match assignment.field {
        Field::Year => {
            for value in &values {
                let year = value
                    .parse::<u16>()
                    .map_err(|_| miette::miette!("invalid year '{}'", value))?;
                state.years.push(year);
            }
        }
        Field::Region => regions.extend(values),
        Field::Country => state.countries.extend(values),
        Field::Segment => {
            let mut segments = state.segments().to_vec();
            for value in &values {
                segments.push(value.parse::<Segment>().map_err(|e| miette::miette!("{}", e))?);
            }
            // keep sub-filters assigned so far
            let sub_filters = state.sub_filters.clone();
            state.set_segments(segments);
            state.sub_filters = sub_filters;
        }
        Field::ProductType => state.product_types.extend(values),
        Field::BladeMaterial => state.blade_materials.extend(values),
        Field::HandleLength => state.handle_lengths.extend(values),
        Field::Application => state.applications.extend(values),
        Field::EndUser => state.end_users.extend(values),
        Field::DistributionChannelType => {
            for value in &values {
                state
                    .channel_types
                    .push(value.parse::<ChannelType>().map_err(|e| miette::miette!("{}", e))?);
            }
        }
        Field::DistributionChannel => state.channels.extend(values),
        Field::Brand => state.brands.extend(values),
        Field::Company => state.companies.extend(values),
        field => {
            let mut merged = state
                .sub_filters
                .entries()
                .into_iter()
                .find(|(f, _)| *f == field)
                .map(|(_, current)| current.to_vec())
                .unwrap_or_default();
            merged.extend(values);
            if !state.sub_filters.set(field, merged) {
                return Err(miette::miette!("field '{}' cannot be filtered", field));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::record::fixtures::record;

    #[test]
    fn test_parse_field_assignment() {
        let a = parse_field_assignment("solution_type=Hardware, Software").unwrap();
        assert_eq!(a.field, Field::SolutionType);
        assert_eq!(a.values, vec!["Hardware", "Software"]);

        let a = parse_field_assignment(
            "componentCategory=Others (Analytics & Dashboard Software, etc.),Hardware",
        )
        .unwrap();
        assert_eq!(
            a.values,
            vec!["Others (Analytics & Dashboard Software, etc.)", "Hardware"]
        );

        assert!(parse_field_assignment("region").is_err());
        assert!(parse_field_assignment("nope=1").is_err());
        assert!(parse_field_assignment("region= , ").is_err());
    }

    #[test]
    fn test_parse_year_range() {
        assert_eq!(parse_year_range("2025..2030"), Ok((2025, 2030)));
        assert_eq!(parse_year_range("2030..2025"), Ok((2025, 2030)));
        assert!(parse_year_range("2025-2030").is_err());
        assert!(parse_year_range("x..2030").is_err());
    }

    #[test]
    fn test_mode_filter_maps_to_value_mode() {
        assert_eq!(ModeFilter::Value.to_value_mode(), ValueMode::ByValue);
        assert_eq!(ModeFilter::Volume.to_value_mode(), ValueMode::ByVolume);
        assert_eq!(ModeFilter::default().to_string(), "value");
    }

    #[test]
    fn test_to_state_cascades_countries() {
        let records = vec![
            record(2024, "Europe", "Germany"),
            record(2024, "North America", "U.S."),
        ];
        let args = FilterArgs {
            region: vec!["Europe".into()],
            country: vec!["Germany".into(), "U.S.".into()],
            ..FilterArgs::default()
        };
        let state = args.to_state(&records, ValueMode::ByVolume).unwrap();
        assert_eq!(state.countries, vec!["Germany"]);
        assert_eq!(state.value_mode, ValueMode::ByVolume);
    }

    #[test]
    fn test_generic_filters_route_to_state() {
        let args = FilterArgs {
            segment: vec![SegmentFilter::Technology],
            filters: vec![
                parse_field_assignment("year=2024,2025").unwrap(),
                parse_field_assignment("distributionChannelType=online").unwrap(),
                parse_field_assignment("technologyType=Computer Vision and AI Scanning")
                    .unwrap(),
                parse_field_assignment("segment=By Model Type").unwrap(),
            ],
            ..FilterArgs::default()
        };
        let state = args.to_state(&[], ValueMode::ByValue).unwrap();
        assert_eq!(state.years, vec![2024, 2025]);
        assert_eq!(state.channel_types, vec![ChannelType::Online]);
        assert_eq!(
            state.segments(),
            &[Segment::ByTechnology, Segment::ByModelType]
        );
        assert_eq!(
            state.sub_filters.technology_types,
            vec!["Computer Vision and AI Scanning"]
        );
        assert!(!args.is_empty());
        assert!(FilterArgs::default().is_empty());
    }

    #[test]
    fn test_invalid_generic_values_rejected() {
        let args = FilterArgs {
            filters: vec![parse_field_assignment("year=soon").unwrap()],
            ..FilterArgs::default()
        };
        assert!(args.to_state(&[], ValueMode::ByValue).is_err());
    }
}
