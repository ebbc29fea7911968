//! Record filtering and filter-state maintenance
//!
//! [`FieldFilter`] is the pure predicate: field → accepted values plus an
//! optional year range. The view states ([`FilterState`],
//! [`IncrementalFilters`], [`AttractivenessFilters`], [`CagrFilters`]) hold
//! user selections for one analysis view each and convert into a
//! `FieldFilter`. The option-list helpers compute what a selector may offer.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::core::analytics::ValueMode;
use crate::core::dimensions::Tables;
use crate::entities::field::{Field, FieldValue};
use crate::entities::record::{ChannelType, MarketRecord};
use crate::entities::segment::Segment;

/// First year of the attractiveness window
pub const ATTRACTIVENESS_START_YEAR: u16 = 2025;
/// Last year of the attractiveness window
pub const ATTRACTIVENESS_END_YEAR: u16 = 2032;

// =========================================================================
// FieldFilter
// =========================================================================

/// Accepted values per field; an empty set passes everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFilter {
    fields: BTreeMap<Field, Vec<String>>,
    year_range: Option<(u16, u16)>,
}

impl FieldFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FieldFilter::set`]
    pub fn with<I, V>(mut self, field: Field, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.set(field, values);
        self
    }

    /// Replace the accepted values for a field
    pub fn set<I, V>(&mut self, field: Field, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.fields.remove(&field);
        } else {
            self.fields.insert(field, values);
        }
    }

    /// Inclusive year range; bounds are swapped if given backwards
    pub fn with_year_range(mut self, from: u16, to: u16) -> Self {
        self.year_range = Some((from.min(to), from.max(to)));
        self
    }

    pub fn year_range(&self) -> Option<(u16, u16)> {
        self.year_range
    }

    pub fn accepted(&self, field: Field) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Constrained fields with their accepted values
    pub fn constraints(&self) -> impl Iterator<Item = (Field, &[String])> {
        self.fields.iter().map(|(f, v)| (*f, v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.year_range.is_none()
    }

    /// Does a record satisfy every constraint?
    ///
    /// A record lacking a constrained field (another segment's hierarchy
    /// field) fails.
    pub fn matches(&self, record: &MarketRecord) -> bool {
        if let Some((from, to)) = self.year_range {
            if record.year < from || record.year > to {
                return false;
            }
        }
        self.fields.iter().all(|(field, accepted)| match field.value(record) {
            Some(value) => accepted.iter().any(|a| value.matches(a)),
            None => false,
        })
    }
}

/// Records matching a filter, in input order
pub fn filter_records<'a, I>(records: I, filter: &FieldFilter) -> Vec<&'a MarketRecord>
where
    I: IntoIterator<Item = &'a MarketRecord>,
{
    records.into_iter().filter(|r| filter.matches(r)).collect()
}

// =========================================================================
// Main analysis view
// =========================================================================

/// Hierarchy sub-filters that only apply within a segment selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSubFilters {
    pub component_types: Vec<String>,
    pub component_categories: Vec<String>,
    pub component_sub_categories: Vec<String>,
    pub cross_level1: Vec<String>,
    pub cross_level2: Vec<String>,
    pub cross_level3: Vec<String>,
    pub cross_retail_level1: Vec<String>,
    pub cross_retail_level2: Vec<String>,
    pub cross_retail_level3: Vec<String>,
    pub solution_types: Vec<String>,
    pub technology_types: Vec<String>,
    pub retail_formats: Vec<String>,
    pub model_types: Vec<String>,
}

impl SegmentSubFilters {
    fn slot_mut(&mut self, field: Field) -> Option<&mut Vec<String>> {
        let slot = match field {
            Field::ComponentType => &mut self.component_types,
            Field::ComponentCategory => &mut self.component_categories,
            Field::ComponentSubCategory => &mut self.component_sub_categories,
            Field::CrossLevel1 => &mut self.cross_level1,
            Field::CrossLevel2 => &mut self.cross_level2,
            Field::CrossLevel3 => &mut self.cross_level3,
            Field::CrossRetailLevel1 => &mut self.cross_retail_level1,
            Field::CrossRetailLevel2 => &mut self.cross_retail_level2,
            Field::CrossRetailLevel3 => &mut self.cross_retail_level3,
            Field::SolutionType => &mut self.solution_types,
            Field::TechnologyType => &mut self.technology_types,
            Field::RetailFormat => &mut self.retail_formats,
            Field::ModelType => &mut self.model_types,
            _ => return None,
        };
        Some(slot)
    }

    /// Set a sub-filter; returns false for fields that are not segment-specific
    pub fn set(&mut self, field: Field, values: Vec<String>) -> bool {
        match self.slot_mut(field) {
            Some(slot) => {
                *slot = values;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> [(Field, &[String]); 13] {
        [
            (Field::ComponentType, self.component_types.as_slice()),
            (Field::ComponentCategory, self.component_categories.as_slice()),
            (Field::ComponentSubCategory, self.component_sub_categories.as_slice()),
            (Field::CrossLevel1, self.cross_level1.as_slice()),
            (Field::CrossLevel2, self.cross_level2.as_slice()),
            (Field::CrossLevel3, self.cross_level3.as_slice()),
            (Field::CrossRetailLevel1, self.cross_retail_level1.as_slice()),
            (Field::CrossRetailLevel2, self.cross_retail_level2.as_slice()),
            (Field::CrossRetailLevel3, self.cross_retail_level3.as_slice()),
            (Field::SolutionType, self.solution_types.as_slice()),
            (Field::TechnologyType, self.technology_types.as_slice()),
            (Field::RetailFormat, self.retail_formats.as_slice()),
            (Field::ModelType, self.model_types.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, values)| values.is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Selections of the main analysis view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub years: Vec<u16>,
    pub year_range: Option<(u16, u16)>,
    pub regions: Vec<String>,
    pub countries: Vec<String>,
    segments: Vec<Segment>,
    pub product_types: Vec<String>,
    pub blade_materials: Vec<String>,
    pub handle_lengths: Vec<String>,
    pub applications: Vec<String>,
    pub end_users: Vec<String>,
    pub channel_types: Vec<ChannelType>,
    pub channels: Vec<String>,
    pub brands: Vec<String>,
    pub companies: Vec<String>,
    pub sub_filters: SegmentSubFilters,
    pub value_mode: ValueMode,
}

impl FilterState {
    /// The dashboard's initial selections for a dataset
    ///
    /// Years 2024 and 2025 when both exist (else whichever exists, else the
    /// latest year), every region, no countries or segments, and every value
    /// of the product facets.
    pub fn dashboard_defaults(records: &[MarketRecord]) -> Self {
        let available: BTreeSet<u16> = records.iter().map(|r| r.year).collect();
        let years = match (available.contains(&2024), available.contains(&2025)) {
            (true, true) => vec![2024, 2025],
            (false, true) => vec![2025],
            (true, false) => vec![2024],
            (false, false) => available.iter().next_back().copied().into_iter().collect(),
        };

        let texts = |field: Field| -> Vec<String> {
            distinct_values(records, field)
                .into_iter()
                .map(|v| v.to_string())
                .collect()
        };

        Self {
            years,
            regions: texts(Field::Region),
            product_types: texts(Field::ProductType),
            blade_materials: texts(Field::BladeMaterial),
            handle_lengths: texts(Field::HandleLength),
            applications: texts(Field::Application),
            end_users: texts(Field::EndUser),
            value_mode: ValueMode::ByValue,
            ..Self::default()
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Change the segment selection, resetting every segment sub-filter
    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        self.segments = segments;
        self.sub_filters.clear();
    }

    /// Change the region selection and drop countries the new regions cannot produce
    pub fn set_regions<'a, I>(&mut self, regions: Vec<String>, records: I)
    where
        I: IntoIterator<Item = &'a MarketRecord>,
    {
        self.regions = regions;
        self.prune_countries(records);
    }

    /// Keep only countries that occur under a selected region in `records`
    ///
    /// No-op unless both the region and country selections are non-empty.
    pub fn prune_countries<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a MarketRecord>,
    {
        if self.regions.is_empty() || self.countries.is_empty() {
            return;
        }
        let valid: BTreeSet<&str> = records
            .into_iter()
            .filter(|r| self.regions.iter().any(|region| region == r.region))
            .map(|r| r.country)
            .collect();
        self.countries.retain(|c| valid.contains(c.as_str()));
    }

    pub fn to_field_filter(&self) -> FieldFilter {
        let mut filter = FieldFilter::new()
            .with(Field::Year, self.years.iter().map(|y| y.to_string()))
            .with(Field::Region, self.regions.iter().cloned())
            .with(Field::Country, self.countries.iter().cloned())
            .with(Field::Segment, self.segments.iter().map(|s| s.label()))
            .with(Field::ProductType, self.product_types.iter().cloned())
            .with(Field::BladeMaterial, self.blade_materials.iter().cloned())
            .with(Field::HandleLength, self.handle_lengths.iter().cloned())
            .with(Field::Application, self.applications.iter().cloned())
            .with(Field::EndUser, self.end_users.iter().cloned())
            .with(
                Field::DistributionChannelType,
                self.channel_types.iter().map(|t| t.as_str()),
            )
            .with(Field::DistributionChannel, self.channels.iter().cloned())
            .with(Field::Brand, self.brands.iter().cloned())
            .with(Field::Company, self.companies.iter().cloned());

        for (field, values) in self.sub_filters.entries() {
            filter.set(field, values.iter().cloned());
        }
        if let Some((from, to)) = self.year_range {
            filter = filter.with_year_range(from, to);
        }
        filter
    }

    pub fn apply<'a>(&self, records: &'a [MarketRecord]) -> Vec<&'a MarketRecord> {
        filter_records(records, &self.to_field_filter())
    }
}

// =========================================================================
// Secondary views
// =========================================================================

/// Region/country selection of the incremental-opportunity view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncrementalFilters {
    pub region: Vec<String>,
    pub country: Vec<String>,
}

impl IncrementalFilters {
    pub fn to_field_filter(&self) -> FieldFilter {
        FieldFilter::new()
            .with(Field::Region, self.region.iter().cloned())
            .with(Field::Country, self.country.iter().cloned())
    }

    pub fn apply<'a>(&self, records: &'a [MarketRecord]) -> Vec<&'a MarketRecord> {
        filter_records(records, &self.to_field_filter())
    }
}

/// Region/segment selection of the attractiveness view, fixed to 2025–2032
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttractivenessFilters {
    pub region: Vec<String>,
    pub segment: Vec<Segment>,
}

impl AttractivenessFilters {
    pub fn to_field_filter(&self) -> FieldFilter {
        FieldFilter::new()
            .with(Field::Region, self.region.iter().cloned())
            .with(Field::Segment, self.segment.iter().map(|s| s.label()))
            .with_year_range(ATTRACTIVENESS_START_YEAR, ATTRACTIVENESS_END_YEAR)
    }

    pub fn apply<'a>(&self, records: &'a [MarketRecord]) -> Vec<&'a MarketRecord> {
        filter_records(records, &self.to_field_filter())
    }
}

/// Region/solution-type selection of the CAGR view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CagrFilters {
    pub region: Vec<String>,
    pub solution_type: Vec<String>,
}

impl CagrFilters {
    pub fn to_field_filter(&self) -> FieldFilter {
        FieldFilter::new()
            .with(Field::Region, self.region.iter().cloned())
            .with(Field::SolutionType, self.solution_type.iter().cloned())
    }

    pub fn apply<'a>(&self, records: &'a [MarketRecord]) -> Vec<&'a MarketRecord> {
        filter_records(records, &self.to_field_filter())
    }
}

// =========================================================================
// Option lists
// =========================================================================

/// Sorted distinct non-empty values of a field
pub fn distinct_values<'a, I>(records: I, field: Field) -> Vec<FieldValue>
where
    I: IntoIterator<Item = &'a MarketRecord>,
{
    let set: BTreeSet<FieldValue> = records
        .into_iter()
        .filter_map(|r| field.value(r))
        .filter(|v| !v.is_empty())
        .collect();
    set.into_iter().collect()
}

/// Selector options for a set of facets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    options: BTreeMap<Field, Vec<FieldValue>>,
}

impl FacetOptions {
    /// Sorted distinct values for each of `fields`, one pass over the records
    pub fn from_records<'a, I>(records: I, fields: &[Field]) -> Self
    where
        I: IntoIterator<Item = &'a MarketRecord>,
    {
        let mut sets: BTreeMap<Field, BTreeSet<FieldValue>> =
            fields.iter().map(|f| (*f, BTreeSet::new())).collect();
        for record in records {
            for (field, set) in sets.iter_mut() {
                if let Some(value) = field.value(record).filter(|v| !v.is_empty()) {
                    set.insert(value);
                }
            }
        }
        Self {
            options: sets
                .into_iter()
                .map(|(f, set)| (f, set.into_iter().collect()))
                .collect(),
        }
    }

    pub fn get(&self, field: Field) -> &[FieldValue] {
        self.options.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &[FieldValue])> {
        self.options.iter().map(|(f, v)| (*f, v.as_slice()))
    }
}

/// Countries selectable under the given regions (all countries when none selected)
pub fn available_countries<'a, I>(records: I, regions: &[String]) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a MarketRecord>,
{
    let set: BTreeSet<&'static str> = records
        .into_iter()
        .filter(|r| regions.is_empty() || regions.iter().any(|region| region == r.region))
        .map(|r| r.country)
        .filter(|c| !c.is_empty())
        .collect();
    set.into_iter().collect()
}

/// Channels of one channel type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelGroup {
    pub channel_type: ChannelType,
    pub channels: Vec<&'static str>,
}

/// Channel options grouped by type, in channel-table order
///
/// Only channels present in the data are offered; with types selected, only
/// those types' groups appear. Empty groups are omitted.
pub fn channel_groups<'a, I>(records: I, selected_types: &[ChannelType]) -> Vec<ChannelGroup>
where
    I: IntoIterator<Item = &'a MarketRecord>,
{
    let present: BTreeSet<&str> = records
        .into_iter()
        .map(|r| r.distribution_channel)
        .collect();

    ChannelType::ALL
        .into_iter()
        .filter(|t| selected_types.is_empty() || selected_types.contains(t))
        .filter_map(|channel_type| {
            let channels: Vec<&'static str> = Tables::STANDARD
                .channels_for(channel_type)
                .iter()
                .copied()
                .filter(|c| present.contains(c))
                .collect();
            (!channels.is_empty()).then_some(ChannelGroup {
                channel_type,
                channels,
            })
        })
        .collect()
}

/// Sorted channels present for the selected types (all types when none selected)
pub fn available_channels<'a, I>(records: I, selected_types: &[ChannelType]) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a MarketRecord>,
{
    let set: BTreeSet<&'static str> = records
        .into_iter()
        .filter(|r| {
            selected_types.is_empty() || selected_types.contains(&r.distribution_channel_type)
        })
        .map(|r| r.distribution_channel)
        .filter(|c| !c.is_empty())
        .collect();
    set.into_iter().collect()
}
