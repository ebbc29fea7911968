//! Aggregations over filtered records
//!
//! Every function here is pure over `&[&MarketRecord]` and never fails:
//! empty inputs produce empty series, and divisions by zero follow the
//! fallback rules documented per function.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::filter::{FilterState, ATTRACTIVENESS_END_YEAR, ATTRACTIVENESS_START_YEAR};
use crate::core::format::format_with_commas;
use crate::entities::field::{Field, FieldValue};
use crate::entities::record::{ChannelType, MarketRecord};

// =========================================================================
// Value mode
// =========================================================================

/// Which measure the aggregations sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueMode {
    /// Market value in US$ millions
    #[default]
    #[serde(rename = "By Value", alias = "value", alias = "by-value")]
    ByValue,
    /// Units sold
    #[serde(rename = "By Volume", alias = "volume", alias = "by-volume")]
    ByVolume,
}

impl ValueMode {
    pub fn measure(&self, record: &MarketRecord) -> f64 {
        match self {
            ValueMode::ByValue => record.value_millions(),
            ValueMode::ByVolume => record.volume_units as f64,
        }
    }

    /// Axis label for charts and table headers
    pub fn label(&self) -> &'static str {
        match self {
            ValueMode::ByValue => "Market Value (US$ Mn)",
            ValueMode::ByVolume => "Volume (Units)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueMode::ByValue => "By Value",
            ValueMode::ByVolume => "By Volume",
        }
    }
}

impl std::fmt::Display for ValueMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ValueMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "value" | "by value" => Ok(ValueMode::ByValue),
            "volume" | "by volume" => Ok(ValueMode::ByVolume),
            _ => Err(format!("Unknown value mode: {}", s)),
        }
    }
}

/// Sum of the measure over all records
pub fn total(records: &[&MarketRecord], mode: ValueMode) -> f64 {
    records.iter().map(|r| mode.measure(r)).sum()
}

/// KPI display string: `"1,234.5M"` by value, `"12.3K Units"` by volume
///
/// `None` (no records) renders as `"N/A"`.
pub fn kpi_label(total: Option<f64>, mode: ValueMode) -> String {
    match (total, mode) {
        (None, _) => "N/A".to_string(),
        (Some(t), ValueMode::ByValue) => format!("{}M", format_with_commas(t, 1)),
        (Some(t), ValueMode::ByVolume) => {
            format!("{}K Units", format_with_commas(t / 1000.0, 1))
        }
    }
}

/// Headline figure for a filtered set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub records: usize,
    pub total: Option<f64>,
    pub label: String,
    pub mode: ValueMode,
}

impl Kpi {
    pub fn compute(records: &[&MarketRecord], mode: ValueMode) -> Self {
        let total = (!records.is_empty()).then(|| total(records, mode));
        Self {
            records: records.len(),
            total,
            label: kpi_label(total, mode),
            mode,
        }
    }
}

// =========================================================================
// Pivot
// =========================================================================

/// Year × facet table of summed measures
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pivot {
    pub years: Vec<u16>,
    pub facets: Vec<String>,
    /// `values[year_index][facet_index]`
    pub values: Vec<Vec<f64>>,
}

impl Pivot {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.facets.is_empty()
    }

    /// Cell value; 0 for unknown years or facets
    pub fn get(&self, year: u16, facet: &str) -> f64 {
        let y = self.years.iter().position(|y2| *y2 == year);
        let f = self.facets.iter().position(|f2| f2 == facet);
        match (y, f) {
            (Some(y), Some(f)) => self.values[y][f],
            _ => 0.0,
        }
    }

    pub fn column(&self, facet: &str) -> Vec<f64> {
        match self.facets.iter().position(|f| f == facet) {
            Some(f) => self.values.iter().map(|row| row[f]).collect(),
            None => vec![0.0; self.years.len()],
        }
    }

    pub fn row_total(&self, year_index: usize) -> f64 {
        self.values.get(year_index).map(|row| row.iter().sum::<f64>()).unwrap_or(0.0)
    }

    /// Drop facets with no positive value in any year
    pub fn prune_inactive(mut self) -> Self {
        let keep: Vec<bool> = (0..self.facets.len())
            .map(|f| self.values.iter().any(|row| row[f] > 0.0))
            .collect();

        let mut index = 0;
        self.facets.retain(|_| {
            index += 1;
            keep[index - 1]
        });
        for row in &mut self.values {
            let mut index = 0;
            row.retain(|_| {
                index += 1;
                keep[index - 1]
            });
        }
        self
    }

    /// Rows shaped for chart components: `{"year": "2024", facet: value, ...}`
    pub fn chart_rows(&self) -> Vec<serde_json::Value> {
        self.years
            .iter()
            .zip(&self.values)
            .map(|(year, row)| {
                let mut entry = serde_json::Map::new();
                entry.insert("year".to_string(), year.to_string().into());
                for (facet, value) in self.facets.iter().zip(row) {
                    entry.insert(facet.clone(), (*value).into());
                }
                serde_json::Value::Object(entry)
            })
            .collect()
    }
}

fn distinct_years(records: &[&MarketRecord]) -> Vec<u16> {
    let years: BTreeSet<u16> = records.iter().map(|r| r.year).collect();
    years.into_iter().collect()
}

fn pivot_over_years<F>(
    records: &[&MarketRecord],
    years: Vec<u16>,
    selector: F,
    explicit: &[String],
    mode: ValueMode,
) -> Pivot
where
    F: Fn(&MarketRecord) -> Option<&'static str>,
{
    let mut sums: BTreeMap<(u16, &str), f64> = BTreeMap::new();
    for record in records {
        if let Some(key) = selector(*record).filter(|k| !k.is_empty()) {
            *sums.entry((record.year, key)).or_insert(0.0) += mode.measure(record);
        }
    }

    let facets: Vec<String> = if explicit.iter().any(|f| !f.is_empty()) {
        let set: BTreeSet<&String> = explicit.iter().filter(|f| !f.is_empty()).collect();
        set.into_iter().cloned().collect()
    } else {
        let set: BTreeSet<&str> = sums.keys().map(|(_, k)| *k).collect();
        set.into_iter().map(str::to_string).collect()
    };

    let values: Vec<Vec<f64>> = years
        .iter()
        .map(|year| {
            facets
                .iter()
                .map(|f| sums.get(&(*year, f.as_str())).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();

    Pivot {
        years,
        facets,
        values,
    }
}

/// Group by (year, facet) and sum the measure
///
/// Years are the distinct sorted years of `records`. Facets are `explicit`
/// (sorted, blanks dropped) when it has any entry, otherwise the sorted
/// distinct values the selector yields. Missing cells are 0.
pub fn pivot<F>(records: &[&MarketRecord], selector: F, explicit: &[String], mode: ValueMode) -> Pivot
where
    F: Fn(&MarketRecord) -> Option<&'static str>,
{
    pivot_over_years(records, distinct_years(records), selector, explicit, mode)
}

fn text_of(field: Field) -> impl Fn(&MarketRecord) -> Option<&'static str> {
    move |record| match field.value(record) {
        Some(FieldValue::Text(text)) => Some(text),
        _ => None,
    }
}

/// [`pivot`] keyed by a record field; `Field::Year` yields no facets
pub fn pivot_field(
    records: &[&MarketRecord],
    field: Field,
    explicit: &[String],
    mode: ValueMode,
) -> Pivot {
    pivot(records, text_of(field), explicit, mode)
}

/// Pivot for stacked share charts: inactive facets removed
pub fn stacked_share(
    records: &[&MarketRecord],
    field: Field,
    explicit: &[String],
    mode: ValueMode,
) -> Pivot {
    pivot_field(records, field, explicit, mode).prune_inactive()
}

// =========================================================================
// Region → country breakdown
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    pub year: u16,
    pub region: &'static str,
    pub country: &'static str,
    /// Percent of the region total by value; raw units by volume
    pub value: f64,
    pub year_region: String,
}

/// Each country's part of its region, per year
///
/// Years ascend, regions appear in first-seen order within a year and
/// countries are sorted. Under `ByValue` the value is the percentage of the
/// region total (0 when the total is 0); under `ByVolume` it is the summed
/// volume.
pub fn region_country_breakdown(records: &[&MarketRecord], mode: ValueMode) -> Vec<BreakdownRow> {
    type Countries = BTreeMap<&'static str, f64>;
    let mut by_year: BTreeMap<u16, Vec<(&'static str, Countries, f64)>> = BTreeMap::new();

    for record in records {
        let value = mode.measure(record);
        let regions = by_year.entry(record.year).or_default();
        let index = match regions.iter().position(|(name, _, _)| *name == record.region) {
            Some(i) => i,
            None => {
                regions.push((record.region, Countries::new(), 0.0));
                regions.len() - 1
            }
        };
        let (_, countries, region_total) = &mut regions[index];
        *countries.entry(record.country).or_insert(0.0) += value;
        *region_total += value;
    }

    let mut rows = Vec::new();
    for (year, regions) in by_year {
        for (region, countries, region_total) in regions {
            for (country, value) in countries {
                let value = match mode {
                    ValueMode::ByVolume => value,
                    ValueMode::ByValue if region_total > 0.0 => value / region_total * 100.0,
                    ValueMode::ByValue => 0.0,
                };
                rows.push(BreakdownRow {
                    year,
                    region,
                    country,
                    value,
                    year_region: format!("{} - {}", year, region),
                });
            }
        }
    }
    rows
}

// =========================================================================
// Growth
// =========================================================================

/// Year-over-year growth in percent for every year after the first
///
/// A facet whose previous value is not positive reports 0.
pub fn yoy_growth(pivot: &Pivot) -> Pivot {
    let years: Vec<u16> = pivot.years.iter().skip(1).copied().collect();
    let values: Vec<Vec<f64>> = pivot
        .values
        .windows(2)
        .map(|pair| {
            pair[0]
                .iter()
                .zip(&pair[1])
                .map(|(prev, cur)| {
                    if *prev > 0.0 {
                        (cur - prev) / prev * 100.0
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();
    Pivot {
        years,
        facets: pivot.facets.clone(),
        values,
    }
}

/// Compound annual growth of one facet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetCagr {
    pub facet: String,
    pub cagr: f64,
}

/// `((end/start)^(1/years) - 1) × 100`
pub fn compound_growth(start: f64, end: f64, years: u16) -> f64 {
    ((end / start).powf(1.0 / f64::from(years)) - 1.0) * 100.0
}

/// CAGR per facet from the first to the last pivot year
///
/// Facets with a non-positive starting value are left out.
pub fn cagr(pivot: &Pivot) -> Vec<FacetCagr> {
    let (Some(first), Some(last)) = (pivot.years.first(), pivot.years.last()) else {
        return Vec::new();
    };
    if last <= first {
        return Vec::new();
    }
    let span = last - first;
    let start_row = &pivot.values[0];
    let end_row = &pivot.values[pivot.values.len() - 1];

    pivot
        .facets
        .iter()
        .enumerate()
        .filter(|(i, _)| start_row[*i] > 0.0)
        .map(|(i, facet)| FacetCagr {
            facet: facet.clone(),
            cagr: compound_growth(start_row[i], end_row[i], span),
        })
        .collect()
}

/// Market value by solution type with growth series
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthAnalysis {
    pub pivot: Pivot,
    pub yoy: Pivot,
    pub cagr: Vec<FacetCagr>,
    pub solution_types: Vec<String>,
}

/// Value pivot by solution type plus YoY and CAGR
///
/// Records without a solution type are ignored, including for the year axis.
pub fn solution_type_growth(records: &[&MarketRecord]) -> GrowthAnalysis {
    let relevant: Vec<&MarketRecord> = records
        .iter()
        .copied()
        .filter(|r| r.segment.solution_type().is_some())
        .collect();
    let pivot = pivot_field(&relevant, Field::SolutionType, &[], ValueMode::ByValue);
    GrowthAnalysis {
        yoy: yoy_growth(&pivot),
        cagr: cagr(&pivot),
        solution_types: pivot.facets.clone(),
        pivot,
    }
}

// =========================================================================
// Waterfall
// =========================================================================

/// Baseline (US$ Mn) used when the base year has no data
pub const DEFAULT_BASELINE: f64 = 57159.0;

/// Increments for 2025..=2031 substituted when a year pair lacks data,
/// scaled by `baseline / DEFAULT_BASELINE`
pub const FALLBACK_INCREMENTS: [f64; 7] = [2638.4, 2850.4, 3055.6, 3231.0, 3432.9, 3674.2, 3885.1];

pub const WATERFALL_BASE_YEAR: u16 = 2024;

/// Year label of the closing total bar
pub const WATERFALL_TOTAL_YEAR: u16 = 2032;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WaterfallPoint {
    Base { year: u16, value: f64 },
    Increment { year: u16, value: f64, total: f64 },
    Total { year: u16, total: f64 },
}

impl WaterfallPoint {
    pub fn year(&self) -> u16 {
        match *self {
            WaterfallPoint::Base { year, .. }
            | WaterfallPoint::Increment { year, .. }
            | WaterfallPoint::Total { year, .. } => year,
        }
    }

    /// Running total after this point
    pub fn running_total(&self) -> f64 {
        match *self {
            WaterfallPoint::Base { value, .. } => value,
            WaterfallPoint::Increment { total, .. } | WaterfallPoint::Total { total, .. } => total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Waterfall {
    pub baseline: f64,
    pub points: Vec<WaterfallPoint>,
    pub incremental_opportunity: f64,
}

/// Incremental-opportunity series from the 2024 baseline to a 2032 total
pub fn waterfall(records: &[&MarketRecord]) -> Waterfall {
    let mut by_year: BTreeMap<u16, f64> = BTreeMap::new();
    for record in records {
        *by_year.entry(record.year).or_insert(0.0) += record.value_millions();
    }
    let year_total = |year: u16| by_year.get(&year).copied().unwrap_or(0.0);

    let base_total = year_total(WATERFALL_BASE_YEAR);
    let baseline = if base_total == 0.0 {
        DEFAULT_BASELINE
    } else {
        base_total
    };
    let scale = baseline / DEFAULT_BASELINE;

    let mut points = vec![WaterfallPoint::Base {
        year: WATERFALL_BASE_YEAR,
        value: baseline,
    }];
    let mut running = baseline;
    let mut incremental_opportunity = 0.0;

    for (offset, fallback) in FALLBACK_INCREMENTS.iter().enumerate() {
        let year = WATERFALL_BASE_YEAR + 1 + offset as u16;
        let (current, previous) = (year_total(year), year_total(year - 1));
        let increment = if current > 0.0 && previous > 0.0 {
            current - previous
        } else {
            fallback * scale
        };
        running += increment;
        incremental_opportunity += increment;
        points.push(WaterfallPoint::Increment {
            year,
            value: increment,
            total: running,
        });
    }

    points.push(WaterfallPoint::Total {
        year: WATERFALL_TOTAL_YEAR,
        total: running,
    });

    Waterfall {
        baseline,
        points,
        incremental_opportunity,
    }
}

// =========================================================================
// Attractiveness bubbles
// =========================================================================

pub const ASIA_PACIFIC_DESCRIPTION: &str = "Asia Pacific are expected to dominate the Global Shovel Market from rapid industrialization, strong manufacturing capabilities, and robust construction and agricultural sectors that drive significant demand for high-quality shovels.";

/// Substitute values for a region whose computed metrics are not positive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionDefault {
    pub cagr_index: f64,
    pub market_share_index: f64,
    pub incremental_opportunity: f64,
}

const fn region_default(cagr_index: f64, share: f64, opportunity: f64) -> RegionDefault {
    RegionDefault {
        cagr_index,
        market_share_index: share,
        incremental_opportunity: opportunity,
    }
}

pub const REGION_DEFAULTS: [(&str, RegionDefault); 7] = [
    ("APAC", region_default(8.5, 9.2, 12500.0)),
    ("Asia Pacific", region_default(8.5, 9.2, 12500.0)),
    ("Europe", region_default(5.2, 6.8, 6800.0)),
    ("North America", region_default(5.8, 7.1, 7200.0)),
    ("Middle East", region_default(6.5, 3.2, 1200.0)),
    ("Latin America", region_default(4.2, 2.8, 800.0)),
    ("Africa", region_default(3.8, 1.9, 400.0)),
];

/// Used for regions missing from [`REGION_DEFAULTS`]
pub const GENERIC_REGION_DEFAULT: RegionDefault = region_default(5.0, 5.0, 5000.0);

pub fn region_defaults(region: &str) -> RegionDefault {
    REGION_DEFAULTS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, d)| *d)
        .unwrap_or(GENERIC_REGION_DEFAULT)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bubble {
    pub region: &'static str,
    pub cagr_index: f64,
    pub market_share_index: f64,
    pub incremental_opportunity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

const fn default_bubble(region: &'static str, d: RegionDefault) -> Bubble {
    Bubble {
        region,
        cagr_index: d.cagr_index,
        market_share_index: d.market_share_index,
        incremental_opportunity: d.incremental_opportunity,
        description: None,
    }
}

/// Shown when the filtered window contains no regions
pub const DEFAULT_BUBBLES: [Bubble; 6] = [
    Bubble {
        description: Some(ASIA_PACIFIC_DESCRIPTION),
        ..default_bubble("Asia Pacific", REGION_DEFAULTS[1].1)
    },
    default_bubble("Europe", REGION_DEFAULTS[2].1),
    default_bubble("North America", REGION_DEFAULTS[3].1),
    default_bubble("Middle East", REGION_DEFAULTS[4].1),
    default_bubble("Latin America", REGION_DEFAULTS[5].1),
    default_bubble("Africa", REGION_DEFAULTS[6].1),
];

/// Market attractiveness per region over 2025–2032
///
/// Start and end values are the region's summed market value in the first
/// and last window year; share is the region's part of the window total.
/// Indices are capped at 10; a non-positive index or opportunity falls back
/// to the region's default.
pub fn attractiveness(records: &[&MarketRecord]) -> Vec<Bubble> {
    struct RegionSums {
        region: &'static str,
        start: f64,
        end: f64,
        total: f64,
    }

    let mut regions: Vec<RegionSums> = Vec::new();
    let mut all_total = 0.0;
    for record in records {
        if record.year < ATTRACTIVENESS_START_YEAR
            || record.year > ATTRACTIVENESS_END_YEAR
            || record.region.is_empty()
        {
            continue;
        }
        let value = record.value_millions();
        all_total += value;

        let index = match regions.iter().position(|s| s.region == record.region) {
            Some(i) => i,
            None => {
                regions.push(RegionSums {
                    region: record.region,
                    start: 0.0,
                    end: 0.0,
                    total: 0.0,
                });
                regions.len() - 1
            }
        };
        let sums = &mut regions[index];
        sums.total += value;
        if record.year == ATTRACTIVENESS_START_YEAR {
            sums.start += value;
        }
        if record.year == ATTRACTIVENESS_END_YEAR {
            sums.end += value;
        }
    }

    if regions.is_empty() {
        return DEFAULT_BUBBLES.to_vec();
    }

    let span = ATTRACTIVENESS_END_YEAR - ATTRACTIVENESS_START_YEAR;
    regions
        .into_iter()
        .map(|sums| {
            let cagr = if sums.start > 0.0 && sums.end > 0.0 {
                compound_growth(sums.start, sums.end, span)
            } else {
                0.0
            };
            let share = if all_total > 0.0 {
                sums.total / all_total * 100.0
            } else {
                0.0
            };
            let incremental = sums.end - sums.start;

            let cagr_index = (cagr / 10.0).min(10.0);
            let share_index = (share / 10.0).min(10.0);
            let defaults = region_defaults(sums.region);
            let region = if sums.region == "APAC" {
                "Asia Pacific"
            } else {
                sums.region
            };

            Bubble {
                region,
                cagr_index: if cagr_index > 0.0 {
                    cagr_index
                } else {
                    defaults.cagr_index
                },
                market_share_index: if share_index > 0.0 {
                    share_index
                } else {
                    defaults.market_share_index
                },
                incremental_opportunity: if incremental > 0.0 {
                    incremental
                } else {
                    defaults.incremental_opportunity
                },
                description: (region == "Asia Pacific").then_some(ASIA_PACIFIC_DESCRIPTION),
            }
        })
        .collect()
}

// =========================================================================
// Channel split and dashboard bundle
// =========================================================================

/// Per-channel pivots of the Offline and Online subsets
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChannelSplit {
    pub offline: Option<Pivot>,
    pub online: Option<Pivot>,
}

/// Channel pivots for each selected channel type
///
/// Both subsets share the year axis of the full record set; inactive
/// channels are pruned. Nothing is produced when no type is selected.
pub fn channel_split(
    records: &[&MarketRecord],
    selected_types: &[ChannelType],
    mode: ValueMode,
) -> ChannelSplit {
    let years = distinct_years(records);
    let split = |channel_type: ChannelType| -> Option<Pivot> {
        if !selected_types.contains(&channel_type) {
            return None;
        }
        let subset: Vec<&MarketRecord> = records
            .iter()
            .copied()
            .filter(|r| r.distribution_channel_type == channel_type)
            .collect();
        let pivot = pivot_over_years(
            &subset,
            years.clone(),
            |r| Some(r.distribution_channel),
            &[],
            mode,
        );
        Some(pivot.prune_inactive())
    };
    ChannelSplit {
        offline: split(ChannelType::Offline),
        online: split(ChannelType::Online),
    }
}

/// Everything the segment analysis view renders for one filter state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDashboard {
    pub product_type: Pivot,
    pub blade_material: Pivot,
    pub handle_length: Pivot,
    pub application: Pivot,
    pub end_user: Pivot,
    pub country: Pivot,
    pub blade_material_share: Pivot,
    pub handle_length_share: Pivot,
    pub application_share: Pivot,
    pub end_user_share: Pivot,
    pub channel_type_share: Pivot,
    pub region_breakdown: Vec<BreakdownRow>,
    pub channel_split: ChannelSplit,
}

impl SegmentDashboard {
    pub fn build(records: &[&MarketRecord], state: &FilterState) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let mode = state.value_mode;
        let channel_types: Vec<String> = state
            .channel_types
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();

        Self {
            product_type: pivot_field(records, Field::ProductType, &state.product_types, mode),
            blade_material: pivot_field(records, Field::BladeMaterial, &state.blade_materials, mode),
            handle_length: pivot_field(records, Field::HandleLength, &state.handle_lengths, mode),
            application: pivot_field(records, Field::Application, &state.applications, mode),
            end_user: pivot_field(records, Field::EndUser, &state.end_users, mode),
            country: pivot_field(records, Field::Country, &state.countries, mode),
            blade_material_share: stacked_share(
                records,
                Field::BladeMaterial,
                &state.blade_materials,
                mode,
            ),
            handle_length_share: stacked_share(
                records,
                Field::HandleLength,
                &state.handle_lengths,
                mode,
            ),
            application_share: stacked_share(records, Field::Application, &state.applications, mode),
            end_user_share: stacked_share(records, Field::EndUser, &state.end_users, mode),
            channel_type_share: stacked_share(
                records,
                Field::DistributionChannelType,
                &channel_types,
                mode,
            ),
            region_breakdown: region_country_breakdown(records, mode),
            channel_split: channel_split(records, &state.channel_types, mode),
        }
    }
}
