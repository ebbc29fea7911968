//! Synthetic market record generator
//!
//! Generation is the cartesian product of the dimension tables
//! (year × region × country × product type × blade material × handle length ×
//! application × end user), walked in nested-loop order by [`Combinations`].
//! Each combination receives randomly drawn channel/brand/company/segment
//! attributes and multiplicative metrics from the seeded [`Lcg`].
//!
//! The draw order inside [`draw_record`] is part of the dataset's identity:
//! reordering any draw changes every subsequent record.

use std::time::Instant;

use parking_lot::Mutex;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::dimensions::{
    brand_premium, BladeMaterialDef, HandleLengthDef, ProductTypeDef, RegionDef, Tables,
    Taxonomy, UsageDef, GROWTH_BASE_YEAR,
};
use crate::core::rng::{Lcg, DEFAULT_SEED};
use crate::entities::record::{ChannelType, MarketRecord};
use crate::entities::segment::{Segment, SegmentDetail};

/// First record id of every generated dataset
pub const FIRST_RECORD_ID: u32 = 100_000;

/// Probability threshold above which a record sells online (40% online)
pub const ONLINE_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Dimension table '{0}' is empty")]
    EmptyDimension(&'static str),

    #[error("Region '{0}' has no countries")]
    EmptyRegion(&'static str),
}

/// What happens to the PRNG state between generations in one process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReseedPolicy {
    /// Every generation restarts from the configured seed (reproducible)
    #[default]
    EveryGeneration,
    /// The PRNG continues where the previous generation stopped
    ContinueSequence,
}

impl std::fmt::Display for ReseedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReseedPolicy::EveryGeneration => write!(f, "every-generation"),
            ReseedPolicy::ContinueSequence => write!(f, "continue-sequence"),
        }
    }
}

/// Round to 2 decimals, ties toward +∞
pub fn round2(x: f64) -> f64 {
    (x * 100.0 + 0.5).floor() / 100.0
}

// =========================================================================
// Combinations
// =========================================================================

/// One cell of the dimension cross-product
#[derive(Debug, Clone, Copy)]
pub struct Combination {
    pub year: u16,
    pub region: &'static RegionDef,
    pub country: &'static str,
    pub product_type: &'static ProductTypeDef,
    pub blade_material: &'static BladeMaterialDef,
    pub handle_length: &'static HandleLengthDef,
    pub application: &'static UsageDef,
    pub end_user: &'static UsageDef,
}

impl Combination {
    fn years_elapsed(&self) -> f64 {
        f64::from(self.year) - f64::from(GROWTH_BASE_YEAR)
    }

    /// Unit price from a base price and the brand premium (2% annual drift)
    pub fn price(&self, base_price: f64, brand_premium: f64) -> f64 {
        base_price
            * self.product_type.price
            * self.blade_material.price
            * brand_premium
            * (1.0 + self.years_elapsed() * 0.02)
    }

    /// Units sold from a base volume (5% annual growth)
    pub fn volume_units(&self, base_volume: f64) -> u64 {
        let volume = base_volume
            * self.region.volume
            * self.product_type.volume
            * self.blade_material.volume
            * self.application.volume
            * self.end_user.volume
            * self.handle_length.factor
            * (1.0 + self.years_elapsed() * 0.05);
        volume.floor() as u64
    }
}

/// Total number of combinations the tables produce
pub fn combination_count(tables: &Tables) -> usize {
    let countries: usize = tables.regions.iter().map(|r| r.countries.len()).sum();
    tables.years.len()
        * countries
        * tables.product_types.len()
        * tables.blade_materials.len()
        * tables.handle_lengths.len()
        * tables.applications.len()
        * tables.end_users.len()
}

const DEPTH: usize = 8;

/// Nested-loop walk over the dimension tables
///
/// An odometer over eight indices; the country wheel's size depends on the
/// current region.
pub struct Combinations {
    tables: &'static Tables,
    idx: [usize; DEPTH],
    remaining: usize,
}

impl Combinations {
    pub fn new(tables: &'static Tables) -> Self {
        Self {
            tables,
            idx: [0; DEPTH],
            remaining: combination_count(tables),
        }
    }

    fn wheel_len(&self, level: usize) -> usize {
        let t = self.tables;
        match level {
            0 => t.years.len(),
            1 => t.regions.len(),
            2 => t.regions[self.idx[1]].countries.len(),
            3 => t.product_types.len(),
            4 => t.blade_materials.len(),
            5 => t.handle_lengths.len(),
            6 => t.applications.len(),
            _ => t.end_users.len(),
        }
    }

    fn current(&self) -> Combination {
        let t = self.tables;
        let region = &t.regions[self.idx[1]];
        Combination {
            year: t.years[self.idx[0]],
            region,
            country: region.countries[self.idx[2]],
            product_type: &t.product_types[self.idx[3]],
            blade_material: &t.blade_materials[self.idx[4]],
            handle_length: &t.handle_lengths[self.idx[5]],
            application: &t.applications[self.idx[6]],
            end_user: &t.end_users[self.idx[7]],
        }
    }

    fn advance(&mut self) {
        for level in (0..DEPTH).rev() {
            self.idx[level] += 1;
            if level == 0 || self.idx[level] < self.wheel_len(level) {
                return;
            }
            self.idx[level] = 0;
        }
    }
}

impl Iterator for Combinations {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let combination = self.current();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(combination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Combinations {}

// =========================================================================
// Per-record draws
// =========================================================================

fn draw_taxonomy(
    taxonomy: Taxonomy,
    rng: &mut Lcg,
) -> (&'static str, &'static str, Option<&'static str>) {
    let root = rng.pick(taxonomy);
    let node = rng.pick(root.nodes);
    let leaf = if node.children.is_empty() {
        None
    } else {
        Some(*rng.pick(node.children))
    };
    (root.name, node.name, leaf)
}

/// Draw the hierarchy payload for a segment
pub fn draw_segment(tables: &Tables, segment: Segment, rng: &mut Lcg) -> SegmentDetail {
    match segment {
        Segment::ByComponent => {
            let (component_type, category, sub_category) =
                draw_taxonomy(tables.component_hierarchy, rng);
            SegmentDetail::Component {
                component_type,
                category,
                sub_category,
            }
        }
        Segment::CrossProductTechnology => {
            let (level1, level2, level3) = draw_taxonomy(tables.cross_technology_hierarchy, rng);
            SegmentDetail::CrossTechnology {
                level1,
                level2,
                level3,
            }
        }
        Segment::CrossProductRetail => {
            let (level1, level2, level3) = draw_taxonomy(tables.cross_retail_hierarchy, rng);
            SegmentDetail::CrossRetail {
                level1,
                level2,
                level3,
            }
        }
        Segment::ByProductType => SegmentDetail::ProductType {
            solution_type: *rng.pick(tables.solution_types),
        },
        Segment::ByTechnology => SegmentDetail::Technology {
            technology_type: *rng.pick(tables.technology_types),
        },
        Segment::ByRetailFormat => SegmentDetail::RetailFormat {
            retail_format: *rng.pick(tables.retail_formats),
        },
        Segment::ByModelType => SegmentDetail::ModelType {
            model_type: *rng.pick(tables.model_types),
        },
    }
}

/// Build one record for a combination, consuming draws in dataset order
pub fn draw_record(
    tables: &Tables,
    combination: &Combination,
    record_id: u32,
    rng: &mut Lcg,
) -> MarketRecord {
    let channel_type = if rng.next_unit() > ONLINE_THRESHOLD {
        ChannelType::Online
    } else {
        ChannelType::Offline
    };
    let distribution_channel = *rng.pick(tables.channels_for(channel_type));

    let brand_index = rng.index(tables.brands.len());
    let brand = tables.brands[brand_index];
    let premium = brand_premium(brand_index);
    let company = *rng.pick(tables.companies);
    let segment = *rng.pick(tables.segments);
    let detail = draw_segment(tables, segment, rng);

    let price = combination.price(rng.uniform(10.0, 90.0), premium);
    let volume_units = combination.volume_units(rng.uniform(100.0, 900.0));
    let revenue = price * volume_units as f64;
    let market_value = revenue * rng.uniform(0.9, 0.2);
    let market_share = rng.uniform(1.0, 24.0) * combination.region.market_share * premium;
    let cagr = rng.uniform(-2.0, 12.0) * combination.product_type.cagr;
    let yoy_growth = rng.uniform(-5.0, 20.0);
    let qty = (volume_units as f64 * rng.uniform(0.8, 0.4)).floor() as u64;

    MarketRecord {
        record_id,
        year: combination.year,
        region: combination.region.name,
        country: combination.country,
        segment: detail,
        product_type: combination.product_type.name,
        blade_material: combination.blade_material.name,
        handle_length: combination.handle_length.name,
        application: combination.application.name,
        end_user: combination.end_user.name,
        distribution_channel_type: channel_type,
        distribution_channel,
        brand,
        company,
        price: round2(price),
        volume_units,
        qty,
        revenue: round2(revenue),
        market_value_usd: round2(market_value),
        value: round2(market_value),
        market_share_pct: round2(market_share),
        cagr: round2(cagr),
        yoy_growth: round2(yoy_growth),
    }
}

fn build(tables: &'static Tables, rng: &mut Lcg) -> Vec<MarketRecord> {
    let combinations = Combinations::new(tables);
    let mut records = Vec::with_capacity(combinations.len());
    for (offset, combination) in combinations.enumerate() {
        let record_id = FIRST_RECORD_ID + offset as u32;
        records.push(draw_record(tables, &combination, record_id, rng));
    }
    records
}

// =========================================================================
// Generator
// =========================================================================

/// Produces the full dataset from a set of tables and a seed
pub struct Generator {
    tables: &'static Tables,
    seed: u64,
    policy: ReseedPolicy,
    rng: Mutex<Lcg>,
}

impl Generator {
    /// Generator over the standard tables
    pub fn new(seed: u64, policy: ReseedPolicy) -> Self {
        Self::with_tables(&Tables::STANDARD, seed, policy)
    }

    pub fn with_tables(tables: &'static Tables, seed: u64, policy: ReseedPolicy) -> Self {
        Self {
            tables,
            seed,
            policy,
            rng: Mutex::new(Lcg::seed_from_u64(seed)),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn policy(&self) -> ReseedPolicy {
        self.policy
    }

    pub fn tables(&self) -> &'static Tables {
        self.tables
    }

    /// Generate every record; fails only when a dimension table is empty
    pub fn generate(&self) -> Result<Vec<MarketRecord>, GenerateError> {
        self.tables.validate()?;
        let started = Instant::now();

        let records = match self.policy {
            ReseedPolicy::EveryGeneration => {
                let mut rng = Lcg::seed_from_u64(self.seed);
                build(self.tables, &mut rng)
            }
            ReseedPolicy::ContinueSequence => {
                let mut rng = self.rng.lock();
                build(self.tables, &mut rng)
            }
        };

        debug!(
            records = records.len(),
            seed = self.seed,
            policy = %self.policy,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generated market dataset"
        );
        Ok(records)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new(DEFAULT_SEED, ReseedPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dimensions::{REGIONS, YEARS};

    static TINY: Tables = Tables {
        years: &[2024, 2025],
        regions: &[RegionDef {
            name: "North America",
            countries: &["U.S.", "Canada"],
            volume: 1.5,
            market_share: 1.4,
        }],
        ..Tables::STANDARD
    };

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(2.3449), 2.34);
        assert_eq!(round2(-1.234), -1.23);
    }

    #[test]
    fn test_reference_first_record() {
        static FIRST_BLOCK: Tables = Tables {
            years: &[2021],
            regions: &[RegionDef {
                name: "North America",
                countries: &["U.S."],
                volume: 1.5,
                market_share: 1.4,
            }],
            ..Tables::STANDARD
        };
        let records = Generator::with_tables(&FIRST_BLOCK, DEFAULT_SEED, ReseedPolicy::default())
            .generate()
            .unwrap();
        let r = &records[0];
        assert_eq!(r.record_id, 100_000);
        assert_eq!(r.year, 2021);
        assert_eq!(r.country, "U.S.");
        assert_eq!(r.product_type, "Digging Shovel");
        assert_eq!(r.end_user, "Commercial/Industrial Users");
        assert_eq!(r.distribution_channel_type, ChannelType::Online);
        assert_eq!(r.distribution_channel, "Brand's/Company's Own Website");
        assert_eq!(r.brand, "Garant");
        assert_eq!(r.company, "Seymour Manufacturing");
        assert_eq!(
            r.segment,
            SegmentDetail::Technology {
                technology_type: "Computer Vision and AI Scanning"
            }
        );
        assert_eq!(r.price, 40.73);
        assert_eq!(r.volume_units, 525);
        assert_eq!(r.qty, 575);
        assert_eq!(r.revenue, 21381.24);
        assert_eq!(r.market_value_usd, 22249.3);
        assert_eq!(r.market_share_pct, 22.11);
        assert_eq!(r.cagr, 7.18);
        assert_eq!(r.yoy_growth, 1.43);
    }

    #[test]
    fn test_combination_count_standard() {
        assert_eq!(combination_count(&Tables::STANDARD), 840_000);
        assert_eq!(combination_count(&TINY), 2 * 2 * 5 * 5 * 4 * 7 * 2);
    }

    #[test]
    fn test_combinations_nested_order() {
        let combos: Vec<_> = Combinations::new(&TINY).collect();
        assert_eq!(combos.len(), combination_count(&TINY));

        let first = &combos[0];
        assert_eq!(first.year, 2024);
        assert_eq!(first.country, "U.S.");
        assert_eq!(first.end_user.name, "Commercial/Industrial Users");

        // innermost wheel turns first
        assert_eq!(combos[1].end_user.name, "Residential Users");
        assert_eq!(combos[2].application.name, "Agriculture & Landscaping");

        // country wheel turns after one full product block
        let per_country = 5 * 5 * 4 * 7 * 2;
        assert_eq!(combos[per_country].country, "Canada");
        assert_eq!(combos[2 * per_country].year, 2025);
        assert_eq!(combos[2 * per_country].country, "U.S.");

        let last = combos.last().unwrap();
        assert_eq!(last.year, 2025);
        assert_eq!(last.country, "Canada");
        assert_eq!(last.product_type.name, "Others");
    }

    #[test]
    fn test_combinations_country_scoped_by_region() {
        static TWO_REGIONS: Tables = Tables {
            years: &[2030],
            regions: &[REGIONS[0], REGIONS[3]],
            ..Tables::STANDARD
        };
        for combo in Combinations::new(&TWO_REGIONS) {
            assert!(combo.region.countries.contains(&combo.country));
        }
        let countries: std::collections::BTreeSet<_> =
            Combinations::new(&TWO_REGIONS).map(|c| c.country).collect();
        assert_eq!(countries.len(), 5);
    }

    #[test]
    fn test_combinations_exact_size() {
        let mut combos = Combinations::new(&TINY);
        assert_eq!(combos.len(), 5600);
        combos.next();
        assert_eq!(combos.len(), 5599);
    }

    #[test]
    fn test_price_and_volume_factors() {
        let combo = Combinations::new(&Tables::STANDARD).next().unwrap();
        assert_eq!(combo.year, YEARS[0]);
        // Digging Shovel (1.0) × Carbon Steel (0.8) × premium 1.0, no drift in 2021
        assert!((combo.price(50.0, 1.0) - 40.0).abs() < 1e-9);
        // 1.5 × 1.2 × 1.3 × 1.4 × 1.2 × 0.9 = 3.53808
        assert_eq!(combo.volume_units(100.0), 353);

        let later = Combination {
            year: 2031,
            ..combo
        };
        assert!((later.price(50.0, 1.0) - 48.0).abs() < 1e-9);
        assert_eq!(later.volume_units(100.0), 530);
    }

    #[test]
    fn test_draw_segment_populates_own_family() {
        let mut rng = Lcg::default();
        for segment in Segment::ALL {
            for _ in 0..20 {
                let detail = draw_segment(&Tables::STANDARD, segment, &mut rng);
                assert_eq!(detail.segment(), segment);
            }
        }
    }

    #[test]
    fn test_component_subcategory_only_when_available() {
        let mut rng = Lcg::new(9);
        for _ in 0..200 {
            if let SegmentDetail::Component {
                component_type,
                category,
                sub_category,
            } = draw_segment(&Tables::STANDARD, Segment::ByComponent, &mut rng)
            {
                let root = Tables::STANDARD
                    .component_hierarchy
                    .iter()
                    .find(|r| r.name == component_type)
                    .unwrap();
                let node = root.nodes.iter().find(|n| n.name == category).unwrap();
                assert_eq!(sub_category.is_some(), !node.children.is_empty());
            }
        }
    }

    #[test]
    fn test_tiny_generation_ids_and_invariants() {
        let generator = Generator::with_tables(&TINY, DEFAULT_SEED, ReseedPolicy::EveryGeneration);
        let records = generator.generate().unwrap();
        assert_eq!(records.len(), 5600);
        assert_eq!(records[0].record_id, FIRST_RECORD_ID);
        assert!(records.windows(2).all(|w| w[1].record_id == w[0].record_id + 1));
        for r in &records {
            let channels = TINY.channels_for(r.distribution_channel_type);
            assert!(channels.contains(&r.distribution_channel));
            assert!(r.market_value_usd >= r.revenue * 0.9 - 0.01);
            assert!(r.market_value_usd <= r.revenue * 1.1 + 0.01);
            assert_eq!(r.value, r.market_value_usd);
        }
    }

    #[test]
    fn test_reseed_every_generation_is_reproducible() {
        let generator = Generator::with_tables(&TINY, 7, ReseedPolicy::EveryGeneration);
        assert_eq!(generator.generate().unwrap(), generator.generate().unwrap());
    }

    #[test]
    fn test_continue_sequence_differs_after_first() {
        let continuing = Generator::with_tables(&TINY, 7, ReseedPolicy::ContinueSequence);
        let reseeding = Generator::with_tables(&TINY, 7, ReseedPolicy::EveryGeneration);
        let first = continuing.generate().unwrap();
        let second = continuing.generate().unwrap();
        assert_eq!(first, reseeding.generate().unwrap());
        assert_ne!(first, second);
    }

    #[test]
    fn test_empty_tables_fail() {
        static EMPTY: Tables = Tables {
            end_users: &[],
            ..Tables::STANDARD
        };
        let generator = Generator::with_tables(&EMPTY, 1, ReseedPolicy::EveryGeneration);
        assert_eq!(
            generator.generate(),
            Err(GenerateError::EmptyDimension("end users"))
        );
    }
}
