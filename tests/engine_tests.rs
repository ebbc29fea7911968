//! Library-level tests over the full standard dataset

mod common;

use std::collections::BTreeSet;

use common::dataset;
use mlens::core::analytics::{
    attractiveness, pivot_field, region_country_breakdown, total, waterfall, Kpi,
    SegmentDashboard, WaterfallPoint,
};
use mlens::core::dimensions::Tables;
use mlens::core::filter::{filter_records, FieldFilter, FilterState};
use mlens::core::{DataCache, Generator, ReseedPolicy, ValueMode};
use mlens::entities::{ChannelType, Field, SegmentDetail};

#[test]
fn test_dataset_size_and_ids() {
    let data = dataset();
    assert_eq!(data.len(), 840_000);
    assert_eq!(data[0].record_id, 100_000);
    assert_eq!(data[data.len() - 1].record_id, 939_999);
    assert!(data.windows(2).all(|w| w[1].record_id == w[0].record_id + 1));
}

#[test]
fn test_every_record_is_consistent_with_the_tables() {
    let tables = &Tables::STANDARD;
    for r in dataset() {
        let countries = tables.countries_for(r.region).unwrap();
        assert!(countries.contains(&r.country), "{} not in {}", r.country, r.region);
        assert!(tables
            .channels_for(r.distribution_channel_type)
            .contains(&r.distribution_channel));
        assert_eq!(r.value, r.market_value_usd);
        assert!(r.price > 0.0);

        let ratio = r.market_value_usd / r.revenue;
        assert!((0.899..1.101).contains(&ratio), "value/revenue ratio {}", ratio);

        if let SegmentDetail::Component { sub_category, .. } = r.segment {
            assert!(sub_category.map_or(true, |s| !s.is_empty()));
        }
    }
}

#[test]
fn test_each_combination_appears_once_per_year() {
    let data = dataset();
    let us_2024 = filter_records(
        data,
        &FieldFilter::new()
            .with(Field::Year, ["2024"])
            .with(Field::Country, ["U.S."]),
    );
    assert_eq!(us_2024.len(), 1400);

    let combos: BTreeSet<_> = us_2024
        .iter()
        .map(|r| {
            (
                r.product_type,
                r.blade_material,
                r.handle_length,
                r.application,
                r.end_user,
            )
        })
        .collect();
    assert_eq!(combos.len(), 1400);
}

#[test]
fn test_filter_is_idempotent() {
    let filter = FieldFilter::new()
        .with(Field::Region, ["Asia Pacific"])
        .with(Field::DistributionChannelType, ["Online"])
        .with_year_range(2026, 2028);
    let once = filter_records(dataset(), &filter);
    let twice = filter_records(once.iter().copied(), &filter);
    assert_eq!(once, twice);
    assert!(!once.is_empty());
    for r in &once {
        assert_eq!(r.distribution_channel_type, ChannelType::Online);
        assert!((2026..=2028).contains(&r.year));
    }
}

#[test]
fn test_us_2024_product_type_pivot_end_to_end() {
    let records = filter_records(
        dataset(),
        &FieldFilter::new()
            .with(Field::Year, [" 2024 "])
            .with(Field::Country, ["U.S."]),
    );
    let pivot = pivot_field(&records, Field::ProductType, &[], ValueMode::ByValue);
    assert_eq!(pivot.years, vec![2024]);
    assert_eq!(pivot.facets.len(), 5);

    let pivot_total = pivot.row_total(0);
    let direct = total(&records, ValueMode::ByValue);
    assert!((pivot_total - direct).abs() < 1e-6);
}

#[test]
fn test_dashboard_defaults_on_full_dataset() {
    let data = dataset();
    let state = FilterState::dashboard_defaults(data);
    assert_eq!(state.years, vec![2024, 2025]);
    assert_eq!(state.regions.len(), 6);
    assert_eq!(state.product_types.len(), 5);

    let records = state.apply(data);
    // two years × every combination
    assert_eq!(records.len(), 2 * 56_000);

    let dashboard = SegmentDashboard::build(&records, &state);
    assert_eq!(dashboard.product_type.years, vec![2024, 2025]);
    assert!(dashboard.channel_split.offline.is_none());

    let kpi = Kpi::compute(&records, ValueMode::ByValue);
    assert!(kpi.label.ends_with('M'));
}

#[test]
fn test_region_breakdown_sums_to_hundred() {
    let records = filter_records(dataset(), &FieldFilter::new().with(Field::Year, ["2030"]));
    let rows = region_country_breakdown(&records, ValueMode::ByValue);
    assert_eq!(rows.len(), 40);

    let europe: f64 = rows
        .iter()
        .filter(|r| r.region == "Europe")
        .map(|r| r.value)
        .sum();
    assert!((europe - 100.0).abs() < 1e-6);
}

#[test]
fn test_waterfall_totals_add_up() {
    let records: Vec<_> = dataset().iter().collect();
    let series = waterfall(&records);
    assert_eq!(series.points.len(), 9);

    let baseline = total(
        &filter_records(dataset(), &FieldFilter::new().with(Field::Year, ["2024"])),
        ValueMode::ByValue,
    );
    assert!((series.baseline - baseline).abs() < 1e-6);

    match series.points[8] {
        WaterfallPoint::Total { year, total } => {
            assert_eq!(year, 2032);
            assert!((total - (series.baseline + series.incremental_opportunity)).abs() < 1e-6);
        }
        other => panic!("expected a total point, got {:?}", other),
    }
}

#[test]
fn test_attractiveness_covers_every_region() {
    let records: Vec<_> = dataset().iter().collect();
    let bubbles = attractiveness(&records);
    let regions: Vec<_> = bubbles.iter().map(|b| b.region).collect();
    assert_eq!(
        regions,
        vec![
            "North America",
            "Europe",
            "Asia Pacific",
            "Middle East & Africa",
            "Latin America",
            "ASEAN",
        ]
    );
    for bubble in &bubbles {
        assert!(bubble.cagr_index > 0.0 && bubble.cagr_index <= 10.0);
        assert!(bubble.market_share_index > 0.0 && bubble.market_share_index <= 10.0);
        assert!(bubble.incremental_opportunity > 0.0);
    }
}

#[test]
fn test_cache_regenerates_identically() {
    let cache = DataCache::new(Generator::new(42, ReseedPolicy::EveryGeneration));
    let first = cache.get_data();
    cache.clear();
    let second = cache.get_data();
    assert_eq!(cache.generation_count(), 2);
    assert_eq!(&first[..10], &second[..10]);
    assert_eq!(first[0], dataset()[0]);
}
