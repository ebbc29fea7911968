//! CLI and command output tests

mod common;

use common::{json_output, mlens, write_config};
use predicates::prelude::*;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    mlens()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("market-research"));
}

#[test]
fn test_version_displays() {
    mlens()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mlens"));
}

#[test]
fn test_unknown_command_fails() {
    mlens()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_bash() {
    mlens()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mlens"));
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn test_records_count_full_dataset() {
    mlens()
        .args(["records", "--count"])
        .assert()
        .success()
        .stdout("840000\n");
}

#[test]
fn test_records_count_region_and_year() {
    // 14 European countries × 1400 product combinations
    mlens()
        .args(["records", "--count", "--region", "Europe", "--year", "2024"])
        .assert()
        .success()
        .stdout("19600\n");
}

#[test]
fn test_records_country_outside_region_is_dropped() {
    // U.S. is not in Europe, so only Germany remains selected
    mlens()
        .args([
            "records", "--count", "--year", "2024", "--region", "Europe", "--country", "Germany,U.S.",
        ])
        .assert()
        .success()
        .stdout("1400\n");
}

#[test]
fn test_records_json_first_record() {
    let json = json_output(mlens().args(["records", "--limit", "3", "-o", "json"]));
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 3);

    let first = &records[0];
    assert_eq!(first["recordId"], 100000);
    assert_eq!(first["year"], 2021);
    assert_eq!(first["country"], "U.S.");
    assert_eq!(first["brand"], "Garant");
    assert_eq!(first["company"], "Seymour Manufacturing");
    assert_eq!(first["segment"], "By Technology");
    assert_eq!(first["price"], 40.73);
    assert_eq!(first["volumeUnits"], 525);
    assert_eq!(records[2]["recordId"], 100002);
}

#[test]
fn test_records_csv_header() {
    mlens()
        .args(["records", "--limit", "2", "-o", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "ID,Year,Region,Country,Segment,Product Type,Channel,Brand,Company,",
        ));
}

#[test]
fn test_records_generic_filter() {
    mlens()
        .args([
            "records",
            "--count",
            "--year",
            "2024",
            "--country",
            "U.S.",
            "--filter",
            "productType=Digging Shovel",
            "--filter",
            "end_user=Residential Users",
        ])
        .assert()
        .success()
        // 5 blades × 4 handles × 7 applications
        .stdout("140\n");
}

#[test]
fn test_records_unknown_filter_field_fails() {
    mlens()
        .args(["records", "--count", "--filter", "flavour=mint"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field"));
}

#[test]
fn test_records_bad_year_range_fails() {
    mlens()
        .args(["records", "--count", "--year-range", "2025-2030"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FROM..TO"));
}

// ============================================================================
// Aggregations
// ============================================================================

#[test]
fn test_pivot_product_type_single_country_year() {
    let json = json_output(mlens().args([
        "pivot", "--by", "productType", "--country", "U.S.", "--year", "2024", "-o", "json",
    ]));
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);

    let row = rows[0].as_object().unwrap();
    assert_eq!(row["year"], "2024");
    // year plus the five product types
    assert_eq!(row.len(), 6);
    assert!(row["Digging Shovel"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_pivot_table_output() {
    mlens()
        .args(["pivot", "--by", "region", "--year", "2030"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Market Value (US$ Mn) by region"))
        .stdout(predicate::str::contains("Latin America"));
}

#[test]
fn test_pivot_unknown_field_fails() {
    mlens()
        .args(["pivot", "--by", "nonsense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field"));
}

#[test]
fn test_kpi_volume_mode() {
    let json = json_output(mlens().args([
        "kpi", "--mode", "volume", "--country", "Canada", "--year", "2025", "-o", "json",
    ]));
    assert_eq!(json["records"], 1400);
    assert_eq!(json["mode"], "By Volume");
    assert!(json["label"].as_str().unwrap().ends_with("K Units"));
}

#[test]
fn test_kpi_empty_selection_is_na() {
    let json = json_output(mlens().args(["kpi", "--country", "Atlantis", "-o", "json"]));
    assert_eq!(json["records"], 0);
    assert_eq!(json["label"], "N/A");
    assert!(json["total"].is_null());
}

#[test]
fn test_waterfall_series_shape() {
    let json = json_output(mlens().args(["waterfall", "--region", "Europe", "-o", "json"]));
    let points = json["points"].as_array().unwrap();
    assert_eq!(points.len(), 9);
    assert_eq!(points[0]["kind"], "base");
    assert_eq!(points[0]["year"], 2024);
    assert_eq!(points[8]["kind"], "total");
    assert_eq!(points[8]["year"], 2032);
}

#[test]
fn test_bubble_one_per_region() {
    let json = json_output(mlens().args(["bubble", "-o", "json"]));
    let bubbles = json.as_array().unwrap();
    assert_eq!(bubbles.len(), 6);
    for bubble in bubbles {
        assert!(bubble["cagrIndex"].as_f64().unwrap() <= 10.0);
        assert!(bubble["marketShareIndex"].as_f64().unwrap() <= 10.0);
    }
}

#[test]
fn test_growth_by_solution_type() {
    let json = json_output(mlens().args(["growth", "--region", "ASEAN", "-o", "json"]));
    let solution_types = json["solutionTypes"].as_array().unwrap();
    assert!(!solution_types.is_empty());
    assert!(json["cagr"].as_array().unwrap().len() <= solution_types.len());
}

#[test]
fn test_dashboard_defaults() {
    let json = json_output(mlens().args(["dashboard", "-o", "json"]));
    assert_eq!(json["filters"]["years"], serde_json::json!([2024, 2025]));
    assert_eq!(json["filters"]["regions"].as_array().unwrap().len(), 6);
    assert_eq!(json["charts"]["productType"]["facets"].as_array().unwrap().len(), 5);
    assert_eq!(json["kpi"]["mode"], "By Value");
}

#[test]
fn test_breakdown_markdown() {
    mlens()
        .args(["breakdown", "--year", "2024", "--region", "North America", "-o", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| 2024 - North America | Canada |"));
}

// ============================================================================
// Options and hierarchies
// ============================================================================

#[test]
fn test_options_cascaded_countries() {
    let json = json_output(mlens().args([
        "options", "--facet", "region", "--region", "North America", "-o", "json",
    ]));
    assert_eq!(json["facets"]["region"].as_array().unwrap().len(), 6);
    assert_eq!(json["countries"], serde_json::json!(["Canada", "U.S."]));
    assert_eq!(json["channels"].as_array().unwrap().len(), 2);
}

#[test]
fn test_hierarchy_flat_listing() {
    mlens()
        .args(["hierarchy", "model-types"])
        .assert()
        .success()
        .stdout("Cash Model\nCashless Model\n");
}

#[test]
fn test_hierarchy_csv_paths() {
    mlens()
        .args(["hierarchy", "component", "-o", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Level 1,Level 2,Level 3\n"));
}

// ============================================================================
// Config and determinism
// ============================================================================

#[test]
fn test_fingerprint_stable_by_default() {
    let json = json_output(mlens().args(["fingerprint", "-o", "json"]));
    assert_eq!(json["records"], 840000);
    assert_eq!(json["stable"], true);
    let digests = json["digests"].as_array().unwrap();
    assert_eq!(digests.len(), 2);
    assert_eq!(digests[0], digests[1]);
}

#[test]
fn test_fingerprint_continue_sequence_from_config() {
    let (_tmp, path) = write_config("reseed: continue-sequence\n");
    let json = json_output(
        mlens()
            .args(["fingerprint", "-o", "json", "--config"])
            .arg(&path),
    );
    assert_eq!(json["reseed"], "continue-sequence");
    assert_eq!(json["stable"], false);
}

#[test]
fn test_config_from_environment() {
    let (_tmp, path) = write_config("seed: 7\ndefault_limit: 4\n");
    let json = json_output(
        mlens()
            .env("MLENS_CONFIG", &path)
            .args(["records", "-o", "json"]),
    );
    assert_eq!(json.as_array().unwrap().len(), 4);
}

#[test]
fn test_seed_flag_changes_dataset() {
    let default = json_output(mlens().args(["records", "--limit", "1", "-o", "json"]));
    let reseeded =
        json_output(mlens().args(["records", "--limit", "1", "--seed", "7", "-o", "json"]));
    assert_eq!(default[0]["recordId"], reseeded[0]["recordId"]);
    assert_ne!(default[0]["price"], reseeded[0]["price"]);
}

#[test]
fn test_invalid_config_fails() {
    let (_tmp, path) = write_config("seed: [1, 2\n");
    mlens()
        .args(["kpi", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}
