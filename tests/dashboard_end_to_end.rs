use appalti_core::format::{format_euro, format_millions};
use appalti_core::record::RecordStore;
use appalti_core::types::SeriesPoint;
use appalti_core::{Dashboard, DashboardConfig};
use chrono::{TimeZone, Utc};
use serde_json::Value;

const FIXTURE: &str = include_str!("fixtures/contracts.json");

fn fixture_store() -> RecordStore {
    let loaded_at = Utc.with_ymd_and_hms(2025, 11, 30, 18, 0, 0).unwrap();
    RecordStore::from_json_str(FIXTURE)
        .unwrap()
        .with_loaded_at(loaded_at)
}

fn labels(points: &[SeriesPoint]) -> Vec<&str> {
    points.iter().map(|p| p.label.as_str()).collect()
}

#[test]
fn test_chart_series() {
    let store = fixture_store();
    let dashboard = Dashboard::build(&store, &DashboardConfig::default());

    assert_eq!(
        labels(&dashboard.top_administrations),
        vec![
            "ASL Roma 1",
            "Comune di Roma",
            "N/D",
            "Comune di Milano",
            "Università di Pisa"
        ]
    );
    assert_eq!(dashboard.top_administrations[0].value, 375000.0);

    assert_eq!(labels(&dashboard.sectors)[0], "Sanità");
    assert_eq!(dashboard.ai_categories.len(), 5);

    assert_eq!(labels(&dashboard.pnrr_split), vec!["PNRR", "Non-PNRR"]);
    assert_eq!(dashboard.pnrr_split[0].value, 275000.5);
}

#[test]
fn test_trend_series() {
    let store = fixture_store();
    let dashboard = Dashboard::build(&store, &DashboardConfig::default());
    let trend = &dashboard.trend;

    assert_eq!(trend.labels, vec!["2023", "2024", "2025"]);
    assert_eq!(trend.counts, vec![1, 3, 3]);
    assert_eq!(trend.values[0], 0.0);
    assert!((trend.values[1] - 0.45035785).abs() < 1e-9);
    assert!((trend.values[2] - 0.1450005).abs() < 1e-9);

    assert_eq!(trend.count_points()[1], SeriesPoint::new("2024", 3.0));
    assert_eq!(trend.value_points().len(), 3);
}

#[test]
fn test_trend_years_without_data_are_zero() {
    let store = fixture_store();
    let config = DashboardConfig::from_json_str(r#"{"trend_years": ["2022", "2024"]}"#).unwrap();
    let dashboard = Dashboard::build(&store, &config);

    assert_eq!(dashboard.trend.counts, vec![0, 3]);
    assert_eq!(dashboard.trend.values[0], 0.0);
}

#[test]
fn test_long_administration_labels_are_truncated() {
    let store = RecordStore::from_json_str(
        r#"[{"cig": "L1", "denominazione_amministrazione_appaltante": "Azienda Ospedaliera Universitaria Integrata di Verona", "importo_complessivo_gara": 10}]"#,
    )
    .unwrap();
    let dashboard = Dashboard::build(&store, &DashboardConfig::default());

    let label = &dashboard.top_administrations[0].label;
    assert_eq!(label, "Azienda Ospedaliera Universitaria Int...");
    assert_eq!(label.chars().count(), 40);

    // the table keeps the full name
    assert_eq!(
        dashboard.administrations[0].name,
        "Azienda Ospedaliera Universitaria Integrata di Verona"
    );
}

#[test]
fn invariant_empty_store_builds_inert_dashboard() {
    let store = RecordStore::empty();
    let dashboard = Dashboard::build(&store, &DashboardConfig::default());

    assert!(dashboard.top_administrations.is_empty());
    assert!(dashboard.ai_categories.is_empty());
    assert!(dashboard.sectors.is_empty());
    assert!(dashboard.administrations.is_empty());
    assert_eq!(dashboard.pnrr_split[0].value, 0.0);
    assert_eq!(dashboard.pnrr_split[1].value, 0.0);
    assert_eq!(dashboard.trend.counts, vec![0, 0, 0]);
    assert_eq!(dashboard.kpis.metrics.total_count, 0);
    assert_eq!(dashboard.kpis.metrics.average_value, 0.0);
    assert_eq!(dashboard.kpis.metrics.pnrr_percentage, 0.0);
}

#[test]
fn invariant_build_is_deterministic() {
    let store = fixture_store();
    let config = DashboardConfig::default();

    let first = serde_json::to_string_pretty(&Dashboard::build(&store, &config)).unwrap();
    let second = serde_json::to_string_pretty(&Dashboard::build(&store, &config)).unwrap();

    assert_eq!(first, second, "Dashboard output is not deterministic");
}

#[test]
fn golden_dashboard_serialization() {
    let store = fixture_store();
    let dashboard = Dashboard::build(&store, &DashboardConfig::default());
    let json: Value = serde_json::to_value(&dashboard).unwrap();

    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 10);

    let json_str = serde_json::to_string(&dashboard).unwrap();
    let top_pos = json_str.find("\"top_administrations\":").unwrap();
    let trend_pos = json_str.find("\"trend\":").unwrap();
    let kpis_pos = json_str.find("\"kpis\":").unwrap();
    let admin_pos = json_str.find("\"administrations\":").unwrap();
    assert!(top_pos < trend_pos);
    assert!(trend_pos < kpis_pos);
    assert!(kpis_pos < admin_pos);

    assert_eq!(
        json["pnrr_split"],
        serde_json::json!([
            { "label": "PNRR", "value": 275000.5 },
            { "label": "Non-PNRR", "value": 320357.85 }
        ])
    );
    assert_eq!(json["kpis"]["last_updated"], "30/11/2025 18:00");
    assert_eq!(
        json["kpis"]["dataset_version"],
        "sha256:65e253963a66430a3212510d9df2195b7478664b7ad2049750e02cd4f3e9fdbe"
    );
    assert_eq!(json["kpis"]["metrics"]["distinct_provinces"], 3);
    assert_eq!(json["administrations"][0]["position"], 1);
    assert_eq!(json["administrations"][0]["sector"], "Sanità");
}

#[test]
fn test_format_euro() {
    assert_eq!(format_euro(0.0), "€0");
    assert_eq!(format_euro(357.85), "€357,85");
    assert_eq!(format_euro(1234567.5), "€1.234.567,5");
    assert_eq!(format_euro(150000.0), "€150.000");
    assert_eq!(format_euro(999.999), "€1.000");
    assert_eq!(format_euro(f64::NAN), "€0");
}

#[test]
fn test_format_millions() {
    assert_eq!(format_millions(1_234_567.0), "€1.2M");
    assert_eq!(format_millions(0.0), "€0.0M");
    assert_eq!(format_millions(380_000.0), "€0.4M");
}

#[test]
fn test_config_defaults_and_overrides() {
    let config = DashboardConfig::default();
    assert_eq!(config, DashboardConfig::v0());
    assert_eq!(config.min_query_chars, 3);
    assert_eq!(config.suggestion_limit, 10);
    assert_eq!(config.display_limit, 50);
    assert_eq!(config.top_administrations, 10);
    assert_eq!(config.administration_ranking_size, 30);

    let partial = DashboardConfig::from_json_str(r#"{"display_limit": 25}"#).unwrap();
    assert_eq!(partial.display_limit, 25);
    assert_eq!(partial.suggestion_limit, 10);
    assert_eq!(partial.trend_years, config.trend_years);

    assert!(DashboardConfig::from_json_str("{").is_err());
}
