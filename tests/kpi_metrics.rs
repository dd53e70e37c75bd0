use appalti_core::aggregation::{aggregate, dashboard_reducers, BY_AI_CATEGORY, BY_SECTOR};
use appalti_core::kpi::{
    administration_ranking, category_breakdown, compute_kpis, kpi_bundle, median, pnrr_analysis,
    sector_breakdown,
};
use appalti_core::record::{ContractRecord, RecordStore};
use chrono::{TimeZone, Utc};

const FIXTURE: &str = include_str!("fixtures/contracts.json");

fn fixture_store() -> RecordStore {
    RecordStore::from_json_str(FIXTURE).unwrap()
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_fixture_kpis() {
    let store = fixture_store();
    let kpis = compute_kpis(store.records());

    assert_eq!(kpis.total_count, 7);
    assert!(approx_eq(kpis.total_value, 595358.35));
    assert_eq!(kpis.distinct_administrations, 4);
    assert_eq!(kpis.distinct_provinces, 3);
    assert_eq!(kpis.pnrr_count, 3);
    assert_eq!(kpis.pnrr_percentage, 42.9);
    assert!(approx_eq(kpis.average_value, 595358.35 / 7.0));
    assert_eq!(kpis.median_value, 50000.5);
}

#[test]
fn invariant_empty_store_has_zero_ratios() {
    let records: Vec<ContractRecord> = Vec::new();
    let kpis = compute_kpis(&records);

    assert_eq!(kpis.total_count, 0);
    assert_eq!(kpis.total_value, 0.0);
    assert_eq!(kpis.distinct_administrations, 0);
    assert_eq!(kpis.distinct_provinces, 0);
    assert_eq!(kpis.pnrr_count, 0);
    assert_eq!(kpis.pnrr_percentage, 0.0);
    assert_eq!(kpis.average_value, 0.0);
    assert_eq!(kpis.median_value, 0.0);
    assert!(!kpis.average_value.is_nan());
}

#[test]
fn test_pnrr_percentage_rounds_to_one_decimal() {
    let store = RecordStore::from_json_str(
        r#"[
            {"cig": "P1", "is_pnrr": true},
            {"cig": "P2", "is_pnrr": false},
            {"cig": "P3", "is_pnrr": false}
        ]"#,
    )
    .unwrap();
    assert_eq!(compute_kpis(store.records()).pnrr_percentage, 33.3);

    let two_of_three = RecordStore::from_json_str(
        r#"[
            {"cig": "P1", "is_pnrr": true},
            {"cig": "P2", "is_pnrr": true},
            {"cig": "P3", "is_pnrr": false}
        ]"#,
    )
    .unwrap();
    assert_eq!(compute_kpis(two_of_three.records()).pnrr_percentage, 66.7);
}

#[test]
fn test_median() {
    assert_eq!(median(&[]), 0.0);
    assert_eq!(median(&[4.0]), 4.0);
    assert_eq!(median(&[9.0, 1.0, 5.0]), 5.0);
    assert_eq!(median(&[1.0, 2.0, 3.0, 10.0]), 2.5);
}

#[test]
fn test_kpi_bundle_lines() {
    let loaded_at = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 0).unwrap();
    let store = fixture_store().with_loaded_at(loaded_at);
    let bundle = kpi_bundle(&store);

    assert_eq!(bundle.last_updated, "07/03/2025 09:05");
    assert_eq!(bundle.validation_line, "7 record validati · 1 errori corretti");
    assert_eq!(bundle.dataset_version, store.version().as_str());
    assert_eq!(bundle.metrics, compute_kpis(store.records()));
}

#[test]
fn test_category_breakdown() {
    let store = fixture_store();
    let aggregates = aggregate(store.records(), &dashboard_reducers());
    let shares = category_breakdown(aggregates.get(BY_AI_CATEGORY).unwrap());

    let labels: Vec<&str> = shares.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Machine Learning & Analytics",
            "AI Generativa & LLM",
            "Computer Vision",
            "Altre applicazioni IA",
            "Formazione IA"
        ]
    );
    assert_eq!(shares[0].count, 1);
    assert_eq!(shares[1].count, 2);
    assert_eq!(shares[0].percentage, 50.39);

    let total_pct: f64 = shares.iter().map(|s| s.percentage).sum();
    assert!((total_pct - 100.0).abs() < 0.05);
}

#[test]
fn test_sector_breakdown_counts_administrations() {
    let store = fixture_store();
    let aggregates = aggregate(store.records(), &dashboard_reducers());
    let shares = sector_breakdown(store.records(), aggregates.get(BY_SECTOR).unwrap());

    let pa_locale = shares.iter().find(|s| s.label == "PA Locale").unwrap();
    assert_eq!(pa_locale.count, 3);
    assert_eq!(pa_locale.administrations, 2);

    let sanita = shares.iter().find(|s| s.label == "Sanità").unwrap();
    assert_eq!(sanita.administrations, 1);
    assert_eq!(shares[0].label, "Sanità");

    // no administration code on the only record of this sector
    let others = shares.iter().find(|s| s.label == "Altri Enti Pubblici").unwrap();
    assert_eq!(others.administrations, 0);
}

#[test]
fn test_pnrr_analysis() {
    let store = fixture_store();
    let analysis = pnrr_analysis(store.records());

    assert_eq!(analysis.pnrr.count, 3);
    assert_eq!(analysis.pnrr.value, 275000.5);
    assert_eq!(analysis.pnrr.median, 75000.0);
    assert_eq!(analysis.non_pnrr.count, 4);
    assert_eq!(analysis.non_pnrr.median, 10178.92);
    assert_eq!(analysis.count_percentage, 42.86);
    assert_eq!(analysis.value_percentage, 46.19);

    let empty: Vec<ContractRecord> = Vec::new();
    let nothing = pnrr_analysis(&empty);
    assert_eq!(nothing.pnrr.mean, 0.0);
    assert_eq!(nothing.count_percentage, 0.0);
    assert_eq!(nothing.value_percentage, 0.0);
}

#[test]
fn test_administration_ranking() {
    let store = fixture_store();
    let rows = administration_ranking(store.records(), 30);

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "ASL Roma 1",
            "Comune di Roma",
            "N/D",
            "Comune di Milano",
            "Università di Pisa"
        ]
    );

    let asl = &rows[0];
    assert_eq!(asl.position, 1);
    assert_eq!(asl.code, "13664791004");
    assert_eq!(asl.total, 375000.0);
    assert_eq!(asl.mean, 187500.0);
    assert_eq!(asl.min, 75000.0);
    assert_eq!(asl.max, 300000.0);
    assert_eq!(asl.count, 2);
    assert_eq!(asl.province, "RM");
    assert_eq!(asl.years, vec!["2024".to_string(), "2025".to_string()]);
    assert_eq!(asl.sector, "Sanità");

    let unknown = &rows[2];
    assert_eq!(unknown.code, "N/D");
    assert_eq!(unknown.province, "N/D");
    assert_eq!(unknown.sector, "Altri Enti Pubblici");

    assert_eq!(administration_ranking(store.records(), 2).len(), 2);
}

#[test]
fn test_most_frequent_ties_pick_smallest() {
    let store = RecordStore::from_json_str(
        r#"[
            {"cig": "T1", "denominazione_amministrazione_appaltante": "Ente", "provincia": "TO", "settore_pa": "Sanità", "importo_complessivo_gara": 10},
            {"cig": "T2", "denominazione_amministrazione_appaltante": "Ente", "provincia": "AL", "settore_pa": "PA Locale", "importo_complessivo_gara": 20}
        ]"#,
    )
    .unwrap();
    let rows = administration_ranking(store.records(), 10);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].province, "AL");
    assert_eq!(rows[0].sector, "PA Locale");
    assert_eq!(rows[0].min, 10.0);
}
