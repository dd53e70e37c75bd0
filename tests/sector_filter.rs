use appalti_core::filter::{apply, filter, SectorFilter, SectorTagged};
use appalti_core::kpi::administration_ranking;
use appalti_core::record::RecordStore;

const FIXTURE: &str = include_str!("fixtures/contracts.json");

#[derive(Debug, PartialEq)]
struct Row {
    name: &'static str,
    sector: &'static str,
}

impl SectorTagged for Row {
    fn sector(&self) -> &str {
        self.sector
    }
}

fn row(name: &'static str, sector: &'static str) -> Row {
    Row { name, sector }
}

fn rows() -> Vec<Row> {
    vec![
        row("Comune di Roma", "PA Locale"),
        row("ASL Roma 1", "Sanità"),
        row("Comune di Milano", "PA Locale"),
        row("Università di Pisa", "Università e Ricerca"),
    ]
}

#[test]
fn test_all_passes_every_row() {
    let rows = rows();
    let result = filter(&rows, "all");

    assert_eq!(result.visible_count, 4);
    assert_eq!(result.visible_rows.len(), 4);
}

#[test]
fn test_exact_sector_match_keeps_order() {
    let rows = rows();
    let result = filter(&rows, "PA Locale");

    let names: Vec<&str> = result.visible_rows.iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["Comune di Roma", "Comune di Milano"]);
    assert_eq!(result.visible_count, 2);
}

#[test]
fn invariant_no_normalization() {
    let rows = rows();

    assert_eq!(filter(&rows, "pa locale").visible_count, 0);
    assert_eq!(filter(&rows, "PA Locale ").visible_count, 0);
    assert_eq!(filter(&rows, "ALL").visible_count, 0);
    assert_eq!(filter(&rows, "").visible_count, 0);
}

#[test]
fn test_empty_rows() {
    let rows: Vec<Row> = Vec::new();
    let result = filter(&rows, "Sanità");
    assert_eq!(result.visible_count, 0);
    assert!(result.visible_rows.is_empty());
}

#[test]
fn test_selector_labels() {
    assert_eq!(SectorFilter::parse("all"), SectorFilter::All);
    assert_eq!(SectorFilter::parse("all").active_label(), None);
    assert_eq!(
        SectorFilter::parse("Sanità").active_label(),
        Some("Sanità")
    );
}

#[test]
fn test_filters_administration_table() {
    let store = RecordStore::from_json_str(FIXTURE).unwrap();
    let table = administration_ranking(store.records(), 30);

    let result = apply(&table, &SectorFilter::parse("PA Locale"));
    let names: Vec<&str> = result.visible_rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Comune di Roma", "Comune di Milano"]);

    let records = filter(store.records(), "Sanità");
    assert_eq!(records.visible_count, 2);
}
