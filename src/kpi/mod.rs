pub mod administrations;
pub mod breakdown;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{ContractRecord, RecordStore};
pub use administrations::{administration_ranking, AdministrationRow};
pub use breakdown::{
    category_breakdown, pnrr_analysis, sector_breakdown, GroupShare, PartitionStats,
    PnrrAnalysis, SectorShare,
};

/// Headline figures of the dashboard.
///
/// Every ratio is `0.0` on an empty store, never NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_count: usize,
    pub total_value: f64,
    pub distinct_administrations: usize,
    pub distinct_provinces: usize,
    pub pnrr_count: usize,
    pub pnrr_percentage: f64,
    pub average_value: f64,
    pub median_value: f64,
}

/// KPI figures plus the descriptive lines shown beside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiBundle {
    pub metrics: Kpis,
    pub last_updated: String,
    pub validation_line: String,
    pub dataset_version: String,
}

pub fn compute_kpis(records: &[ContractRecord]) -> Kpis {
    let total_count = records.len();
    let total_value: f64 = records.iter().map(|r| r.gross_amount).sum();

    let distinct_administrations = records
        .iter()
        .filter_map(ContractRecord::known_administration_code)
        .collect::<HashSet<_>>()
        .len();

    let distinct_provinces = records
        .iter()
        .filter_map(ContractRecord::known_province)
        .collect::<HashSet<_>>()
        .len();

    let pnrr_count = records.iter().filter(|r| r.is_pnrr).count();

    let amounts: Vec<f64> = records.iter().map(|r| r.gross_amount).collect();

    Kpis {
        total_count,
        total_value,
        distinct_administrations,
        distinct_provinces,
        pnrr_count,
        pnrr_percentage: round_to(percentage(pnrr_count as f64, total_count as f64), 1),
        average_value: ratio(total_value, total_count as f64),
        median_value: median(&amounts),
    }
}

pub fn kpi_bundle(store: &RecordStore) -> KpiBundle {
    KpiBundle {
        metrics: compute_kpis(store.records()),
        last_updated: format_timestamp(store.loaded_at()),
        validation_line: store.validation().summary_line(),
        dataset_version: store.version().as_str().to_string(),
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

/// `numerator / denominator`, or `0.0` when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn percentage(part: f64, whole: f64) -> f64 {
    ratio(part, whole) * 100.0
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Median of `values`; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
