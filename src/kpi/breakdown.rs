use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{median, percentage, ratio, round_to};
use crate::aggregation::{top_n, GroupMap, GroupTotals};
use crate::record::ContractRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupShare {
    pub label: String,
    pub value: f64,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorShare {
    pub label: String,
    pub value: f64,
    pub count: u64,
    pub administrations: usize,
    pub percentage: f64,
}

/// Every group with its share of the summed value, largest first.
pub fn category_breakdown(groups: &GroupMap<GroupTotals>) -> Vec<GroupShare> {
    let total: f64 = groups.values().map(|t| t.value).sum();
    top_n(groups, groups.len())
        .into_iter()
        .map(|(label, totals)| GroupShare {
            label: label.to_string(),
            value: totals.value,
            count: totals.count,
            percentage: round_to(percentage(totals.value, total), 2),
        })
        .collect()
}

/// Like [`category_breakdown`], plus distinct administrations per sector.
pub fn sector_breakdown(
    records: &[ContractRecord],
    groups: &GroupMap<GroupTotals>,
) -> Vec<SectorShare> {
    let mut administrations: HashMap<&str, HashSet<&str>> = HashMap::new();
    for record in records {
        if let Some(code) = record.known_administration_code() {
            administrations
                .entry(record.sector.as_str())
                .or_default()
                .insert(code);
        }
    }

    let total: f64 = groups.values().map(|t| t.value).sum();
    top_n(groups, groups.len())
        .into_iter()
        .map(|(label, totals)| SectorShare {
            label: label.to_string(),
            value: totals.value,
            count: totals.count,
            administrations: administrations.get(label).map_or(0, HashSet::len),
            percentage: round_to(percentage(totals.value, total), 2),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionStats {
    pub count: usize,
    pub value: f64,
    pub mean: f64,
    pub median: f64,
}

impl PartitionStats {
    fn from_amounts(amounts: &[f64]) -> Self {
        let value: f64 = amounts.iter().sum();
        Self {
            count: amounts.len(),
            value: round_to(value, 2),
            mean: round_to(ratio(value, amounts.len() as f64), 2),
            median: round_to(median(amounts), 2),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PnrrAnalysis {
    pub pnrr: PartitionStats,
    pub non_pnrr: PartitionStats,
    pub count_percentage: f64,
    pub value_percentage: f64,
}

pub fn pnrr_analysis(records: &[ContractRecord]) -> PnrrAnalysis {
    let (pnrr, non_pnrr): (Vec<&ContractRecord>, Vec<&ContractRecord>) =
        records.iter().partition(|r| r.is_pnrr);

    let pnrr_amounts: Vec<f64> = pnrr.iter().map(|r| r.gross_amount).collect();
    let non_pnrr_amounts: Vec<f64> = non_pnrr.iter().map(|r| r.gross_amount).collect();

    let pnrr_value: f64 = pnrr_amounts.iter().sum();
    let total_value: f64 = records.iter().map(|r| r.gross_amount).sum();

    PnrrAnalysis {
        pnrr: PartitionStats::from_amounts(&pnrr_amounts),
        non_pnrr: PartitionStats::from_amounts(&non_pnrr_amounts),
        count_percentage: round_to(percentage(pnrr.len() as f64, records.len() as f64), 2),
        value_percentage: round_to(percentage(pnrr_value, total_value), 2),
    }
}
