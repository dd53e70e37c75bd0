use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ratio;
use crate::aggregation::{aggregate, top_n_by, GroupMap, Reducer};
use crate::filter::SectorTagged;
use crate::record::{ContractRecord, NOT_AVAILABLE};

/// One line of the administration ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdministrationRow {
    pub position: usize,
    pub code: String,
    pub name: String,
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: u64,
    pub province: String,
    pub years: Vec<String>,
    pub sector: String,
}

impl SectorTagged for AdministrationRow {
    fn sector(&self) -> &str {
        &self.sector
    }
}

#[derive(Debug, Clone, Default)]
struct AdministrationStats {
    code: Option<String>,
    total: f64,
    min: f64,
    max: f64,
    count: u64,
    provinces: GroupMap<u64>,
    years: BTreeSet<String>,
    sectors: GroupMap<u64>,
}

impl AdministrationStats {
    fn add(&mut self, record: &ContractRecord) {
        let amount = record.gross_amount;
        if self.count == 0 {
            self.min = amount;
            self.max = amount;
        } else {
            self.min = self.min.min(amount);
            self.max = self.max.max(amount);
        }
        self.count += 1;
        self.total += amount;

        if self.code.is_none() {
            self.code = record.known_administration_code().map(str::to_string);
        }
        *self.provinces.entry_or_insert_with(&record.province, || 0) += 1;
        *self.sectors.entry_or_insert_with(&record.sector, || 0) += 1;
        self.years.insert(record.year.clone());
    }
}

/// Most frequent key; ties go to the alphabetically smallest.
fn most_frequent(counts: &GroupMap<u64>) -> Option<&str> {
    counts
        .iter()
        .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then_with(|| kb.cmp(ka)))
        .map(|(key, _)| key)
}

/// Administrations ranked by total gross amount, at most `limit` rows.
///
/// Rows are keyed by administration name; equal totals keep first-seen order.
pub fn administration_ranking(records: &[ContractRecord], limit: usize) -> Vec<AdministrationRow> {
    let reducers = [Reducer::new(
        "administration_detail",
        |r| r.administration_name.as_str(),
        AdministrationStats::add,
        AdministrationStats::default(),
    )];
    let aggregates = aggregate(records, &reducers);
    let Some(groups) = aggregates.get("administration_detail") else {
        return Vec::new();
    };

    top_n_by(groups, limit, |stats| stats.total)
        .into_iter()
        .enumerate()
        .map(|(index, (name, stats))| AdministrationRow {
            position: index + 1,
            code: stats
                .code
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            name: name.to_string(),
            total: stats.total,
            mean: ratio(stats.total, stats.count as f64),
            min: stats.min,
            max: stats.max,
            count: stats.count,
            province: most_frequent(&stats.provinces)
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            years: stats.years.iter().cloned().collect(),
            sector: most_frequent(&stats.sectors)
                .unwrap_or(crate::record::DEFAULT_SECTOR)
                .to_string(),
        })
        .collect()
}
