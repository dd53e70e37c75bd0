use serde::{Deserialize, Serialize};

use super::Reducer;
use crate::record::ContractRecord;

pub const BY_ADMINISTRATION: &str = "by_administration";
pub const BY_AI_CATEGORY: &str = "by_ai_category";
pub const BY_SECTOR: &str = "by_sector";
pub const BY_YEAR: &str = "by_year";
pub const BY_PNRR: &str = "by_pnrr";

pub const PNRR_LABEL: &str = "PNRR";
pub const NON_PNRR_LABEL: &str = "Non-PNRR";

/// Contract count and summed gross amount of one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupTotals {
    pub count: u64,
    pub value: f64,
}

impl GroupTotals {
    pub fn add(&mut self, record: &ContractRecord) {
        self.count += 1;
        self.value += record.gross_amount;
    }
}

fn pnrr_key(record: &ContractRecord) -> &str {
    if record.is_pnrr {
        PNRR_LABEL
    } else {
        NON_PNRR_LABEL
    }
}

/// The five groupings behind the dashboard charts.
pub fn dashboard_reducers() -> Vec<Reducer<'static, GroupTotals>> {
    vec![
        Reducer::new(
            BY_ADMINISTRATION,
            |r| r.administration_name.as_str(),
            GroupTotals::add,
            GroupTotals::default(),
        ),
        Reducer::new(
            BY_AI_CATEGORY,
            |r| r.ai_category.as_str(),
            GroupTotals::add,
            GroupTotals::default(),
        ),
        Reducer::new(
            BY_SECTOR,
            |r| r.sector.as_str(),
            GroupTotals::add,
            GroupTotals::default(),
        ),
        Reducer::new(
            BY_YEAR,
            |r| r.year.as_str(),
            GroupTotals::add,
            GroupTotals::default(),
        ),
        Reducer::new(BY_PNRR, pnrr_key, GroupTotals::add, GroupTotals::default()),
    ]
}
