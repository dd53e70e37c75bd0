use serde::{Deserialize, Serialize};

use super::contract::RecordIssues;

/// Data-quality counters gathered while the store was normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total: usize,
    pub missing_id: usize,
    pub missing_object: usize,
    pub missing_amount: usize,
    pub zero_amount: usize,
    pub negative_amount: usize,
    pub missing_administration: usize,
    /// Document elements that could not be read as a contract.
    pub malformed: usize,
    pub corrections_applied: usize,
}

impl ValidationReport {
    pub fn observe(&mut self, issues: &RecordIssues) {
        self.total += 1;
        self.missing_id += usize::from(issues.missing_id);
        self.missing_object += usize::from(issues.missing_object);
        self.missing_amount += usize::from(issues.missing_amount);
        self.zero_amount += usize::from(issues.zero_amount);
        self.negative_amount += usize::from(issues.negative_amount);
        self.missing_administration += usize::from(issues.missing_administration);
    }

    /// The static "records validated / errors corrected" line.
    pub fn summary_line(&self) -> String {
        format!(
            "{} record validati · {} errori corretti",
            self.total, self.corrections_applied
        )
    }
}
