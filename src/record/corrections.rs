use serde::{Deserialize, Serialize};

use super::contract::ContractRecord;

/// A source amount known to be wrong, with its verified replacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownCorrection {
    pub cig: &'static str,
    pub wrong_value: f64,
    pub correct_value: f64,
    pub reason: &'static str,
}

pub const KNOWN_CORRECTIONS: &[KnownCorrection] = &[KnownCorrection {
    cig: "B1B36B1A1E",
    wrong_value: 293_893_058.00,
    correct_value: 357.85,
    reason: "Acquisto libri biblioteca (confronto CIG B1AA21EEA3, B1B748D667)",
}];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedCorrection {
    pub cig: String,
    pub old_value: f64,
    pub new_value: f64,
    pub reason: String,
}

/// Overwrite both amounts of a record listed in [`KNOWN_CORRECTIONS`].
///
/// Returns `None` when the record is not listed or already holds the
/// corrected amounts.
pub fn apply_known_correction(record: &mut ContractRecord) -> Option<AppliedCorrection> {
    let correction = KNOWN_CORRECTIONS
        .iter()
        .find(|c| c.cig == record.id.as_str())?;

    if record.lot_amount == correction.correct_value
        && record.gross_amount == correction.correct_value
    {
        return None;
    }

    let old_value = record.lot_amount;
    record.lot_amount = correction.correct_value;
    record.gross_amount = correction.correct_value;

    Some(AppliedCorrection {
        cig: correction.cig.to_string(),
        old_value,
        new_value: correction.correct_value,
        reason: correction.reason.to_string(),
    })
}
