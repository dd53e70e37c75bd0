// Built once, read many times:
// no mutation after construction
// no interior mutability
// consumers borrow it

use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use super::contract::{ContractRecord, RawContract};
use super::corrections::{apply_known_correction, AppliedCorrection};
use super::validation::ValidationReport;
use crate::types::identifiers::DatasetVersion;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed dataset document: {0}")]
    Json(#[from] serde_json::Error),
}

/// The immutable in-memory contract collection shared by every engine.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<ContractRecord>,
    version: DatasetVersion,
    loaded_at: DateTime<Utc>,
    validation: ValidationReport,
    corrections: Vec<AppliedCorrection>,
}

impl RecordStore {
    /// The inert store used when no dataset could be loaded.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            version: DatasetVersion::from_content(b"[]"),
            loaded_at: Utc::now(),
            validation: ValidationReport::default(),
            corrections: Vec::new(),
        }
    }

    /// Parse a dataset document (a JSON array of contract objects).
    ///
    /// Only a document that is not a JSON array is an error. An element that
    /// cannot be read as a contract is normalized from an empty one and
    /// counted as malformed.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let entries: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;

        let mut malformed = 0;
        let raw: Vec<RawContract> = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value(entry).unwrap_or_else(|err| {
                    warn!(index, error = %err, "malformed contract, normalized as empty");
                    malformed += 1;
                    RawContract::default()
                })
            })
            .collect();

        let mut store = Self::from_raw(raw, DatasetVersion::from_content(bytes));
        store.validation.malformed = malformed;
        Ok(store)
    }

    pub fn from_json_str(document: &str) -> Result<Self, LoadError> {
        Self::from_json_slice(document.as_bytes())
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path)?;
        Self::from_json_slice(&bytes)
    }

    /// Load a dataset, degrading to [`RecordStore::empty`] on any failure.
    /// There is no retry.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(store) => store,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "dataset load failed, serving empty dashboard"
                );
                Self::empty()
            }
        }
    }

    /// Normalize raw contracts and freeze them.
    pub fn from_raw(raw: Vec<RawContract>, version: DatasetVersion) -> Self {
        let mut validation = ValidationReport::default();
        let mut corrections = Vec::new();
        let mut records = Vec::with_capacity(raw.len());

        for entry in &raw {
            let (mut record, mut issues) = ContractRecord::from_raw(entry);
            if let Some(applied) = apply_known_correction(&mut record) {
                issues = issues.with_corrected_amount(record.lot_amount);
                corrections.push(applied);
            }
            validation.observe(&issues);
            records.push(record);
        }
        validation.corrections_applied = corrections.len();

        info!(
            records = records.len(),
            corrections = corrections.len(),
            version = version.as_str(),
            "record store built"
        );

        Self {
            records,
            version,
            loaded_at: Utc::now(),
            validation,
            corrections,
        }
    }

    /// Wrap records that are already normalized. No corrections are applied;
    /// the version hashes the records' JSON form.
    pub fn from_records(records: Vec<ContractRecord>) -> Self {
        let canonical = serde_json::to_vec(&records).unwrap_or_default();
        let validation = ValidationReport {
            total: records.len(),
            ..ValidationReport::default()
        };
        Self {
            version: DatasetVersion::from_content(&canonical),
            records,
            loaded_at: Utc::now(),
            validation,
            corrections: Vec::new(),
        }
    }

    /// Pin the load timestamp (snapshots, replays).
    pub fn with_loaded_at(mut self, loaded_at: DateTime<Utc>) -> Self {
        self.loaded_at = loaded_at;
        self
    }

    pub fn records(&self) -> &[ContractRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContractRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn version(&self) -> &DatasetVersion {
        &self.version
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn validation(&self) -> &ValidationReport {
        &self.validation
    }

    pub fn corrections(&self) -> &[AppliedCorrection] {
        &self.corrections
    }

    /// Every contract awarded by the administration with exactly this name,
    /// in store order.
    pub fn records_for_administration(&self, name: &str) -> Vec<&ContractRecord> {
        self.records
            .iter()
            .filter(|r| r.administration_name == name)
            .collect()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a ContractRecord;
    type IntoIter = std::slice::Iter<'a, ContractRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
