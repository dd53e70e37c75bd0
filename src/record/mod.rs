pub mod amount;
pub mod contract;
pub mod corrections;
pub mod store;
pub mod validation;

pub use amount::{coerce_amount, parse_amount_text};
pub use contract::{ContractRecord, FieldValue, RawContract, RecordIssues};
pub use corrections::{
    apply_known_correction, AppliedCorrection, KnownCorrection, KNOWN_CORRECTIONS,
};
pub use store::{LoadError, RecordStore};
pub use validation::ValidationReport;

/// Placeholder for any categorical value the source left empty.
pub const NOT_AVAILABLE: &str = "N/D";
pub const DEFAULT_AI_CATEGORY: &str = "Altre applicazioni IA";
pub const DEFAULT_SECTOR: &str = "Altri Enti Pubblici";
pub const DEFAULT_YEAR: &str = "2025";
