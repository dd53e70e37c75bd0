pub mod identifiers;
pub mod series;

pub use identifiers::{ContractId, DatasetVersion};
pub use series::{SeriesPoint, TrendSeries};
