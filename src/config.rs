use serde::{Deserialize, Serialize};

/// Tunables of the dashboard views and the search box.
///
/// Serializable with explicit defaults; a partial JSON document overrides
/// only the keys it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub min_query_chars: usize,
    pub suggestion_limit: usize,
    pub display_limit: usize,
    pub top_administrations: usize,
    pub administration_ranking_size: usize,
    pub trend_years: Vec<String>,
    pub label_max_chars: usize,
}

impl DashboardConfig {
    pub fn v0() -> Self {
        Self {
            min_query_chars: 3,
            suggestion_limit: 10,
            display_limit: 50,
            top_administrations: 10,
            administration_ranking_size: 30,
            trend_years: vec!["2023".into(), "2024".into(), "2025".into()],
            label_max_chars: 40,
        }
    }

    pub fn from_json_str(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::v0()
    }
}
