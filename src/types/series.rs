use serde::{Deserialize, Serialize};

/// One bar/slice of a chart: the shape every chart consumer receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Yearly trend with two parallel series sharing the same labels.
/// `values` is expressed in millions of euro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub values: Vec<f64>,
}

impl TrendSeries {
    pub fn count_points(&self) -> Vec<SeriesPoint> {
        self.labels
            .iter()
            .zip(&self.counts)
            .map(|(label, count)| SeriesPoint::new(label.clone(), *count as f64))
            .collect()
    }

    pub fn value_points(&self) -> Vec<SeriesPoint> {
        self.labels
            .iter()
            .zip(&self.values)
            .map(|(label, value)| SeriesPoint::new(label.clone(), *value))
            .collect()
    }
}

/// Shorten a chart label to at most `max_chars` characters, ellipsis included.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = label.chars().take(keep).collect();
    out.push_str("...");
    out
}
