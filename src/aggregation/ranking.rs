use std::cmp::Ordering;

use super::group_map::GroupMap;
use super::reducers::GroupTotals;

/// The number a group is ranked by.
pub trait RankValue {
    fn rank_value(&self) -> f64;
}

impl RankValue for f64 {
    fn rank_value(&self) -> f64 {
        *self
    }
}

impl RankValue for u64 {
    fn rank_value(&self) -> f64 {
        *self as f64
    }
}

impl RankValue for GroupTotals {
    fn rank_value(&self) -> f64 {
        self.value
    }
}

/// The `n` largest groups, value descending.
pub fn top_n<V: RankValue>(map: &GroupMap<V>, n: usize) -> Vec<(&str, &V)> {
    top_n_by(map, n, RankValue::rank_value)
}

/// Like [`top_n`] with an explicit scoring function.
///
/// Ties keep the map's insertion order (the sort is stable); no secondary
/// key is applied. Returns `min(n, map.len())` entries.
pub fn top_n_by<V, F>(map: &GroupMap<V>, n: usize, score: F) -> Vec<(&str, &V)>
where
    F: Fn(&V) -> f64,
{
    let mut ranked: Vec<(&str, &V, f64)> = map.iter().map(|(k, v)| (k, v, score(v))).collect();

    // Descending score; `sort_by` is stable
    ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));

    debug_assert!(ranked.windows(2).all(|w| w[0].2 >= w[1].2 || w[1].2.is_nan()));

    ranked.truncate(n);
    ranked.into_iter().map(|(k, v, _)| (k, v)).collect()
}
