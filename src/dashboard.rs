use serde::Serialize;
use tracing::info;

use crate::aggregation::{
    aggregate, dashboard_reducers, top_n, GroupMap, GroupTotals, BY_ADMINISTRATION,
    BY_AI_CATEGORY, BY_PNRR, BY_SECTOR, BY_YEAR, NON_PNRR_LABEL, PNRR_LABEL,
};
use crate::config::DashboardConfig;
use crate::kpi::{
    administration_ranking, category_breakdown, kpi_bundle, pnrr_analysis, sector_breakdown,
    AdministrationRow, GroupShare, KpiBundle, PnrrAnalysis, SectorShare,
};
use crate::record::RecordStore;
use crate::types::series::{truncate_label, SeriesPoint, TrendSeries};

/// Every static view of the dashboard, computed once per store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub top_administrations: Vec<SeriesPoint>,
    pub ai_categories: Vec<SeriesPoint>,
    pub sectors: Vec<SeriesPoint>,
    pub pnrr_split: Vec<SeriesPoint>,
    pub trend: TrendSeries,
    pub kpis: KpiBundle,
    pub category_breakdown: Vec<GroupShare>,
    pub sector_breakdown: Vec<SectorShare>,
    pub pnrr_analysis: PnrrAnalysis,
    pub administrations: Vec<AdministrationRow>,
}

fn ranked_series(
    groups: &GroupMap<GroupTotals>,
    n: usize,
    label_max_chars: Option<usize>,
) -> Vec<SeriesPoint> {
    top_n(groups, n)
        .into_iter()
        .map(|(label, totals)| {
            let label = match label_max_chars {
                Some(max) => truncate_label(label, max),
                None => label.to_string(),
            };
            SeriesPoint::new(label, totals.value)
        })
        .collect()
}

impl Dashboard {
    pub fn build(store: &RecordStore, config: &DashboardConfig) -> Self {
        let records = store.records();

        // One pass for every chart grouping
        let reducers = dashboard_reducers();
        let aggregates = aggregate(records, &reducers);

        let empty = GroupMap::new();
        let groups = |name: &str| aggregates.get(name).unwrap_or(&empty);

        let by_administration = groups(BY_ADMINISTRATION);
        let by_category = groups(BY_AI_CATEGORY);
        let by_sector = groups(BY_SECTOR);
        let by_year = groups(BY_YEAR);
        let by_pnrr = groups(BY_PNRR);

        let pnrr_split: Vec<SeriesPoint> = [PNRR_LABEL, NON_PNRR_LABEL]
            .into_iter()
            .map(|label| SeriesPoint::new(label, by_pnrr.get(label).map_or(0.0, |t| t.value)))
            .collect();

        let trend = TrendSeries {
            labels: config.trend_years.clone(),
            counts: config
                .trend_years
                .iter()
                .map(|year| by_year.get(year).map_or(0, |t| t.count))
                .collect(),
            values: config
                .trend_years
                .iter()
                .map(|year| by_year.get(year).map_or(0.0, |t| t.value / 1_000_000.0))
                .collect(),
        };

        let dashboard = Dashboard {
            top_administrations: ranked_series(
                by_administration,
                config.top_administrations,
                Some(config.label_max_chars),
            ),
            ai_categories: ranked_series(by_category, by_category.len(), None),
            sectors: ranked_series(by_sector, by_sector.len(), None),
            pnrr_split,
            trend,
            kpis: kpi_bundle(store),
            category_breakdown: category_breakdown(by_category),
            sector_breakdown: sector_breakdown(records, by_sector),
            pnrr_analysis: pnrr_analysis(records),
            administrations: administration_ranking(records, config.administration_ranking_size),
        };

        info!(
            records = records.len(),
            administrations = by_administration.len(),
            categories = by_category.len(),
            "dashboard built"
        );

        dashboard
    }
}
