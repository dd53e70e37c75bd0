use serde::Serialize;

/// Rows that carry a sector tag the filter can match on.
pub trait SectorTagged {
    fn sector(&self) -> &str;
}

impl SectorTagged for crate::record::ContractRecord {
    fn sector(&self) -> &str {
        &self.sector
    }
}

/// Selector value that passes every row.
pub const ALL_SECTORS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectorFilter {
    All,
    Sector(String),
}

impl SectorFilter {
    /// `"all"` selects everything; any other value is an exact sector tag.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SECTORS {
            SectorFilter::All
        } else {
            SectorFilter::Sector(value.to_string())
        }
    }

    pub fn matches<R: SectorTagged + ?Sized>(&self, row: &R) -> bool {
        match self {
            SectorFilter::All => true,
            SectorFilter::Sector(sector) => row.sector() == sector,
        }
    }

    /// The label of an active filter; `None` when everything is shown.
    pub fn active_label(&self) -> Option<&str> {
        match self {
            SectorFilter::All => None,
            SectorFilter::Sector(sector) => Some(sector.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResult<'a, R> {
    pub visible_rows: Vec<&'a R>,
    pub visible_count: usize,
}

/// Partition `rows` by sector, keeping their order.
pub fn filter<'a, R: SectorTagged>(rows: &'a [R], sector_value: &str) -> FilterResult<'a, R> {
    apply(rows, &SectorFilter::parse(sector_value))
}

pub fn apply<'a, R: SectorTagged>(rows: &'a [R], selector: &SectorFilter) -> FilterResult<'a, R> {
    let visible_rows: Vec<&R> = rows.iter().filter(|row| selector.matches(*row)).collect();
    let visible_count = visible_rows.len();
    FilterResult {
        visible_rows,
        visible_count,
    }
}
