use tracing::warn;

use crate::chart::{Figure, build_figure};
use crate::data::{DataError, RawTable, UkDataset, UsDataset, uk::TABLE_COLUMNS};
use crate::view::ViewOption;

/// Where the two CSV files live.
#[derive(Clone, Debug)]
pub struct DataSources {
    pub uk_csv: String,
    pub us_csv: String,
}

/// Everything one render of the dashboard needs: the figure and the raw UK table.
/// The table fails on its own; a missing table column never costs the chart.
#[derive(Debug)]
pub struct ViewFrame {
    pub view: ViewOption,
    pub figure: Figure,
    pub table: Result<RawTable, DataError>,
}

impl ViewFrame {
    /// Loads both datasets from disk and builds the view from scratch.
    pub fn load(view: ViewOption, sources: &DataSources) -> anyhow::Result<Self> {
        let uk = UkDataset::load(&sources.uk_csv)?;
        let us = UsDataset::load(&sources.us_csv, view.us_categories())?;
        Ok(Self::build(view, &uk, &us))
    }

    pub fn build(view: ViewOption, uk: &UkDataset, us: &UsDataset) -> Self {
        let table = uk.raw_table(&TABLE_COLUMNS);
        if let Err(err) = &table {
            warn!("UK table unavailable: {err}");
        }
        Self {
            view,
            figure: build_figure(view, uk, us),
            table,
        }
    }
}
