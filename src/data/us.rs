use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{DataError, parse_cell};

/// Demographic group rows of the US survey table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UsGroup {
    All,
    Male,
    Female,
}

impl UsGroup {
    /// Category key as it appears in the file.
    pub fn key(self) -> &'static str {
        match self {
            UsGroup::All => "ALL TOTAL",
            UsGroup::Male => "MALE TOTAL",
            UsGroup::Female => "FEMALE TOTAL",
        }
    }

    /// Display name, shared with the UK column names.
    pub fn label(self) -> &'static str {
        match self {
            UsGroup::All => "All",
            UsGroup::Male => "Boys",
            UsGroup::Female => "Girls",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        [UsGroup::All, UsGroup::Male, UsGroup::Female]
            .into_iter()
            .find(|g| g.key() == key.trim())
    }
}

#[derive(Debug, Deserialize)]
struct FlatRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Value")]
    value: String,
}

/// US longitudinal data pivoted to group × year.
#[derive(Clone, Debug, Default)]
pub struct UsDataset {
    years: Vec<i32>,
    rows: Vec<(UsGroup, Vec<Option<f64>>)>,
}

impl UsDataset {
    pub fn load(path: impl AsRef<Path>, groups: &[UsGroup]) -> Result<Self, DataError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DataError::Open {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let ds = Self::from_reader(file, groups)?;
        debug!(
            "loaded US dataset from {}: {} groups x {} years",
            path.display(),
            ds.rows.len(),
            ds.years.len()
        );
        Ok(ds)
    }

    /// Keeps only `groups`, then pivots. Years are the sorted union over the kept rows.
    pub fn from_reader<R: Read>(reader: R, groups: &[UsGroup]) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        for column in ["Category", "Year", "Value"] {
            if !headers.iter().any(|h| h == column) {
                return Err(DataError::MissingColumn(column.to_string()));
            }
        }

        let mut cells: BTreeMap<(UsGroup, i32), Option<f64>> = BTreeMap::new();
        let mut years = BTreeSet::new();
        for (n, record) in rdr.records().enumerate() {
            let record = record?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(n + 2);
            let row: FlatRow = record.deserialize(Some(&headers))?;
            let Some(group) = UsGroup::from_key(&row.category) else {
                continue;
            };
            if !groups.contains(&group) {
                continue;
            }
            let value = parse_cell(&row.value, line, "Value")?;
            if cells.insert((group, row.year), value).is_some() {
                return Err(DataError::Duplicate(format!("{} {}", group.key(), row.year)));
            }
            years.insert(row.year);
        }

        let years: Vec<i32> = years.into_iter().collect();
        let mut present: Vec<UsGroup> = cells.keys().map(|(g, _)| *g).collect();
        present.dedup();
        let rows = present
            .into_iter()
            .map(|group| {
                let values = years
                    .iter()
                    .map(|y| cells.get(&(group, *y)).copied().flatten())
                    .collect();
                (group, values)
            })
            .collect();

        Ok(Self { years, rows })
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn groups(&self) -> impl Iterator<Item = UsGroup> + '_ {
        self.rows.iter().map(|(g, _)| *g)
    }

    pub fn row(&self, group: UsGroup) -> Option<&[Option<f64>]> {
        self.rows
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, v)| v.as_slice())
    }

    pub fn value(&self, group: UsGroup, year: i32) -> Option<f64> {
        let idx = self.years.iter().position(|y| *y == year)?;
        self.row(group).and_then(|r| r[idx])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
