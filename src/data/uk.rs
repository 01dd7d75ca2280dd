use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use super::{DataError, parse_cell};

pub const KEY_COLUMN: &str = "Social media use in hours/weekday";

/// Columns shown in the raw data table under the chart.
pub const TABLE_COLUMNS: [&str; 6] = [KEY_COLUMN, "All", "Girls", "Boys", "Girls %", "Boys %"];

/// Daily social-media use range, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UsageBucket {
    NoUsage,
    UnderOne,
    OneToThree,
    ThreeToFive,
    OverFive,
}

impl UsageBucket {
    pub const ALL: [UsageBucket; 5] = [
        UsageBucket::NoUsage,
        UsageBucket::UnderOne,
        UsageBucket::OneToThree,
        UsageBucket::ThreeToFive,
        UsageBucket::OverFive,
    ];

    /// Canonical label; the gap before `h` is a narrow no-break space.
    pub fn label(self) -> &'static str {
        match self {
            UsageBucket::NoUsage => "No usage",
            UsageBucket::UnderOne => "<1\u{202f}h",
            UsageBucket::OneToThree => "1 to <3\u{202f}h",
            UsageBucket::ThreeToFive => "3 to <5\u{202f}h",
            UsageBucket::OverFive => ">5\u{202f}h",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Matches a label from the file, treating any whitespace run as one space.
    pub fn from_label(raw: &str) -> Option<Self> {
        let wanted = normalize_ws(raw);
        Self::ALL
            .into_iter()
            .find(|bucket| normalize_ws(bucket.label()) == wanted)
    }
}

fn normalize_ws(s: &str) -> String {
    s.split(char::is_whitespace)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One value column reindexed onto the fixed bucket order.
pub type BucketSeries = [Option<f64>; 5];

/// The file as read, kept for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Restricts the table to `columns`, in the given order.
    pub fn select(&self, columns: &[&str]) -> Result<RawTable, DataError> {
        let idx = columns
            .iter()
            .map(|name| {
                self.headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| DataError::MissingColumn(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RawTable {
            headers: columns.iter().map(|c| c.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| {
                    idx.iter()
                        .map(|&i| row.get(i).cloned().unwrap_or_default())
                        .collect()
                })
                .collect(),
        })
    }
}

/// UK cross-sectional data: percentages per demographic column and usage bucket.
#[derive(Clone, Debug, Default)]
pub struct UkDataset {
    columns: Vec<(String, BucketSeries)>,
    raw: RawTable,
}

impl UkDataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DataError::Open {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let ds = Self::from_reader(file)?;
        debug!(
            "loaded UK dataset from {}: {} columns",
            path.display(),
            ds.columns.len()
        );
        Ok(ds)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let key_idx = headers
            .iter()
            .position(|h| h == KEY_COLUMN)
            .ok_or_else(|| DataError::MissingColumn(KEY_COLUMN.to_string()))?;

        let mut columns: Vec<(String, BucketSeries)> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != key_idx)
            .map(|(_, name)| (name.clone(), [None; 5]))
            .collect();
        let mut seen = [false; 5];
        let mut raw_rows = Vec::new();

        for (n, record) in rdr.records().enumerate() {
            let record = record?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(n + 2);
            raw_rows.push(record.iter().map(str::to_string).collect());

            let key = record.get(key_idx).unwrap_or_default();
            let Some(bucket) = UsageBucket::from_label(key) else {
                warn!("UK row {line}: unknown usage bucket `{key}`, dropped");
                continue;
            };
            if std::mem::replace(&mut seen[bucket.index()], true) {
                return Err(DataError::Duplicate(bucket.label().to_string()));
            }

            let values = record
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != key_idx);
            for ((name, series), (_, cell)) in columns.iter_mut().zip(values) {
                series[bucket.index()] = parse_cell(cell, line, name)?;
            }
        }

        for bucket in UsageBucket::ALL {
            if !seen[bucket.index()] {
                warn!("UK dataset has no row for `{}`", bucket.label());
            }
        }

        Ok(Self {
            columns,
            raw: RawTable {
                headers,
                rows: raw_rows,
            },
        })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    pub fn series(&self, name: &str) -> Option<&BucketSeries> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn value(&self, name: &str, bucket: UsageBucket) -> Option<f64> {
        self.series(name).and_then(|s| s[bucket.index()])
    }

    pub fn raw(&self) -> &RawTable {
        &self.raw
    }

    pub fn raw_table(&self, columns: &[&str]) -> Result<RawTable, DataError> {
        self.raw.select(columns)
    }
}
