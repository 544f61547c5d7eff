use std::{
    collections::HashMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, Trim};
use eyre::WrapErr;
use itertools::Itertools;

use crate::{
    config::{ColumnNames, ViewerConfig},
    model::{Dataset, Record, TradeDate},
    utils::{parse_price, parse_trade_date},
};

/// Header name to cell text, for one data line.
pub type RawRow = HashMap<String, String>;

pub trait RecordLoader {
    fn load(&self) -> eyre::Result<Dataset>;
}

pub struct CsvFileLoader {
    pub path: PathBuf,
    pub config: ViewerConfig,
}

impl CsvFileLoader {
    pub fn new(path: impl AsRef<Path>, config: ViewerConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }
}

impl RecordLoader for CsvFileLoader {
    fn load(&self) -> eyre::Result<Dataset> {
        let file = File::open(&self.path)
            .wrap_err_with(|| format!("opening {}", self.path.display()))?;
        let rows = read_rows(file, &self.config)
            .wrap_err_with(|| format!("reading {}", self.path.display()))?;

        Ok(normalize_rows(&rows, &self.config.columns))
    }
}

pub struct CsvTextLoader<'a> {
    pub text: &'a str,
    pub config: ViewerConfig,
}

impl RecordLoader for CsvTextLoader<'_> {
    fn load(&self) -> eyre::Result<Dataset> {
        let rows = read_rows(self.text.as_bytes(), &self.config)?;
        Ok(normalize_rows(&rows, &self.config.columns))
    }
}

/// Splits CSV text into header-keyed rows. Short rows simply lack the
/// trailing keys; only framing and encoding problems are errors.
pub fn read_rows(reader: impl Read, config: &ViewerConfig) -> eyre::Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(config.delimiter)
        .trim(if config.trim { Trim::All } else { Trim::None })
        .from_reader(reader);

    let headers = rdr.headers()?.iter().map(str::to_owned).collect_vec();
    let mut rows = Vec::new();

    for (ix, record) in rdr.records().enumerate() {
        let record = record.wrap_err_with(|| format!("row {}", ix + 1))?;

        rows.push(
            headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_owned))
                .collect(),
        );
    }

    Ok(rows)
}

/// Turns one row into a record, or `None` when its date cell is missing or
/// empty. Prices that do not parse become NaN instead of rejecting the row.
pub fn normalize_row(row: &RawRow, columns: &ColumnNames) -> Option<Record> {
    let raw_date = row.get(&columns.date).filter(|d| !d.is_empty())?;

    let date = parse_trade_date(raw_date);
    if date == TradeDate::Invalid {
        tracing::debug!(date = %raw_date, "unreadable date, row kept");
    }

    let price = |column: &String| row.get(column).map_or(f64::NAN, |v| parse_price(v));

    Some(Record::new(
        date,
        row.get(&columns.company).cloned().unwrap_or_default(),
        price(&columns.open),
        price(&columns.close),
    ))
}

pub fn normalize_rows(rows: &[RawRow], columns: &ColumnNames) -> Dataset {
    rows.iter()
        .enumerate()
        .filter_map(|(ix, row)| {
            let record = normalize_row(row, columns);
            if record.is_none() {
                tracing::debug!(row = ix + 1, "dropping row without date");
            }
            record
        })
        .collect()
}
