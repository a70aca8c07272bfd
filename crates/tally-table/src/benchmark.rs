use crate::atomic::write_atomic;
use crate::cell::{format_price, is_filled, parse_price};
use crate::reference::table_error;
use std::path::{Path, PathBuf};
use tally_core::{FIRST_DATA_ROW, PRICE_COLUMNS, PriceColumns, TallyError};

/// Field holding the item name in a benchmark record (column B).
const NAME_FIELD: usize = 1;
/// First price field (column C); C0..C5 occupy C..H.
const FIRST_PRICE_FIELD: usize = 2;
const MIN_FIELDS: usize = FIRST_PRICE_FIELD + PRICE_COLUMNS;

/// The benchmark table, held in memory and rewritten whole on every change.
///
/// Rows use spreadsheet numbering: row 1 is the header, data starts at row 2.
/// Fields outside the price columns are carried through untouched.
#[derive(Debug)]
pub struct BenchmarkTable {
    path: PathBuf,
    records: Vec<Vec<String>>,
}

impl BenchmarkTable {
    pub fn load(path: &Path) -> Result<Self, TallyError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| table_error(path, e))?;

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| table_error(path, e))?;
            records.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!(path = %path.display(), records = records.len(), "benchmark table loaded");
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.records.len().saturating_sub(1)
    }

    /// Data row numbers in table order.
    pub fn rows(&self) -> impl Iterator<Item = usize> {
        FIRST_DATA_ROW..FIRST_DATA_ROW + self.row_count()
    }

    fn record(&self, row: usize) -> Option<&Vec<String>> {
        if row < FIRST_DATA_ROW {
            return None;
        }
        self.records.get(row - 1)
    }

    /// The item name of `row`, or `None` when blank or past the end.
    pub fn item_name(&self, row: usize) -> Option<&str> {
        self.record(row)
            .and_then(|r| r.get(NAME_FIELD))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Parsed price columns of `row`; absent rows yield all-empty columns.
    pub fn price_columns(&self, row: usize) -> PriceColumns {
        let mut columns = PriceColumns::default();
        if let Some(record) = self.record(row) {
            for (i, price) in columns.0.iter_mut().enumerate() {
                *price = record
                    .get(FIRST_PRICE_FIELD + i)
                    .and_then(|c| parse_price(c));
            }
        }
        columns
    }

    /// Whether any price column of `row` already holds a non-empty, non-zero value.
    pub fn is_priced(&self, row: usize) -> bool {
        self.record(row).is_some_and(|record| {
            record
                .iter()
                .skip(FIRST_PRICE_FIELD)
                .take(PRICE_COLUMNS)
                .any(|c| is_filled(c))
        })
    }

    /// Set all six price columns of `row` and flush the whole table.
    ///
    /// On a failed flush the row is restored, so memory never runs ahead of disk.
    pub fn write_prices(&mut self, row: usize, prices: &PriceColumns) -> Result<(), TallyError> {
        if row < FIRST_DATA_ROW || row > self.row_count() + 1 {
            return Err(TallyError::Table(format!(
                "row {row} is outside {}",
                self.path.display()
            )));
        }

        let record = &mut self.records[row - 1];
        let previous = record.clone();
        if record.len() < MIN_FIELDS {
            record.resize(MIN_FIELDS, String::new());
        }
        for (i, price) in prices.0.iter().enumerate() {
            record[FIRST_PRICE_FIELD + i] = format_price(*price);
        }

        if let Err(err) = self.save() {
            self.records[row - 1] = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Rewrite the table file in full.
    pub fn save(&self) -> Result<(), TallyError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        for record in &self.records {
            writer
                .write_record(record)
                .map_err(|e| table_error(&self.path, e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| TallyError::Table(format!("{}: {e}", self.path.display())))?;
        write_atomic(&self.path, &bytes)?;
        Ok(())
    }
}
