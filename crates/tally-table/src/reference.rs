use crate::cell::parse_price;
use std::path::Path;
use tally_core::{PriceVector, ReferenceItem, TallyError, VENDOR_SLOTS};

/// Field holding the item name in a reference record (column A).
const NAME_FIELD: usize = 0;
/// First vendor price field (column B); V0..V6 occupy B..H.
const FIRST_PRICE_FIELD: usize = 1;

/// Reads the reference catalog: header in row 1, one priced item per row after.
pub struct ReferenceReader<'a> {
    path: &'a Path,
}

impl<'a> ReferenceReader<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Read every named item, in file order. Rows with an empty name are skipped.
    pub fn read(&self) -> Result<Vec<ReferenceItem>, TallyError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(self.path)
            .map_err(|e| table_error(self.path, e))?;

        let mut items = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| table_error(self.path, e))?;
            let row = i + 2;

            let name = record.get(NAME_FIELD).map(str::trim).unwrap_or_default();
            if name.is_empty() {
                tracing::debug!(row, "skipping reference row without a name");
                continue;
            }

            let mut prices = [None; VENDOR_SLOTS];
            for (slot, price) in prices.iter_mut().enumerate() {
                let cell = record.get(FIRST_PRICE_FIELD + slot).unwrap_or_default();
                *price = parse_price(cell);
                if price.is_none() && !cell.trim().is_empty() {
                    tracing::debug!(row, slot, cell, "non-numeric reference price treated as absent");
                }
            }

            items.push(ReferenceItem {
                name: name.to_string(),
                prices: PriceVector(prices),
            });
        }

        tracing::debug!(path = %self.path.display(), items = items.len(), "reference catalog read");
        Ok(items)
    }
}

pub(crate) fn table_error(path: &Path, err: csv::Error) -> TallyError {
    TallyError::Table(format!("{}: {err}", path.display()))
}
