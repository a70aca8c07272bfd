use crate::types::{PriceColumn, PriceColumns, PriceVector, Vendor, is_present};

/// Map a reference price vector onto the benchmark price columns.
///
/// The mapping is fixed. The `WestZone` column takes the West Zone price
/// when present (set and non-zero) and falls back to W Mart otherwise.
pub fn merge_prices(prices: &PriceVector) -> PriceColumns {
    let mut columns = PriceColumns::default();
    for column in PriceColumn::ALL {
        columns.set(column, source_price(prices, column));
    }
    columns
}

fn source_price(prices: &PriceVector, column: PriceColumn) -> Option<f64> {
    match column {
        PriceColumn::Carrefour => prices.get(Vendor::Carrefour),
        PriceColumn::WestZone => {
            let west_zone = prices.get(Vendor::WestZone);
            if is_present(west_zone) {
                west_zone
            } else {
                prices.get(Vendor::WMart)
            }
        }
        PriceColumn::Grandios => prices.get(Vendor::Grandios),
        PriceColumn::Fresho => prices.get(Vendor::Fresho),
        PriceColumn::FreshRich => prices.get(Vendor::FreshRich),
        PriceColumn::Rayyan => prices.get(Vendor::Rayyan),
    }
}
