use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of vendor slots in a reference price vector (V0..V6).
pub const VENDOR_SLOTS: usize = 7;

/// Number of price columns in a benchmark row (C0..C5).
pub const PRICE_COLUMNS: usize = 6;

/// First data row of either table; row 1 is the header.
pub const FIRST_DATA_ROW: usize = 2;

/// A store whose price appears in the reference catalog, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Carrefour,
    Fresho,
    FreshRich,
    Grandios,
    WestZone,
    Rayyan,
    WMart,
}

impl Vendor {
    pub const ALL: [Vendor; VENDOR_SLOTS] = [
        Vendor::Carrefour,
        Vendor::Fresho,
        Vendor::FreshRich,
        Vendor::Grandios,
        Vendor::WestZone,
        Vendor::Rayyan,
        Vendor::WMart,
    ];

    /// Position of this vendor in a `PriceVector`.
    pub fn slot(self) -> usize {
        match self {
            Vendor::Carrefour => 0,
            Vendor::Fresho => 1,
            Vendor::FreshRich => 2,
            Vendor::Grandios => 3,
            Vendor::WestZone => 4,
            Vendor::Rayyan => 5,
            Vendor::WMart => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Vendor::Carrefour => "carrefour",
            Vendor::Fresho => "fresho",
            Vendor::FreshRich => "freshrich",
            Vendor::Grandios => "grandios",
            Vendor::WestZone => "westzone",
            Vendor::Rayyan => "rayyan",
            Vendor::WMart => "wmart",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A benchmark price column, in column order (C0..C5).
///
/// `WestZone` is fed by two vendors; see [`crate::merge_prices`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceColumn {
    Carrefour,
    WestZone,
    Grandios,
    Fresho,
    FreshRich,
    Rayyan,
}

impl PriceColumn {
    pub const ALL: [PriceColumn; PRICE_COLUMNS] = [
        PriceColumn::Carrefour,
        PriceColumn::WestZone,
        PriceColumn::Grandios,
        PriceColumn::Fresho,
        PriceColumn::FreshRich,
        PriceColumn::Rayyan,
    ];

    pub fn index(self) -> usize {
        match self {
            PriceColumn::Carrefour => 0,
            PriceColumn::WestZone => 1,
            PriceColumn::Grandios => 2,
            PriceColumn::Fresho => 3,
            PriceColumn::FreshRich => 4,
            PriceColumn::Rayyan => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriceColumn::Carrefour => "carrefour",
            PriceColumn::WestZone => "westzone",
            PriceColumn::Grandios => "grandios",
            PriceColumn::Fresho => "fresho",
            PriceColumn::FreshRich => "freshrich",
            PriceColumn::Rayyan => "rayyan",
        }
    }
}

impl fmt::Display for PriceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a price counts as present: set and non-zero.
pub fn is_present(price: Option<f64>) -> bool {
    matches!(price, Some(v) if v != 0.0)
}

/// Per-vendor prices of one reference item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceVector(pub [Option<f64>; VENDOR_SLOTS]);

impl PriceVector {
    pub fn get(&self, vendor: Vendor) -> Option<f64> {
        self.0[vendor.slot()]
    }

    /// True when no vendor slot holds a present price.
    pub fn is_empty(&self) -> bool {
        !self.0.iter().copied().any(is_present)
    }
}

/// The six price columns of a benchmark row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceColumns(pub [Option<f64>; PRICE_COLUMNS]);

impl PriceColumns {
    pub fn get(&self, column: PriceColumn) -> Option<f64> {
        self.0[column.index()]
    }

    pub fn set(&mut self, column: PriceColumn, price: Option<f64>) {
        self.0[column.index()] = price;
    }

    pub fn iter(&self) -> impl Iterator<Item = (PriceColumn, Option<f64>)> + '_ {
        PriceColumn::ALL.iter().map(|&c| (c, self.get(c)))
    }
}

/// One row of the reference catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceItem {
    pub name: String,
    pub prices: PriceVector,
}

/// A word of a candidate name and whether the query explains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateWord {
    pub text: String,
    pub explained: bool,
}

/// A ranked reference item proposed for a benchmark row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub name: String,
    /// Fuzzy score in [0, 100].
    pub score: f64,
    pub words: Vec<CandidateWord>,
}

impl Candidate {
    /// Indices of words explained by the query.
    pub fn highlighted_indices(&self) -> Vec<usize> {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, w)| w.explained)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Durable pointer to the next benchmark row awaiting a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    pub row: usize,
}

impl CursorState {
    pub fn new(row: usize) -> Self {
        Self {
            row: row.max(FIRST_DATA_ROW),
        }
    }

    pub fn next(self) -> Self {
        Self { row: self.row + 1 }
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            row: FIRST_DATA_ROW,
        }
    }
}
