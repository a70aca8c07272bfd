//! CSV storage for the reference catalog and the benchmark table.

mod atomic;
mod benchmark;
mod cell;
mod reference;

pub use atomic::write_atomic;
pub use benchmark::BenchmarkTable;
pub use cell::{format_price, is_filled, parse_price};
pub use reference::ReferenceReader;
