//! Reference catalog index.

mod index;

pub use index::ReferenceIndex;
