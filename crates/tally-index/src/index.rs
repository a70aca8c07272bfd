use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use tally_core::{PriceVector, ReferenceItem, TallyError};
use tally_table::ReferenceReader;

/// The reference catalog: item names in file order plus a name -> prices lookup.
///
/// Built once per session and never mutated afterwards. A name repeated in
/// the catalog keeps its first position in the ordered list while the later
/// row's prices replace the earlier ones; every repeat is logged and recorded.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    names: Vec<String>,
    prices: HashMap<String, PriceVector>,
    duplicates: Vec<String>,
}

impl ReferenceIndex {
    pub fn build(items: impl IntoIterator<Item = ReferenceItem>) -> Self {
        let mut index = Self::default();

        for item in items {
            if item.name.is_empty() {
                continue;
            }
            match index.prices.entry(item.name) {
                Entry::Occupied(mut slot) => {
                    tracing::warn!(
                        name = %slot.key(),
                        "duplicate reference name; later prices replace earlier ones"
                    );
                    index.duplicates.push(slot.key().clone());
                    slot.insert(item.prices);
                }
                Entry::Vacant(slot) => {
                    index.names.push(slot.key().clone());
                    slot.insert(item.prices);
                }
            }
        }

        index
    }

    /// Read the reference CSV at `path` and index it.
    pub fn load(path: &Path) -> Result<Self, TallyError> {
        let items = ReferenceReader::new(path).read()?;
        let index = Self::build(items);
        tracing::info!(
            path = %path.display(),
            items = index.len(),
            duplicates = index.duplicates.len(),
            "reference catalog indexed"
        );
        Ok(index)
    }

    /// All item names in catalog order.
    pub fn all_names(&self) -> &[String] {
        &self.names
    }

    pub fn prices_for(&self, name: &str) -> Option<&PriceVector> {
        self.prices.get(name)
    }

    /// Names that appeared more than once, once per repeat.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
