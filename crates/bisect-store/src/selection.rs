use std::collections::BTreeSet;

use bisect_core::errors::{BisectError, ErrorInfo};

/// Indices named by one step of the driver, as read from a selection file.
///
/// The raw values are kept unvalidated until the selection is resolved
/// against a concrete object count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    raw: Vec<i64>,
}

impl Selection {
    /// Wraps raw index values, duplicates and all.
    pub fn new(raw: Vec<i64>) -> Self {
        Self { raw }
    }

    /// Builds a selection from object indices.
    ///
    /// Indices beyond `i64::MAX` saturate, which keeps them out of range for
    /// any object list instead of wrapping to a negative value.
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Self {
            raw: indices
                .into_iter()
                .map(|idx| i64::try_from(idx).unwrap_or(i64::MAX))
                .collect(),
        }
    }

    /// Number of listed indices, duplicates included.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True when the selection names nothing.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Validates every index against `len` and collapses duplicates.
    ///
    /// Fails on the first negative or `>= len` index so that callers can
    /// reject the whole step before touching any entry.
    pub fn resolve(&self, len: usize) -> Result<BTreeSet<usize>, BisectError> {
        let mut distinct = BTreeSet::new();
        for (position, &value) in self.raw.iter().enumerate() {
            let index = usize::try_from(value).ok().filter(|idx| *idx < len);
            let Some(index) = index else {
                return Err(BisectError::Selection(
                    ErrorInfo::new("selection.out_of_range", "selection index outside object range")
                        .with_context("index", value.to_string())
                        .with_context("position", position.to_string())
                        .with_context("len", len.to_string()),
                ));
            };
            distinct.insert(index);
        }
        Ok(distinct)
    }
}
