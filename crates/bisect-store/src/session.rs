use bisect_core::errors::{BisectError, ErrorInfo};
use bisect_core::{SwitchDirection, SwitchOutcome, GOOD_MARKER};
use tracing::debug;

use crate::selection::Selection;

/// In-memory view of one bisection session.
///
/// Holds the immutable object list and the working set side by side. The
/// constructors enforce the two data-model invariants: both sequences have
/// the same length, and every working-set entry is either [`GOOD_MARKER`] or
/// the object value at the same index. The mutators preserve them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    objects: Vec<i64>,
    working: Vec<i64>,
}

impl Session {
    /// Builds a session from an object list and an existing working set.
    pub fn new(objects: Vec<i64>, working: Vec<i64>) -> Result<Self, BisectError> {
        check_aligned(&objects, &working)?;
        Ok(Self { objects, working })
    }

    /// Starts a fresh session in which every object is a suspect.
    pub fn from_objects(objects: Vec<i64>) -> Self {
        let working = objects.clone();
        Self { objects, working }
    }

    /// Number of objects under test.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True for a session without objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The immutable object list.
    pub fn objects(&self) -> &[i64] {
        &self.objects
    }

    /// The current working set.
    pub fn working_set(&self) -> &[i64] {
        &self.working
    }

    /// Indices still carrying their object value.
    pub fn suspects(&self) -> Vec<usize> {
        self.working
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != GOOD_MARKER)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Indices currently marked good.
    pub fn cleared(&self) -> Vec<usize> {
        self.working
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == GOOD_MARKER)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// True when any working-set entry equals `marker`.
    pub fn contains(&self, marker: i64) -> bool {
        self.working.contains(&marker)
    }

    /// Marks every selected entry good.
    pub fn switch_to_good(&mut self, selection: &Selection) -> Result<SwitchOutcome, BisectError> {
        self.apply(SwitchDirection::Good, selection)
    }

    /// Restores every selected entry to its object value.
    pub fn switch_to_bad(&mut self, selection: &Selection) -> Result<SwitchOutcome, BisectError> {
        self.apply(SwitchDirection::Bad, selection)
    }

    /// Applies `direction` to the selection.
    ///
    /// The whole selection is validated first; on error the working set is
    /// unchanged.
    pub fn apply(
        &mut self,
        direction: SwitchDirection,
        selection: &Selection,
    ) -> Result<SwitchOutcome, BisectError> {
        let indices = selection.resolve(self.len())?;
        let changed = indices
            .iter()
            .filter(|&&index| self.set_entry(index, direction))
            .count();
        debug!(%direction, requested = selection.len(), distinct = indices.len(), changed, "applied selection");
        Ok(SwitchOutcome {
            direction,
            requested: selection.len(),
            distinct: indices.len(),
            changed,
        })
    }

    /// Moves every entry in `direction`.
    pub fn apply_all(&mut self, direction: SwitchDirection) -> SwitchOutcome {
        let changed = (0..self.len())
            .filter(|&index| self.set_entry(index, direction))
            .count();
        SwitchOutcome {
            direction,
            requested: self.len(),
            distinct: self.len(),
            changed,
        }
    }

    fn set_entry(&mut self, index: usize, direction: SwitchDirection) -> bool {
        let target = match direction {
            SwitchDirection::Good => GOOD_MARKER,
            SwitchDirection::Bad => self.objects[index],
        };
        let previous = std::mem::replace(&mut self.working[index], target);
        previous != target
    }

    /// Replaces the working set wholesale, re-checking the invariants.
    pub fn restore(&mut self, working: Vec<i64>) -> Result<(), BisectError> {
        check_aligned(&self.objects, &working)?;
        self.working = working;
        Ok(())
    }
}

fn check_aligned(objects: &[i64], working: &[i64]) -> Result<(), BisectError> {
    if objects.len() != working.len() {
        return Err(BisectError::Store(
            ErrorInfo::new(
                "store.length_mismatch",
                "working set and object list differ in length",
            )
            .with_context("objects", objects.len().to_string())
            .with_context("working_set", working.len().to_string()),
        ));
    }
    let diverged = objects
        .iter()
        .zip(working)
        .position(|(object, value)| *value != GOOD_MARKER && value != object);
    if let Some(index) = diverged {
        return Err(BisectError::Store(
            ErrorInfo::new(
                "store.entry_diverged",
                "working set entry is neither good nor the object value",
            )
            .with_context("index", index.to_string())
            .with_context("object", objects[index].to_string())
            .with_context("value", working[index].to_string()),
        ));
    }
    Ok(())
}
