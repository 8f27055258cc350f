use std::path::Path;

use bisect_core::errors::BisectError;
use bisect_core::{SwitchDirection, SwitchOutcome};
use tracing::info;

use crate::store::FileStore;

/// One read-mutate-write step against the files.
fn switch_step(
    store: &FileStore,
    direction: SwitchDirection,
    selection_path: &Path,
) -> Result<SwitchOutcome, BisectError> {
    let mut session = store.load_session()?;
    let selection = store.read_object_index(selection_path)?;
    let outcome = session.apply(direction, &selection)?;
    store.save_session(&session)?;
    info!(
        %direction,
        selection = %selection_path.display(),
        changed = outcome.changed,
        suspects = session.suspects().len(),
        "switched working set"
    );
    Ok(outcome)
}

/// Clears every index in the selection file.
pub fn switch_to_good(store: &FileStore, selection_path: &Path) -> Result<SwitchOutcome, BisectError> {
    switch_step(store, SwitchDirection::Good, selection_path)
}

/// Restores every index in the selection file to its object value.
pub fn switch_to_bad(store: &FileStore, selection_path: &Path) -> Result<SwitchOutcome, BisectError> {
    switch_step(store, SwitchDirection::Bad, selection_path)
}

/// Like [`switch_to_good`], then records `selection_path` in the tmp marker.
pub fn switch_tmp(store: &FileStore, selection_path: &Path) -> Result<SwitchOutcome, BisectError> {
    let outcome = switch_step(store, SwitchDirection::Good, selection_path)?;
    let marker = store.record_tmp(selection_path)?;
    info!(marker = %marker.display(), "recorded temporary selection");
    Ok(outcome)
}
