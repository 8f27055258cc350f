use bisect_core::errors::BisectError;
use bisect_core::Verdict;
use bisect_store::FileStore;
use tracing::{info, warn};

use crate::setup::is_prepared;

/// Judges whether a working-set configuration still reproduces the problem.
pub trait GoodnessOracle {
    /// Returns [`Verdict::Good`] or [`Verdict::Bad`] for `working_set`.
    fn judge(&self, working_set: &[i64]) -> Verdict;
}

/// Bad exactly when some entry equals the reserved bad marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerOracle {
    bad_marker: i64,
}

impl MarkerOracle {
    /// Oracle that flags any entry equal to `bad_marker`.
    pub fn new(bad_marker: i64) -> Self {
        Self { bad_marker }
    }

    /// Marker this oracle treats as bad.
    pub fn bad_marker(&self) -> i64 {
        self.bad_marker
    }
}

impl GoodnessOracle for MarkerOracle {
    fn judge(&self, working_set: &[i64]) -> Verdict {
        if working_set.contains(&self.bad_marker) {
            Verdict::Bad
        } else {
            Verdict::Good
        }
    }
}

impl<F> GoodnessOracle for F
where
    F: Fn(&[i64]) -> Verdict,
{
    fn judge(&self, working_set: &[i64]) -> Verdict {
        self(working_set)
    }
}

/// File-backed goodness check.
///
/// Without the setup sentinel the answer is [`Verdict::Unprepared`] and the
/// working set is not read at all. Otherwise the working set is loaded and
/// handed to `oracle`.
pub fn is_good_with<O: GoodnessOracle>(store: &FileStore, oracle: &O) -> Result<Verdict, BisectError> {
    let config = store.config();
    if !is_prepared(config) {
        warn!(sentinel = %config.sentinel_path().display(), "goodness check before setup");
        return Ok(Verdict::Unprepared);
    }
    let working = store.read_working_set()?;
    let verdict = oracle.judge(&working);
    info!(%verdict, entries = working.len(), "judged working set");
    Ok(verdict)
}

/// [`is_good_with`] using the configured bad marker.
pub fn is_good(store: &FileStore) -> Result<Verdict, BisectError> {
    is_good_with(store, &MarkerOracle::new(store.config().bad_marker))
}
