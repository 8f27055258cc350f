//! In-process driver that localises bad objects over a [`Session`].
//!
//! Each candidate range is tested in isolation: every other entry is cleared
//! and only the range keeps its object values. A range judged bad is halved
//! until single culprits remain. This finds every object that makes the oracle
//! report bad on its own, which is exactly the marker oracle's model.

use std::ops::Range;

use bisect_core::errors::{BisectError, ErrorInfo};
use bisect_core::{SwitchDirection, Verdict};
use bisect_store::{objects_hash, Selection, Session};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::oracle::GoodnessOracle;

/// Options for [`bisect`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BisectOptions {
    /// Leave only the culprits as suspects instead of restoring the
    /// starting working set.
    pub leave_minimal: bool,
}

/// Outcome of a driver run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BisectReport {
    /// Number of objects in the session.
    pub object_count: usize,
    /// Indices whose object alone makes the configuration bad, ascending.
    pub bad_indices: Vec<usize>,
    /// How many times the oracle was consulted.
    pub oracle_queries: usize,
    /// SHA-256 fingerprint of the object list.
    pub objects_hash: String,
}

struct Probe<'a, O: GoodnessOracle> {
    oracle: &'a O,
    queries: usize,
}

impl<O: GoodnessOracle> Probe<'_, O> {
    fn ask(&mut self, session: &Session) -> Verdict {
        self.queries += 1;
        let verdict = self.oracle.judge(session.working_set());
        debug!(query = self.queries, %verdict, suspects = session.suspects().len(), "oracle consulted");
        verdict
    }

    fn range_is_bad(&mut self, session: &mut Session, range: Range<usize>) -> Result<bool, BisectError> {
        session.apply_all(SwitchDirection::Good);
        session.switch_to_bad(&Selection::from_indices(range))?;
        Ok(!self.ask(session).is_good())
    }
}

/// Finds every index whose object alone reproduces the problem.
///
/// Fails with `bisect.inconsistent` when the all-good configuration is itself
/// judged bad, since no subset could then explain the failure.
pub fn bisect<O: GoodnessOracle>(
    session: &mut Session,
    oracle: &O,
    options: BisectOptions,
) -> Result<BisectReport, BisectError> {
    let starting = session.working_set().to_vec();
    let mut probe = Probe { oracle, queries: 0 };

    session.apply_all(SwitchDirection::Good);
    if !probe.ask(session).is_good() {
        session.restore(starting)?;
        return Err(BisectError::Bisect(
            ErrorInfo::new(
                "bisect.inconsistent",
                "configuration with every object cleared is still bad",
            )
            .with_hint("the problem does not come from the object list"),
        ));
    }

    let mut bad_indices = Vec::new();
    let mut pending = vec![0..session.len()];
    while let Some(range) = pending.pop() {
        if range.is_empty() || !probe.range_is_bad(session, range.clone())? {
            continue;
        }
        if range.len() == 1 {
            info!(index = range.start, "isolated bad object");
            bad_indices.push(range.start);
            continue;
        }
        let mid = range.start + range.len() / 2;
        pending.push(mid..range.end);
        pending.push(range.start..mid);
    }
    bad_indices.sort_unstable();

    if options.leave_minimal {
        session.apply_all(SwitchDirection::Good);
        session.switch_to_bad(&Selection::from_indices(bad_indices.iter().copied()))?;
    } else {
        session.restore(starting)?;
    }

    Ok(BisectReport {
        object_count: session.len(),
        bad_indices,
        oracle_queries: probe.queries,
        objects_hash: objects_hash(session.objects())?,
    })
}
