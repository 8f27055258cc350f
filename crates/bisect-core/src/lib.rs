#![deny(missing_docs)]
#![doc = "Core types, errors and configuration shared by the bisection harness crates."]

use std::fmt;

use ::serde::{Deserialize, Serialize};

pub mod config;
pub mod errors;
pub mod rng;
pub mod serde;

pub use config::{GenConfig, HarnessConfig};
pub use errors::{BisectError, ErrorInfo};
pub use rng::{derive_substream_seed, RngHandle};
pub use serde::{from_json_slice, to_canonical_json_bytes};

/// Working-set value meaning "cleared of suspicion".
pub const GOOD_MARKER: i64 = 0;

/// Reserved object value that the marker oracle always judges bad.
///
/// Synthetic sessions use it to plant known culprits. Configurations may pick
/// another value when real object identifiers can equal `1`.
pub const KNOWN_BAD_MARKER: i64 = 1;

/// Which way a mutator moves the selected entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchDirection {
    /// Entries become [`GOOD_MARKER`].
    Good,
    /// Entries are restored to their object-list value.
    Bad,
}

impl fmt::Display for SwitchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchDirection::Good => f.write_str("good"),
            SwitchDirection::Bad => f.write_str("bad"),
        }
    }
}

/// Summary of one mutator application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchOutcome {
    /// Direction that was applied.
    pub direction: SwitchDirection,
    /// Indices listed in the selection, duplicates included.
    pub requested: usize,
    /// Distinct indices after collapsing duplicates.
    pub distinct: usize,
    /// Entries whose value actually changed.
    pub changed: usize,
}

/// Judgement returned by a goodness oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The configuration no longer reproduces the problem.
    Good,
    /// The configuration still reproduces the problem.
    Bad,
    /// The environment was never prepared, so no judgement was made.
    Unprepared,
}

impl Verdict {
    /// Process exit code understood by external drivers.
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Good => 0,
            Verdict::Bad | Verdict::Unprepared => 1,
        }
    }

    /// True only for [`Verdict::Good`].
    pub fn is_good(self) -> bool {
        matches!(self, Verdict::Good)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Good => f.write_str("good"),
            Verdict::Bad => f.write_str("bad"),
            Verdict::Unprepared => f.write_str("not set up"),
        }
    }
}
