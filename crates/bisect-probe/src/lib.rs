//! Setup probes, goodness oracle and in-process driver.

pub mod bisect;
pub mod oracle;
pub mod setup;

pub use bisect::{bisect, BisectOptions, BisectReport};
pub use oracle::{is_good, is_good_with, GoodnessOracle, MarkerOracle};
pub use setup::{
    is_prepared, setup, setup_bad, EnvironmentProbe, FailingProbe, SentinelProbe, SetupOutcome,
};
