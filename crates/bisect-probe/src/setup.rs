use std::fs;
use std::path::PathBuf;

use bisect_core::errors::{BisectError, ErrorInfo};
use bisect_core::HarnessConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Result of an environment preparation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SetupOutcome {
    /// The sentinel now exists at `sentinel`.
    Prepared {
        /// Path of the sentinel file.
        sentinel: PathBuf,
    },
    /// Preparation failed; the sentinel was not touched.
    Failed {
        /// Why preparation failed.
        reason: String,
    },
}

impl SetupOutcome {
    /// Exit code reported to the driver.
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupOutcome::Prepared { .. } => 0,
            SetupOutcome::Failed { .. } => 1,
        }
    }
}

/// Prepares the environment a goodness judgement depends on.
pub trait EnvironmentProbe {
    /// Runs the preparation. Hard I/O failures are errors; a preparation
    /// that ran but did not succeed is a [`SetupOutcome::Failed`].
    fn prepare(&self, config: &HarnessConfig) -> Result<SetupOutcome, BisectError>;
}

/// Preparation that only drops the sentinel file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentinelProbe;

impl EnvironmentProbe for SentinelProbe {
    fn prepare(&self, config: &HarnessConfig) -> Result<SetupOutcome, BisectError> {
        fs::create_dir_all(&config.work_dir).map_err(|err| {
            BisectError::Setup(
                ErrorInfo::new("setup.mkdir", err.to_string()).with_path(&config.work_dir),
            )
        })?;
        let sentinel = config.sentinel_path();
        fs::File::create(&sentinel).map_err(|err| {
            BisectError::Setup(ErrorInfo::new("setup.sentinel", err.to_string()).with_path(&sentinel))
        })?;
        info!(sentinel = %sentinel.display(), "environment prepared");
        Ok(SetupOutcome::Prepared { sentinel })
    }
}

/// Preparation that always fails, for exercising driver error paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingProbe;

impl EnvironmentProbe for FailingProbe {
    fn prepare(&self, _config: &HarnessConfig) -> Result<SetupOutcome, BisectError> {
        warn!("environment preparation deliberately failed");
        Ok(SetupOutcome::Failed {
            reason: "setup deliberately failed".into(),
        })
    }
}

/// Creates the sentinel. Idempotent.
pub fn setup(config: &HarnessConfig) -> Result<SetupOutcome, BisectError> {
    SentinelProbe.prepare(config)
}

/// Reports a failed preparation without creating the sentinel.
pub fn setup_bad(config: &HarnessConfig) -> Result<SetupOutcome, BisectError> {
    FailingProbe.prepare(config)
}

/// True once the sentinel exists.
pub fn is_prepared(config: &HarnessConfig) -> bool {
    config.sentinel_path().is_file()
}
