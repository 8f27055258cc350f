use std::error::Error;

use bisect_core::HarnessConfig;
use bisect_probe::SetupOutcome;
use bisect_store::FileStore;
use tracing::warn;

pub fn setup(config: &HarnessConfig) -> Result<u8, Box<dyn Error>> {
    let outcome = bisect_probe::setup(config)?;
    Ok(outcome.exit_code() as u8)
}

pub fn setup_bad(config: &HarnessConfig) -> Result<u8, Box<dyn Error>> {
    let outcome = bisect_probe::setup_bad(config)?;
    if let SetupOutcome::Failed { reason } = &outcome {
        warn!(%reason, "setup reported failure");
    }
    Ok(outcome.exit_code() as u8)
}

pub fn is_good(config: &HarnessConfig) -> Result<u8, Box<dyn Error>> {
    let store = FileStore::new(config.clone());
    let verdict = bisect_probe::is_good(&store)?;
    Ok(verdict.exit_code() as u8)
}
