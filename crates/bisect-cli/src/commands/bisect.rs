use std::error::Error;
use std::fs;
use std::path::PathBuf;

use bisect_core::{to_canonical_json_bytes, HarnessConfig};
use bisect_probe::{bisect, BisectOptions, MarkerOracle};
use bisect_store::FileStore;
use clap::Args;
use tracing::info;

#[derive(Args, Debug)]
pub struct BisectArgs {
    /// Leave only the culprits as suspects in the working set.
    #[arg(long)]
    pub leave_minimal: bool,
    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(config: &HarnessConfig, args: &BisectArgs) -> Result<u8, Box<dyn Error>> {
    let store = FileStore::new(config.clone());
    let mut session = store.load_session()?;
    let oracle = MarkerOracle::new(config.bad_marker);
    let options = BisectOptions {
        leave_minimal: args.leave_minimal,
    };
    let report = bisect(&mut session, &oracle, options)?;
    store.save_session(&session)?;
    info!(
        bad = report.bad_indices.len(),
        queries = report.oracle_queries,
        "bisection finished"
    );

    let json = String::from_utf8(to_canonical_json_bytes(&report)?)?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, json)?;
        }
        None => println!("{json}"),
    }
    Ok(0)
}
