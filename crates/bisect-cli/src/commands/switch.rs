use std::error::Error;
use std::path::PathBuf;

use bisect_core::HarnessConfig;
use bisect_store::FileStore;
use clap::Args;

#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// File listing one object index per line.
    pub selection: PathBuf,
}

pub fn to_good(config: &HarnessConfig, args: &SwitchArgs) -> Result<u8, Box<dyn Error>> {
    bisect_store::switch_to_good(&FileStore::new(config.clone()), &args.selection)?;
    Ok(0)
}

pub fn to_bad(config: &HarnessConfig, args: &SwitchArgs) -> Result<u8, Box<dyn Error>> {
    bisect_store::switch_to_bad(&FileStore::new(config.clone()), &args.selection)?;
    Ok(0)
}

pub fn tmp(config: &HarnessConfig, args: &SwitchArgs) -> Result<u8, Box<dyn Error>> {
    bisect_store::switch_tmp(&FileStore::new(config.clone()), &args.selection)?;
    Ok(0)
}
