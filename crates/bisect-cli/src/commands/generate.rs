use std::error::Error;
use std::io::{self, Write};

use bisect_core::{GenConfig, HarnessConfig};
use bisect_store::{generate_session, initial_items, FileStore};
use clap::Args;
use tracing::info;

#[derive(Args, Debug)]
pub struct GenObjArgs {
    /// Number of objects to generate.
    #[arg(short = 'n', long, default_value_t = GenConfig::default().num_objects)]
    pub num_objects: usize,
    /// Number of objects carrying the bad marker.
    #[arg(short = 'b', long, default_value_t = GenConfig::default().num_bad)]
    pub num_bad: usize,
    /// Seed for placing the bad objects.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

pub fn gen_obj(config: &HarnessConfig, args: &GenObjArgs) -> Result<u8, Box<dyn Error>> {
    let gen = GenConfig {
        num_objects: args.num_objects,
        num_bad: args.num_bad,
        seed: args.seed,
    };
    let session = generate_session(&gen, config.bad_marker)?;
    let store = FileStore::new(config.clone());
    store.create_session(&session)?;
    info!(
        objects = session.len(),
        bad = gen.num_bad,
        seed = gen.seed,
        path = %config.objects_path().display(),
        "generated session"
    );
    Ok(0)
}

pub fn gen_init_list(config: &HarnessConfig) -> Result<u8, Box<dyn Error>> {
    let store = FileStore::new(config.clone());
    let session = store.load_session()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for index in initial_items(&session) {
        writeln!(out, "{index}")?;
    }
    out.flush()?;
    Ok(0)
}
