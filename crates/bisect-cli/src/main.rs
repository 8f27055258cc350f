use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use bisect_core::HarnessConfig;
use clap::{Parser, Subcommand};
use commands::{
    bisect::{self as bisect_cmd, BisectArgs},
    generate::{self, GenObjArgs},
    probe,
    switch::{self, SwitchArgs},
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;

/// Exit code for errors, kept apart from the "bad" verdict.
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "bisect-harness",
    version,
    about = "Working-set steps for a bisection driver"
)]
struct Cli {
    /// YAML file describing the session layout.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the session files (overrides the config).
    #[arg(long, global = true)]
    work_dir: Option<PathBuf>,
    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prepare the environment by creating the setup sentinel.
    Setup,
    /// Report a failed preparation.
    SetupBad,
    /// Judge the current working set (exit 0 good, 1 bad or not set up).
    IsGood,
    /// Mark the selected objects good.
    SwitchToGood(SwitchArgs),
    /// Restore the selected objects to their original values.
    SwitchToBad(SwitchArgs),
    /// Mark the selected objects good and record the selection file.
    SwitchTmp(SwitchArgs),
    /// Generate a synthetic object list and working set.
    GenObj(GenObjArgs),
    /// Print every object index, one per line.
    GenInitList,
    /// Localise the bad objects in-process.
    Bisect(BisectArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<u8, Box<dyn Error>> {
    let config = resolve_config(cli.config.as_ref(), cli.work_dir.as_ref())?;
    match cli.command {
        Command::Setup => probe::setup(&config),
        Command::SetupBad => probe::setup_bad(&config),
        Command::IsGood => probe::is_good(&config),
        Command::SwitchToGood(args) => switch::to_good(&config, &args),
        Command::SwitchToBad(args) => switch::to_bad(&config, &args),
        Command::SwitchTmp(args) => switch::tmp(&config, &args),
        Command::GenObj(args) => generate::gen_obj(&config, &args),
        Command::GenInitList => generate::gen_init_list(&config),
        Command::Bisect(args) => bisect_cmd::run(&config, &args),
    }
}

fn resolve_config(
    path: Option<&PathBuf>,
    work_dir: Option<&PathBuf>,
) -> Result<HarnessConfig, Box<dyn Error>> {
    let mut config = match path {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    if let Some(dir) = work_dir {
        config.work_dir = dir.clone();
    }
    config.validate()?;
    Ok(config)
}
