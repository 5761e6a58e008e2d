mod batch;
mod color;
mod config;
mod data;
mod error;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use config::BatchConfig;
use render::eps::EpsRenderer;

/// Render diagnostic figures for exported KP solutions
#[derive(Parser, Debug)]
#[command(name = "kp-figures")]
#[command(about = "Load KP solution exports, check they are real-valued and render one figure per example")]
struct Args {
    /// Directory holding coords<N>.csv, soln<N>.csv and group<N>.csv
    base_dir: Option<PathBuf>,

    /// JSON config file; command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First example number
    #[arg(long)]
    first: Option<u32>,

    /// Last example number (inclusive)
    #[arg(short = 'n', long)]
    last: Option<u32>,

    /// Use this grid side instead of inferring it from the coordinates
    #[arg(long)]
    grid_side: Option<usize>,
}

impl Args {
    fn into_config(self) -> Result<BatchConfig> {
        let mut config = match &self.config {
            Some(path) => BatchConfig::from_json_file(path)?,
            None => BatchConfig::default(),
        };
        if let Some(dir) = self.base_dir {
            config.base_dir = dir;
        }
        if let Some(first) = self.first {
            config.first_example = first;
        }
        if let Some(last) = self.last {
            config.last_example = last;
        }
        if self.grid_side.is_some() {
            config.grid_side = self.grid_side;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config()?;
    log::info!(
        "Rendering examples {}..={} from {}",
        config.first_example,
        config.last_example,
        config.base_dir.display()
    );

    let report = batch::run_batch(&config, &EpsRenderer);

    if report.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        let failed: Vec<u32> = report.failed.iter().map(|(k, _)| *k).collect();
        log::warn!("Failed examples: {failed:?}");
        Ok(ExitCode::FAILURE)
    }
}
