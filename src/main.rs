mod config;
mod data;
mod error;
mod prompt;
mod session;
mod stats;
mod viewer;

use anyhow::{Context, Result};
use clap::Parser;

use config::{Args, Config};
use prompt::Prompter;
use session::Session;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    let config = Config::from(&args);
    log::info!("data directory: {}", config.data_dir.display());

    Session::new(config, Prompter::stdio())
        .run()
        .context("interactive session ended unexpectedly")
}
