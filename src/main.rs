use std::io;

use anyhow::{Context, Result};
use log::info;

use incremental_regression::{cli::Cli, config::Config, Dataset, Session};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    let dataset = match &config.dataset {
        Some(path) => Dataset::load(path)
            .with_context(|| format!("failed to load dataset from {}", path.display()))?,
        None => Dataset::sample(),
    };
    info!("loaded dataset with {} point(s)", dataset.len());

    let stdin = io::stdin();
    let mut cli = Cli::new(
        stdin.lock(),
        io::stdout(),
        Session::new(dataset),
        config.on_invalid,
    );
    cli.run()?;

    Ok(())
}
