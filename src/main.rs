use anyhow::{Context, Result};
use clap::Parser;
use notebook_to_txt::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(&cli);

    let current_dir = std::env::current_dir().context("cannot determine working directory")?;
    let config = cli.into_config(current_dir);

    notebook_to_txt::run(&config).context("failed to write extracted code")?;
    Ok(())
}
