//! Command-line configuration and tracing setup.
//!
//! Every path is explicit: relative `--root` and `--output` values are
//! resolved against `--base-dir`, which defaults to the working directory.

use crate::walker::WalkConfig;
use crate::{DEFAULT_NOTEBOOK_DIR, DEFAULT_OUTPUT_FILE};
use clap::Parser;
use std::path::PathBuf;

/// Extract the code cells of every notebook in a folder into one text file.
#[derive(Parser, Debug)]
#[command(name = "notebook-to-txt", version, long_about = None)]
pub struct Cli {
    /// Directory that relative paths are resolved against.
    #[arg(long, env = "NOTEBOOK_TO_TXT_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Folder to search for .ipynb files.
    #[arg(long, env = "NOTEBOOK_TO_TXT_ROOT", default_value = DEFAULT_NOTEBOOK_DIR)]
    pub root: PathBuf,

    /// Text file that receives the extracted code. Overwritten on every run.
    #[arg(long, env = "NOTEBOOK_TO_TXT_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Only look at notebooks directly inside the root folder.
    #[arg(long)]
    pub no_recursive: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    pub fn into_config(self, current_dir: PathBuf) -> WalkConfig {
        let base = self.base_dir.unwrap_or(current_dir);
        WalkConfig::new(base.join(&self.root), base.join(&self.output))
            .recursive(!self.no_recursive)
    }
}

/// Diagnostics go to stderr so stdout only carries progress and the summary.
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "notebook_to_txt=warn",
        1 => "notebook_to_txt=info",
        2 => "notebook_to_txt=debug",
        _ => "notebook_to_txt=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
