//! acctmerge — merge the UNIX passwd and group tables into one JSON document.
//!
//! Runs in two passes:
//!
//! 1. **Group** — validate the group table, index group ids and collect each
//!    user's supplementary groups
//! 2. **Passwd** — validate every account against that index and attach its
//!    groups
//!
//! The first fault aborts the run and no output is written.

mod config;
mod error;
mod model;
mod parser;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use config::RunConfig;
use error::AccountError;
use model::UserTable;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "acctmerge",
    version,
    about = "Parse the UNIX /etc/passwd and /etc/group files and combine the data into a single JSON output"
)]
struct Cli {
    /// passwd file path
    #[arg(short = 'p', long = "passwd", default_value = config::DEFAULT_PASSWD_PATH)]
    passwd: PathBuf,

    /// group file path
    #[arg(short = 'g', long = "group", default_value = config::DEFAULT_GROUP_PATH)]
    group: PathBuf,

    /// output JSON file path
    #[arg(short = 'o', long = "outputfile", default_value = config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            passwd_path: cli.passwd,
            group_path: cli.group,
            output_path: cli.output,
        }
    }
}

fn open(path: &std::path::Path) -> Result<BufReader<File>, AccountError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| AccountError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Both passes, in order. Sources are checked up front, then each is scanned
/// and closed before the next one is opened.
fn consolidate(config: &RunConfig) -> Result<UserTable, AccountError> {
    config.check_sources()?;

    let groups = {
        let reader = open(&config.group_path)?;
        parser::group::parse(&config.group_path, reader)?
    };
    let reader = open(&config.passwd_path)?;
    parser::passwd::parse(&config.passwd_path, reader, &groups)
}

fn run(config: &RunConfig) -> Result<()> {
    let users = consolidate(config).inspect_err(|e| {
        error!(kind = ?e.kind(), path = %e.path().display(), "run aborted");
    })?;

    let json = render::render_json(&users).context("failed to serialize user table")?;
    render::write_output(&config.output_path, &json)?;

    info!(
        path = %config.output_path.display(),
        users = users.len(),
        "output written"
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = RunConfig::from(Cli::parse());
    run(&config)
}
