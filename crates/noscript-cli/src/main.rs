//! noscript - Main Entry Point
//!
//! Cleans a saved HTML page in place, keeping an untouched copy as backup.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use noscript_clean::{CleanOptions, clean_file, rules};
use tracing_subscriber::EnvFilter;

/// Strip scripts, empty containers and chat UI chrome from an HTML file
#[derive(Debug, Parser)]
#[command(name = "noscript", version, about)]
struct Cli {
    /// HTML file to clean in place
    #[arg(default_value = rules::DEFAULT_INPUT_FILE)]
    file: PathBuf,

    /// Insert an <h1> with this text into the third <div> of the first <article>
    #[arg(long)]
    heading: Option<String>,

    /// Where to copy the original file before overwriting it
    #[arg(long, default_value = rules::BACKUP_FILE)]
    backup: PathBuf,

    /// Log every pass
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> CleanOptions {
        let options = CleanOptions::new(&self.file).with_backup_path(&self.backup);
        match &self.heading {
            Some(heading) => options.with_heading(heading.as_str()),
            None => options,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let outcome = clean_file(&cli.options())
        .with_context(|| format!("cleaning {} failed", cli.file.display()))?;

    tracing::info!(
        before = outcome.bytes_before,
        after = outcome.bytes_after,
        report = %outcome.report,
        "done"
    );
    println!("✅ Cleaned HTML saved in-place at {}", outcome.path.display());

    Ok(())
}
