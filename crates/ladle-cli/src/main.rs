use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use ladle::write_output;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; diagnostics go to stderr so stdout stays a
    // clean data stream.
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter = format!("ladle={},ladle_cli={}", log_level, log_level);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(io::stderr)
        .init();

    let options = cli.to_options()?;

    let raw = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("could not read stdin")?;
            buffer
        }
    };
    tracing::debug!(bytes = raw.len(), "read input");
    let value: serde_json::Value = serde_json::from_str(&raw).context("input is not valid JSON")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_output(&mut out, &value, &options)?;
    out.flush()?;

    Ok(())
}
