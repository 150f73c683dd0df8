use crate::config::cli::{CliOpt, Command};
use crate::report::Report;
use anyhow::Context;
use clap::Parser;
use dcc_log::{Aggregator, BroadcastPdr, DiscardPdr, MessageCounts, scan_file};
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod report;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = CliOpt::parse();
    match &options.command {
        Command::DiscardPdr(opt) => evaluate(&options, &opt.log_file, DiscardPdr::default()),
        Command::BroadcastPdr(opt) => {
            evaluate(&options, &opt.log_file, BroadcastPdr::new(opt.node_count))
        }
        Command::MessageCounts(opt) => evaluate(&options, &opt.log_file, MessageCounts::default()),
    }
}

fn evaluate<A>(options: &CliOpt, log_file: &Path, aggregator: A) -> anyhow::Result<()>
where
    A: Aggregator,
    A::Output: Display + Serialize,
{
    let operation = options.command.name();
    let scanned = scan_file(log_file, aggregator)
        .with_context(|| format!("failed to evaluate `{}`", log_file.display()))?;
    info!(operation, lines_read = scanned.lines_read, "log evaluated");

    println!("{}", scanned.result);

    if let Some(report_path) = &options.report {
        Report {
            operation,
            log_file,
            lines_read: scanned.lines_read,
            summary: &scanned.result,
        }
        .save(report_path)?;
        info!("report available at `{}`", report_path.display());
    }

    Ok(())
}
