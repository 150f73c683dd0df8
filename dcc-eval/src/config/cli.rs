use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(about = "Summarize the statistics logs of DCC simulation runs")]
pub struct CliOpt {
    /// Path where a JSON report with the raw counters should be written, in addition to the
    /// summary printed on stdout
    #[arg(long, global = true)]
    pub report: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute the packet delivery ratio as received / (received + discarded)
    DiscardPdr(LogOpt),
    /// Compute the packet delivery ratio as received / (broadcast * (node count - 1))
    BroadcastPdr(BroadcastPdrOpt),
    /// Sum the CAM and CPM send counters of all nodes
    MessageCounts(LogOpt),
}

#[derive(Args, Debug, Clone)]
pub struct LogOpt {
    /// Path to the simulation's statistics log
    pub log_file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct BroadcastPdrOpt {
    /// Path to the simulation's statistics log
    pub log_file: PathBuf,

    /// The number of nodes in the scenario (every broadcast is meant for all other nodes)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub node_count: u64,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::DiscardPdr(_) => "discard-pdr",
            Command::BroadcastPdr(_) => "broadcast-pdr",
            Command::MessageCounts(_) => "message-counts",
        }
    }
}
