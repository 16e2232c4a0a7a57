//! CLI argument parsing

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ppscount")]
#[command(version, about = "Per-source packet rate monitor", long_about = None)]
pub struct Cli {
    /// Verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start counting packets per second per source IP on an interface
    Start {
        /// Network interface name
        #[arg(short, long, default_value = "ens3")]
        interface: String,

        /// BPF filter applied to the capture handle
        #[arg(short, long)]
        filter: Option<String>,

        /// Disable promiscuous mode
        #[arg(long)]
        no_promisc: bool,
    },

    /// List available network interfaces
    Interfaces,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
