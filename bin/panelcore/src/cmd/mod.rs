//! Built-in `panelcore` commands.
use clap::Parser;
use clap::Subcommand;

pub mod check;
pub mod server;

/// Panelcore admin back-office control plane.
#[derive(Debug, Parser)]
#[command(version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the Panelcore configuration to use.
    #[arg(short = 'c', long = "config", default_value_t = String::from("panelcore.yaml"))]
    pub config: String,

    /// Select the panelcore command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Select the panelcore command to run.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Validate the loaded configuration without starting the server.
    #[command(alias = "check")]
    CheckConfig,

    /// Run the Panelcore back-office server.
    #[command(alias = "run")]
    Server,
}
