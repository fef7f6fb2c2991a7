//! Combine individual logical units to initialise and run a Panelcore process.
use anyhow::Result;
use clap::Parser;

use panelcore_conf::Conf;

mod api;
mod backends;
mod cmd;
mod init;

pub use self::cmd::Cli;

/// Initialise the panelcore process and invoke a command implementation.
pub async fn execute(cli: Cli, conf: Conf) -> Result<()> {
    match cli.command {
        cmd::Command::CheckConfig => cmd::check::run(cli, conf).await,
        cmd::Command::Server => cmd::server::run(cli, conf).await,
    }
}

/// Initialise the async runtime for the process and invoke [`execute`].
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let conf = panelcore_conf::load(&cli.config)?;
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed tokio runtime initialisation")
        .block_on(execute(cli, conf))
}
