//! Validate the Panelcore configuration.
use anyhow::Result;

use panelcore_conf::Conf;
use panelcore_context::Context;

use super::Cli;
use crate::init::GenericInit;

/// Validate the loaded configuration without starting the server.
pub async fn run(_cli: Cli, conf: Conf) -> Result<()> {
    let mut generic = GenericInit::configure(conf).await?;
    generic.register_default_backends();
    let context = Context::root(generic.logger.clone()).build();
    generic.validate_backends_conf(&context)?;
    slog::info!(context.logger, "Panelcore configuration is valid");
    Ok(())
}
