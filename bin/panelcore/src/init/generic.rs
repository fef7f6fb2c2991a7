//! Process initialisation builder for aspects to initialise for all commands.
use anyhow::Result;
use slog::Logger;

use panelcore_conf::Conf;
use panelcore_context::Context;

use super::actix::ActixServer;
use super::actix::ActixServerRunArgs;
use super::backends::Backends;
use super::logging;

/// Process builder to initialise all Panelcore commands.
pub struct GenericInit {
    pub api: ActixServer,
    pub backends: Backends,
    pub conf: Conf,
    pub logger: Logger,
    pub metrics: prometheus::Registry,
    server: Option<actix_web::dev::Server>,
}

impl GenericInit {
    /// Build a process from the loaded configuration.
    pub async fn configure(conf: Conf) -> Result<Self> {
        let logger = logging::configure(&conf.logging);
        slog::info!(logger, "Process logging initialised");
        let api = ActixServer::new(conf.http.clone());
        let server = Self {
            api,
            backends: Default::default(),
            conf,
            logger,
            metrics: prometheus::Registry::new(),
            server: None,
        };
        Ok(server)
    }

    /// Register all supported backends for all process dependencies.
    pub fn register_default_backends(&mut self) -> &mut Self {
        self.backends
            .register_sessions("memory", crate::backends::memory::MemorySessionsFactory);
        self
    }

    /// Register metrics for all selected backends.
    pub fn register_metrics(&self) -> Result<&Self> {
        self.backends
            .sessions(&self.conf.sessions.backend)?
            .register_metrics(&self.metrics)?;
        Ok(self)
    }

    // Configure and run the API server.
    pub fn run_server(
        &mut self,
        context: &Context,
        server_args: ActixServerRunArgs,
    ) -> Result<&mut Self> {
        slog::debug!(context.logger, "Starting API server");
        let server = self.api.clone().run(server_args)?;
        self.server = Some(server);
        slog::info!(
            context.logger, "API server listening for connections";
            "address" => &self.conf.http.bind,
        );
        Ok(self)
    }

    /// Validate the loaded configuration objects for the selected backends.
    pub fn validate_backends_conf(&self, context: &Context) -> Result<&Self> {
        self.backends
            .sessions(&self.conf.sessions.backend)?
            .conf_check(context, &self.conf.sessions.options)?;
        Ok(self)
    }

    /// Initialisation done, wait until the process fails or the user shuts it down.
    pub async fn wait(self) -> Result<()> {
        slog::info!(self.logger, "Panelcore process initialisation complete");
        let server = match self.server {
            Some(server) => server,
            None => return Ok(()),
        };
        // Watch for the shutdown signal while the server future keeps running.
        let handle = server.handle();
        let logger = self.logger.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                slog::info!(logger, "Shutdown signal received, stopping API server");
                handle.stop(true).await;
            }
        });
        server.await.map_err(anyhow::Error::from)
    }
}
