//! Panelcore server initialisation as a builder.
use anyhow::Result;

use panelcore_auth::access::AccessGate;
use panelcore_auth::access::PermissionSetPolicy;
use panelcore_bridge::Bridge;
use panelcore_bridge::Modern;
use panelcore_client_modern::HttpModern;
use panelcore_conf::Conf;
use panelcore_context::Context;
use panelcore_context::ContextBuilder;
use panelcore_injector::Injector;
use panelcore_sessions::SessionStoreFactory;
use panelcore_sessions::SessionStoreFactoryArgs;

use super::actix::ActixServerRunArgs;
use super::backends::Backends;
use super::generic::GenericInit;

use crate::backends::identity::SessionIdentity;

/// Process builder to initialise and run a Panelcore server instance.
pub struct Server {
    /// Root context for the process.
    context: ContextBuilder,

    /// Process initialisation logic common to all Panelcore commands.
    generic: GenericInit,
}

impl Server {
    /// Build a server from the loaded configuration.
    pub async fn configure(conf: Conf) -> Result<Self> {
        let generic = GenericInit::configure(conf).await?;
        let context = Context::root(generic.logger.clone());
        let server = Self { context, generic };
        Ok(server)
    }

    /// Register a new factory for a Session Store implementation.
    ///
    /// # Panics
    ///
    /// This method panics if the identifier of the new Session Store backend is already in use.
    pub fn register_sessions<B, S>(mut self, id: S, backend: B) -> Self
    where
        B: SessionStoreFactory + 'static,
        S: Into<String>,
    {
        self.generic.backends.register_sessions(id, backend);
        self
    }

    /// Register all supported backends for all process dependencies.
    pub fn register_default_backends(mut self) -> Self {
        self.generic.register_default_backends();
        self
    }

    /// Finalise process initialisation and run the Panelcore server.
    pub async fn run(mut self) -> Result<()> {
        // Prepare for late process initialisation.
        let context = self.context.build();
        self.generic
            .validate_backends_conf(&context)?
            .register_metrics()?;

        // Initialise dependencies and global injector.
        let injector = injector(&context, &self.generic.conf, &self.generic.backends).await?;
        Injector::set_global(injector);
        // Fetch the injector back out to ensure it is set correctly for the process.
        let injector = Injector::global();

        // Start execution of all process components.
        self.generic.run_server(
            &context,
            ActixServerRunArgs {
                authenticator: injector.authenticator,
                context: injector.context,
            },
        )?;

        // Run until user-requested exit or process error.
        self.generic.wait().await
    }

    /// Add an HTTP server configuration closure to be applied when the server is started.
    pub fn with_http_config<F>(mut self, config: F) -> Self
    where
        F: Fn(&mut actix_web::web::ServiceConfig) + Send + Sync + 'static,
    {
        self.generic.api.with_config(config);
        self
    }
}

/// Initialise all backends and collect them into an [`Injector`] object.
pub async fn injector(context: &Context, conf: &Conf, backends: &Backends) -> Result<Injector> {
    // Grab the session store factory and initialise the store client.
    let conf = conf.clone();
    let sessions = backends.sessions(&conf.sessions.backend)?;
    let sessions = sessions
        .session_store(SessionStoreFactoryArgs {
            conf: &conf.sessions.options,
            context,
        })
        .await?;

    // Initialise the legacy bridge over the modern API client.
    let modern = Modern::from(HttpModern::new(conf.bridge.modern_address.as_str())?);
    let bridge = Bridge::with_default_endpoints(sessions.clone(), modern);

    // Identity comes from platform sessions, access from conf-granted permissions.
    let authenticator = SessionIdentity::new(&conf.admins, sessions.clone()).into();
    let gate = AccessGate::wrap(PermissionSetPolicy);

    // Combine them into an Injector object.
    let injector = Injector {
        authenticator,
        bridge,
        conf,
        context: context.clone(),
        gate,
        sessions,
    };
    Ok(injector)
}
