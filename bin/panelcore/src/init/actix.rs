//! Generic ActixWeb Server initialisation logic.
use std::sync::Arc;

use actix_web::web::ServiceConfig;
use actix_web::App;
use actix_web::HttpServer;
use anyhow::Result;

use panelcore_auth::identity::Authenticator;
use panelcore_conf::HttpConf;
use panelcore_context::Context;

use crate::api::context::ContextMiddleware;

/// Builder pattern to configure and start an ActixWeb Server.
#[derive(Clone)]
pub struct ActixServer {
    conf: HttpConf,
    configs: Vec<Arc<dyn Fn(&mut ServiceConfig) + Send + Sync>>,
}

impl ActixServer {
    /// Create an ActixWeb Server configuration builder.
    pub fn new(conf: HttpConf) -> Self {
        ActixServer {
            conf,
            configs: Vec::new(),
        }
    }

    /// Convert the builder into an [`HttpServer`](actix_web::HttpServer) and run it.
    pub fn run(self, args: ActixServerRunArgs) -> Result<actix_web::dev::Server> {
        let context_middleware = ContextMiddleware::new(args.context, args.authenticator);
        let configs = self.configs;
        let server = HttpServer::new(move || {
            let mut app = App::new();
            for config in configs.iter() {
                app = app.configure(|service| config(service));
            }
            app.wrap(context_middleware.clone())
        })
        .disable_signals()
        .bind(&self.conf.bind)?;
        Ok(server.run())
    }

    /// Add a server configuration closure to be applied when the server is started.
    pub fn with_config<F>(&mut self, config: F) -> &mut Self
    where
        F: Fn(&mut ServiceConfig) + Send + Sync + 'static,
    {
        self.configs.push(Arc::new(config));
        self
    }
}

/// Collection of server runtime configuration arguments.
pub struct ActixServerRunArgs {
    /// Interface to the requests authentication service.
    pub authenticator: Authenticator,

    /// Top-level context the server will use to derive request contexts.
    pub context: Context,
}
