//! ActixWeb Middleware to attach [`Context`] objects to requests.
use std::future::Ready;
use std::sync::Arc;

use actix_web::dev::forward_ready;
use actix_web::dev::Service;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::dev::Transform;
use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpMessage;
use anyhow::Result;
use futures_util::future::LocalBoxFuture;

use panelcore_auth::identity::Authenticator;
use panelcore_context::Context;
use panelcore_context::ContextBuilder;

/// Derive a per-request [`Context`] and attach it to requests before they are handled.
pub struct ContextService<S> {
    authenticator: Authenticator,
    root: Context,
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for ContextService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, request: ServiceRequest) -> Self::Future {
        // Extract the root context, from app data if one is attached.
        let root = request
            .app_data::<Data<Context>>()
            .map(|root| root.as_ref().clone())
            .unwrap_or_else(|| self.root.clone());

        // Delay invoking the service so we can configure the request asynchronously.
        let authenticator = self.authenticator.clone();
        let service = Arc::clone(&self.service);
        Box::pin(async move {
            let context = context_derive_auth(&authenticator, &root, &request).await;
            let context = context.build();

            // Attach the derived context to the request.
            request.extensions_mut().insert(context);

            // Proceed to the wrapped service and handle the request.
            let service = service.call(request);
            service.await
        })
    }
}

/// Wrap an [`App`](actix_web::App) with a middleware that derives per-request contexts.
#[derive(Clone)]
pub struct ContextMiddleware {
    authenticator: Authenticator,
    root: Context,
}

impl ContextMiddleware {
    /// Initialise a [`ContextMiddleware`] with a root [`Context`] to use as a fallback.
    pub fn new(root: Context, authenticator: Authenticator) -> Self {
        Self {
            authenticator,
            root,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ContextMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ContextService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let middleware = ContextService {
            authenticator: self.authenticator.clone(),
            root: self.root.clone(),
            service: Arc::new(service),
        };
        std::future::ready(Ok(middleware))
    }
}

/// Configure authentication parameters for the derived context.
///
/// Requests that fail authentication proceed as anonymous: the access gate
/// fails closed for them and resource handlers reject them uniformly.
async fn context_derive_auth(
    authenticator: &Authenticator,
    root: &Context,
    request: &ServiceRequest,
) -> ContextBuilder {
    let builder = root.derive();
    match authenticator.authenticate(root, request.request()).await {
        Ok(Some(principal)) => builder
            .log_values(slog::o!("user" => principal.user.clone()))
            .authenticated(principal),
        Ok(None) => builder,
        Err(error) => {
            slog::warn!(
                root.logger, "Request authentication failed, proceeding as anonymous";
                "error" => %error,
            );
            builder
        }
    }
}
