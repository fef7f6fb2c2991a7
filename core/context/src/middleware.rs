//! ActixWeb Middleware to attach [`Context`] objects to requests.
use std::future::Ready;

use actix_web::dev::forward_ready;
use actix_web::dev::Service;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::dev::Transform;
use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpMessage;

use super::Context;

/// Derive a per-request [`Context`] and attach it to requests before they are handled.
pub struct ContextService<S> {
    root: Context,
    service: S,
}

impl<S, B> Service<ServiceRequest> for ContextService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, request: ServiceRequest) -> Self::Future {
        // Prefer a root context attached as app data over the middleware default.
        let root = request.app_data::<Data<Context>>();
        let context = root
            .map(|root| root.derive())
            .unwrap_or_else(|| self.root.derive());

        // Attach the derived context to the request.
        let context = context.build();
        request.extensions_mut().insert(context);

        // Proceed to the wrapped service and handle the request.
        self.service.call(request)
    }
}

/// Wrap an [`App`](actix_web::App) with a middleware that derives per-request contexts.
///
/// This middleware performs no authentication: requests are handled with no
/// principal attached.
/// Processes that resolve identities wrap their own middleware around an
/// authentication backend instead.
pub struct ContextMiddleware {
    root: Context,
}

impl ContextMiddleware {
    /// Initialise a [`ContextMiddleware`] with a root [`Context`] to use as a fallback.
    pub fn new(context: Context) -> Self {
        Self { root: context }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ContextMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
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
            root: self.root.clone(),
            service,
        };
        std::future::ready(Ok(middleware))
    }
}
