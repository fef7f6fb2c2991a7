//! API related tools (such as middlewares) and endpoints.
use actix_web::web::Data;
use actix_web::web::ServiceConfig;

use panelcore_injector::Injector;

pub mod access;
pub mod context;
pub mod legacy;

/// Configure an HTTP Server with all endpoints in this API module.
pub fn configure(config: &mut ServiceConfig) {
    let injector = Injector::global();
    config
        .app_data(Data::new(injector))
        .service(self::access::report)
        .service(self::legacy::form)
        .service(self::legacy::query);
}
