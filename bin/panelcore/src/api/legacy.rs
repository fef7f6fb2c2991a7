//! The legacy flat-parameter API endpoint.
//!
//! External integrators call `/requests` with either GET query parameters or
//! a POST form body; both encodings decode into the same flat parameter map.
use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::web::Form;
use actix_web::web::Query;
use actix_web::HttpResponse;

use panelcore_bridge::LegacyReply;
use panelcore_bridge::LegacyRequest;
use panelcore_context::Context;
use panelcore_injector::Injector;

/// Handle a legacy API call sent as GET query parameters.
#[actix_web::get("/requests")]
pub async fn query(
    context: Context,
    injector: Data<Injector>,
    params: Query<HashMap<String, String>>,
) -> HttpResponse {
    handle(&context, &injector, params.into_inner()).await
}

/// Handle a legacy API call sent as a POST form body.
#[actix_web::post("/requests")]
pub async fn form(
    context: Context,
    injector: Data<Injector>,
    params: Form<HashMap<String, String>>,
) -> HttpResponse {
    handle(&context, &injector, params.into_inner()).await
}

/// Decode the flat parameters and render the bridge's reply.
async fn handle(
    context: &Context,
    injector: &Injector,
    params: HashMap<String, String>,
) -> HttpResponse {
    let request = LegacyRequest::from_params(params);
    match injector.bridge.handle(context, &request).await {
        Ok(LegacyReply::Forwarded(response)) => {
            let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK);
            HttpResponse::build(status).json(response.body)
        }
        Ok(LegacyReply::Error(error)) => HttpResponse::BadRequest().json(error.envelope()),
        Err(error) => {
            slog::error!(
                context.logger, "Unable to forward legacy API call";
                "error" => %error,
            );
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": true,
                "error_msg": error.to_string(),
            }))
        }
    }
}
