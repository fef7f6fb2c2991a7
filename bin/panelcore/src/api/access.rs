//! Panel endpoint reporting the caller's effective access to a resource.
//!
//! Admin pages call this before rendering management views so disabled
//! operations can be hidden up front.
//! The report exercises the same gate checks the mutating endpoints perform,
//! so what the page shows and what the API allows cannot drift apart.
use std::collections::HashMap;

use actix_web::web::Data;
use actix_web::web::Path;
use actix_web::HttpResponse;
use once_cell::sync::Lazy;

use panelcore_auth::ResourceAccess;
use panelcore_context::Context;
use panelcore_injector::Injector;

/// Access declarations for the panel resources, indexed by resource kind.
static RESOURCES: Lazy<HashMap<&'static str, ResourceAccess>> = Lazy::new(resources);

/// Declare the protected panel resources and the permission key guarding each.
fn resources() -> HashMap<&'static str, ResourceAccess> {
    let kinds = ["users", "posts", "groups", "pages", "forums", "jobs", "funding"];
    let mut resources = HashMap::new();
    for kind in kinds {
        let key = format!("manage-{}", kind);
        resources.insert(kind, ResourceAccess::new(kind).with_permission(key));
    }
    resources
}

/// Report the caller's effective access to a protected panel resource.
#[actix_web::get("/v1/panel/access/{resource}")]
pub async fn report(
    context: Context,
    injector: Data<Injector>,
    path: Path<String>,
) -> HttpResponse {
    let kind = path.into_inner();
    let resource = match RESOURCES.get(kind.as_str()) {
        Some(resource) => resource,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": true,
                "error_msg": format!("panel resource '{}' not recognised", kind),
            }));
        }
    };

    let gate = &injector.gate;
    let report = serde_json::json!({
        "resource": resource.kind,
        "access": gate.can_access(&context, resource),
        "create": gate.can_create(&context, resource),
        "delete": gate.can_delete(&context, resource, &()),
        "delete_any": gate.can_delete_any(&context, resource),
        "edit": gate.can_edit(&context, resource, &()),
        "view": gate.can_view(&context, resource, &()),
    });
    HttpResponse::Ok().json(report)
}
