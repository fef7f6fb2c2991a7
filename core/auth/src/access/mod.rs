//! Module to deal with the Authorisation (what can be done) side of Auth.
use std::sync::Arc;

use panelcore_context::Context;

use crate::Principal;
use crate::ResourceAccess;

#[cfg(test)]
mod test;

/// Operations implemented by Authorisation policies supported by Panelcore.
///
/// Policies are stateless decision functions: they are evaluated fresh on
/// every call, never fail and never cache results.
/// Absence of a principal, absence of a permission key and absence of a
/// matching permission are all folded into `false`.
///
/// Policies only see requests for principals without the super admin flag:
/// the [`AccessGate`] grants super admins access before consulting the policy.
pub trait AccessPolicy: Send + Sync {
    /// Decide if the principal may operate on the protected resource.
    fn evaluate(&self, principal: Option<&Principal>, resource: &ResourceAccess) -> bool;
}

/// Verify permissions for a requesting principal to operate on a panel resource.
///
/// ## Super admin bypass
///
/// Principals flagged as super admin are granted access unconditionally.
/// The bypass is evaluated first, before any permission key is looked up,
/// so it remains correct even for resources with no key declared.
///
/// ## Resource-class access
///
/// Access is granted or denied for a resource class as a whole.
/// The derived operations accept the record under inspection where panel
/// pages pass one, but the argument is always ignored: row-level rules are
/// for callers to layer on separately.
#[derive(Clone)]
pub struct AccessGate {
    /// Authorisation policy consulted for non super admin principals.
    inner: Arc<dyn AccessPolicy>,
}

impl AccessGate {
    /// Decide if the requesting principal may access the resource at all.
    pub fn can_access(&self, context: &Context, resource: &ResourceAccess) -> bool {
        let principal = context.principal.as_ref();
        let bypass = principal.map(|principal| principal.super_admin).unwrap_or(false);
        let decision = bypass || self.inner.evaluate(principal, resource);
        self.audit(context, resource, decision, bypass);
        decision
    }

    /// Decide if the requesting principal may create records for the resource.
    pub fn can_create(&self, context: &Context, resource: &ResourceAccess) -> bool {
        self.can_access(context, resource)
    }

    /// Decide if the requesting principal may delete the given record.
    pub fn can_delete<R: ?Sized>(
        &self,
        context: &Context,
        resource: &ResourceAccess,
        _record: &R,
    ) -> bool {
        self.can_access(context, resource)
    }

    /// Decide if the requesting principal may bulk-delete records for the resource.
    pub fn can_delete_any(&self, context: &Context, resource: &ResourceAccess) -> bool {
        self.can_access(context, resource)
    }

    /// Decide if the requesting principal may edit the given record.
    pub fn can_edit<R: ?Sized>(
        &self,
        context: &Context,
        resource: &ResourceAccess,
        _record: &R,
    ) -> bool {
        self.can_access(context, resource)
    }

    /// Decide if the requesting principal may view the given record.
    pub fn can_view<R: ?Sized>(
        &self,
        context: &Context,
        resource: &ResourceAccess,
        _record: &R,
    ) -> bool {
        self.can_access(context, resource)
    }

    /// Wrap an [`AccessPolicy`] interface for use by the system.
    pub fn wrap<T>(inner: T) -> Self
    where
        T: AccessPolicy + 'static,
    {
        let inner = Arc::new(inner);
        AccessGate { inner }
    }
}

impl AccessGate {
    /// Log an authorisation decision for operators to troubleshoot access problems.
    fn audit(&self, context: &Context, resource: &ResourceAccess, decision: bool, bypass: bool) {
        let entity = context
            .principal
            .as_ref()
            .map(|principal| principal.user.as_str())
            .unwrap_or("anonymous");
        slog::debug!(
            context.logger, "Access gate decision";
            "audit" => true,
            "decision" => if decision { "allow" } else { "deny" },
            "entity" => entity,
            "resource" => &resource.kind,
            "super_admin_bypass" => bypass,
        );
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        AccessGate::wrap(PermissionSetPolicy)
    }
}

/// Authorise access by permission key membership, failing closed.
///
/// - No authenticated principal: deny.
/// - Resource with no declared permission key: deny (such resources are
///   implicitly super-admin only).
/// - Otherwise: allow iff the declared key is in the principal's granted set.
pub struct PermissionSetPolicy;

impl AccessPolicy for PermissionSetPolicy {
    fn evaluate(&self, principal: Option<&Principal>, resource: &ResourceAccess) -> bool {
        let principal = match principal {
            Some(principal) => principal,
            None => return false,
        };
        match resource.permission_key.as_deref() {
            Some(key) => principal.grants(key),
            None => false,
        }
    }
}

/// Authorise by permission key membership, deferring undeclared keys to a base policy.
///
/// Resources that declare a permission key behave exactly as with
/// [`PermissionSetPolicy`].
/// Resources with no key declared are decided by the wrapped base policy
/// instead of failing closed.
pub struct DefaultingPolicy {
    /// Policy consulted for resources with no declared permission key.
    base: Arc<dyn AccessPolicy>,
}

impl DefaultingPolicy {
    /// Defer resources with no declared permission key to the given base policy.
    pub fn with_base<T>(base: T) -> Self
    where
        T: AccessPolicy + 'static,
    {
        let base = Arc::new(base);
        DefaultingPolicy { base }
    }
}

impl AccessPolicy for DefaultingPolicy {
    fn evaluate(&self, principal: Option<&Principal>, resource: &ResourceAccess) -> bool {
        match resource.permission_key {
            Some(_) => PermissionSetPolicy.evaluate(principal, resource),
            None => self.base.evaluate(principal, resource),
        }
    }
}

/// A principal is not allowed to perform an action on a resource.
///
/// The [`AccessGate`] itself only ever returns booleans: this error exists
/// for callers that surface denials to users (for example as an HTTP 403).
#[derive(Debug, thiserror::Error)]
#[error("entity \"{entity}\" is not allowed to perform \"{action}\" on resource \"{resource}\"")]
pub struct Forbidden {
    action: String,
    entity: String,
    resource: String,
}

impl Forbidden {
    /// Deny an entity from performing an action onto a resource.
    pub fn deny<S1, S2, S3>(entity: S1, action: S2, resource: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            action: action.into(),
            entity: entity.into(),
            resource: resource.into(),
        }
    }
}

#[cfg(feature = "actix-web")]
impl actix_web::ResponseError for Forbidden {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::FORBIDDEN
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::Forbidden().json(serde_json::json!({
            "error": true,
            "error_msg": self.to_string(),
        }))
    }
}
