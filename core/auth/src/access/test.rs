use panelcore_context::Context;

use super::AccessGate;
use super::AccessPolicy;
use super::DefaultingPolicy;
use super::Forbidden;
use super::PermissionSetPolicy;
use crate::Principal;
use crate::ResourceAccess;

/// Test policy to allow all requests.
struct AllowAll;

impl AccessPolicy for AllowAll {
    fn evaluate(&self, _: Option<&Principal>, _: &ResourceAccess) -> bool {
        true
    }
}

/// Test policy to deny all requests.
struct DenyAll;

impl AccessPolicy for DenyAll {
    fn evaluate(&self, _: Option<&Principal>, _: &ResourceAccess) -> bool {
        false
    }
}

fn admin(super_admin: bool, permissions: &[&str]) -> Principal {
    Principal {
        user: "7".to_string(),
        super_admin,
        permissions: permissions.iter().map(|key| key.to_string()).collect(),
    }
}

fn authenticated(principal: Principal) -> Context {
    Context::fixture().derive().authenticated(principal).build()
}

fn keyed_resource() -> ResourceAccess {
    ResourceAccess::new("users").with_permission("manage-users")
}

fn keyless_resource() -> ResourceAccess {
    ResourceAccess::new("settings")
}

#[test]
fn super_admin_bypasses_policy() {
    let gate = AccessGate::wrap(DenyAll);
    let context = authenticated(admin(true, &[]));
    assert!(gate.can_access(&context, &keyed_resource()));
}

#[test]
fn super_admin_bypasses_missing_key() {
    // The bypass must short-circuit before any key lookup so it holds
    // even for resources with no permission key declared.
    let gate = AccessGate::default();
    let context = authenticated(admin(true, &[]));
    assert!(gate.can_access(&context, &keyless_resource()));
}

#[test]
fn unauthenticated_denied() {
    let gate = AccessGate::default();
    let context = Context::fixture();
    assert!(!gate.can_access(&context, &keyed_resource()));
    assert!(!gate.can_access(&context, &keyless_resource()));
}

#[test]
fn missing_key_fails_closed() {
    let gate = AccessGate::default();
    let context = authenticated(admin(false, &["manage-users"]));
    assert!(!gate.can_access(&context, &keyless_resource()));
}

#[test]
fn granted_key_allows() {
    let gate = AccessGate::default();
    let context = authenticated(admin(false, &["manage-users", "manage-posts"]));
    assert!(gate.can_access(&context, &keyed_resource()));
}

#[test]
fn ungranted_key_denies() {
    let gate = AccessGate::default();
    let context = authenticated(admin(false, &["manage-posts"]));
    assert!(!gate.can_access(&context, &keyed_resource()));
}

#[test]
fn derived_operations_match_can_access() {
    let gate = AccessGate::default();
    let resource = keyed_resource();
    let contexts = [
        Context::fixture(),
        authenticated(admin(false, &[])),
        authenticated(admin(false, &["manage-users"])),
        authenticated(admin(true, &[])),
    ];
    for context in &contexts {
        let expected = gate.can_access(context, &resource);
        assert_eq!(gate.can_create(context, &resource), expected);
        assert_eq!(gate.can_delete_any(context, &resource), expected);
        assert_eq!(gate.can_delete(context, &resource, &1u64), expected);
        assert_eq!(gate.can_edit(context, &resource, "record"), expected);
        assert_eq!(gate.can_view(context, &resource, &()), expected);
    }
}

#[test]
fn record_argument_ignored() {
    let gate = AccessGate::default();
    let resource = keyed_resource();
    let context = authenticated(admin(false, &["manage-users"]));
    assert_eq!(
        gate.can_edit(&context, &resource, &1u64),
        gate.can_edit(&context, &resource, &2u64),
    );
    assert_eq!(
        gate.can_delete(&context, &resource, "mine"),
        gate.can_delete(&context, &resource, "theirs"),
    );
}

#[test]
fn repeated_evaluation_is_stable() {
    let gate = AccessGate::default();
    let resource = keyed_resource();
    let context = authenticated(admin(false, &["manage-users"]));
    let first = gate.can_access(&context, &resource);
    let second = gate.can_access(&context, &resource);
    assert_eq!(first, second);
}

#[test]
fn forbidden_denial_message() {
    let error = Forbidden::deny("7", "delete", "posts");
    assert_eq!(
        error.to_string(),
        "entity \"7\" is not allowed to perform \"delete\" on resource \"posts\"",
    );
}

#[cfg(feature = "actix-web")]
#[test]
fn forbidden_renders_403() {
    use actix_web::ResponseError;
    let error = Forbidden::deny("7", "delete", "posts");
    assert_eq!(error.status_code(), actix_web::http::StatusCode::FORBIDDEN);
}

#[test]
fn defaulting_policy_defers_missing_keys() {
    let gate = AccessGate::wrap(DefaultingPolicy::with_base(AllowAll));
    let context = authenticated(admin(false, &[]));
    assert!(gate.can_access(&context, &keyless_resource()));
    // Declared keys are still checked against the granted set.
    assert!(!gate.can_access(&context, &keyed_resource()));
}

#[test]
fn defaulting_policy_with_closed_base() {
    let gate = AccessGate::wrap(DefaultingPolicy::with_base(PermissionSetPolicy));
    let context = authenticated(admin(false, &["manage-users"]));
    assert!(!gate.can_access(&context, &keyless_resource()));
    assert!(gate.can_access(&context, &keyed_resource()));
}
