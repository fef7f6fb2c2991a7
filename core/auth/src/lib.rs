//! Authentication and Authorisation data and interfaces for the Panelcore back-office.
//!
//! First of all:
//!
//! - Authentication: answers "who is asking for access?" (it is about identity).
//! - Authorisation: answers "can they do what they are asking to do?" (it is about access).
//!
//! Authorisation is modelled on the platform's admin panel: every protected
//! resource declares a [`ResourceAccess`] descriptor (resource kind plus at
//! most one permission key) and every operation against it is checked through
//! the [`AccessGate`](crate::access::AccessGate) before it proceeds.
//!
//! ## Super admins
//!
//! A [`Principal`] flagged as super admin is granted access unconditionally,
//! before any permission key is looked at.
//! This keeps the original "admin flag" model working for resources that
//! never declared a permission key while the granular permission system is
//! layered on top for everything else.
pub mod access;
pub mod identity;

// Re-export model definitions for convenience.
pub use panelcore_models::auth::Principal;
pub use panelcore_models::auth::ResourceAccess;
