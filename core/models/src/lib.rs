//! Data models shared across the Panelcore admin back-office Control Plane.
pub mod auth;
