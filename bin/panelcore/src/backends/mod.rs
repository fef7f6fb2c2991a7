//! Backend implementations bundled with the panelcore process.
pub mod identity;
pub mod memory;
