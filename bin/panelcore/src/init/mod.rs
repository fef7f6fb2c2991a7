//! Initialisation logic for Panelcore processes.
mod actix;
mod backends;
mod generic;
mod logging;
mod server;

pub use self::backends::Backends;
pub use self::generic::GenericInit;
pub use self::server::Server;
