//! Panelcore configuration object and helpers.
mod loading;
mod object;

pub use self::loading::load;
pub use self::loading::Error;
pub use self::object::BackendConf;
pub use self::object::BridgeConf;
pub use self::object::Conf;
pub use self::object::HttpConf;
pub use self::object::LoggingConf;
pub use self::object::LogLevel;
