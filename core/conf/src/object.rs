//! Data object storing panelcore's configuration.
use serde::Deserialize;
use serde::Serialize;

use panelcore_models::auth::Principal;

/// Global configuration for the Panelcore process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conf {
    /// Panel administrators and the permissions granted to them.
    #[serde(default)]
    pub admins: Vec<Principal>,

    /// Legacy API bridge configuration.
    pub bridge: BridgeConf,

    /// HTTP Server configuration.
    #[serde(default)]
    pub http: HttpConf,

    /// Process logging configuration.
    #[serde(default)]
    pub logging: LoggingConf,

    /// Session store service configuration.
    pub sessions: BackendConf,
}

/// Unstructured configuration for runtime selected service backends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConf {
    /// ID of the backend selected to provide the service.
    pub backend: String,

    /// Backend specific configuration options.
    #[serde(default, flatten)]
    pub options: serde_json::Value,
}

/// Configuration of the legacy-to-modern API bridge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BridgeConf {
    /// Base address of the modern API server legacy calls are forwarded to.
    pub modern_address: String,
}

/// HTTP Server configuration options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HttpConf {
    /// Address the HTTP server binds to.
    #[serde(default = "HttpConf::default_bind")]
    pub bind: String,
}

impl HttpConf {
    fn default_bind() -> String {
        "localhost:8000".to_string()
    }
}

impl Default for HttpConf {
    fn default() -> Self {
        HttpConf {
            bind: HttpConf::default_bind(),
        }
    }
}

/// Process logging configuration options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConf {
    /// Flush log records to the drain asynchronously.
    #[serde(default = "LoggingConf::default_flush_async")]
    pub flush_async: bool,

    /// Severity level below which log records are discarded.
    #[serde(default)]
    pub level: LogLevel,
}

impl LoggingConf {
    fn default_flush_async() -> bool {
        true
    }
}

impl Default for LoggingConf {
    fn default() -> Self {
        LoggingConf {
            flush_async: LoggingConf::default_flush_async(),
            level: LogLevel::default(),
        }
    }
}

/// Supported logging severity levels.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::Conf;
    use super::LogLevel;

    const MINIMAL: &str = r#"
bridge:
  modern_address: "http://api.internal:8080"
sessions:
  backend: memory
"#;

    #[test]
    fn decode_minimal_conf() {
        let conf: Conf = serde_yaml::from_str(MINIMAL).unwrap();
        assert_eq!(conf.bridge.modern_address, "http://api.internal:8080");
        assert_eq!(conf.sessions.backend, "memory");
        assert_eq!(conf.http.bind, "localhost:8000");
        assert_eq!(conf.logging.level, LogLevel::Info);
        assert!(conf.logging.flush_async);
        assert!(conf.admins.is_empty());
    }

    #[test]
    fn decode_backend_options_flatten() {
        let conf: Conf = serde_yaml::from_str(
            r#"
bridge:
  modern_address: "http://api.internal:8080"
sessions:
  backend: memory
  sessions:
    abc123: "7"
"#,
        )
        .unwrap();
        let sessions = conf.sessions.options.get("sessions").unwrap();
        assert_eq!(sessions.get("abc123").unwrap(), "7");
    }
}
