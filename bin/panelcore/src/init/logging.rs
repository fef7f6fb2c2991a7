//! Root logger initialisation from the process configuration.
use std::io::stdout;
use std::sync::Mutex;

use slog::Drain;
use slog::IgnoreResult;
use slog::Logger;
use slog::Never;
use slog::SendSyncRefUnwindSafeDrain;
use slog::SendSyncUnwindSafeDrain;
use slog_async::Async;
use slog_json::Json;

use panelcore_conf::LogLevel;
use panelcore_conf::LoggingConf;

/// Creates a [`Logger`] based on the given configuration.
pub fn configure(conf: &LoggingConf) -> Logger {
    let level = severity(conf.level);
    let drain = Mutex::new(Json::default(stdout())).map(IgnoreResult::new);
    let drain = slog::LevelFilter::new(drain, level).map(IgnoreResult::new);
    match conf.flush_async {
        true => into_logger(Async::new(drain).build().ignore_res()),
        false => into_logger(drain),
    }
}

/// Converts a [`Drain`] into a [`Logger`] setting global tags.
fn into_logger<D>(drain: D) -> Logger
where
    D: SendSyncUnwindSafeDrain<Ok = (), Err = Never>,
    D: 'static + SendSyncRefUnwindSafeDrain<Err = Never, Ok = ()>,
{
    Logger::root(drain, slog::o!("version" => env!("CARGO_PKG_VERSION")))
}

/// Map the configured severity onto [`slog`] levels.
fn severity(level: LogLevel) -> slog::Level {
    match level {
        LogLevel::Debug => slog::Level::Debug,
        LogLevel::Info => slog::Level::Info,
        LogLevel::Warning => slog::Level::Warning,
        LogLevel::Error => slog::Level::Error,
    }
}
