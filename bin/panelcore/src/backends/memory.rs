//! In-memory session store backend seeded from configuration.
//!
//! Intended for development instances and demos: sessions are fixed for the
//! lifetime of the process and shared with no external system.
use std::collections::HashMap;

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value as Json;

use panelcore_context::Context;
use panelcore_sessions::SessionLookup;
use panelcore_sessions::SessionStore;
use panelcore_sessions::SessionStoreFactory;
use panelcore_sessions::SessionStoreFactoryArgs;
use panelcore_sessions::Sessions;

/// Configuration options for the in-memory session store.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MemorySessionsConf {
    /// Session hashes and the platform user each one belongs to.
    #[serde(default)]
    pub sessions: HashMap<String, String>,
}

/// Session store resolving hashes against a fixed in-memory map.
pub struct MemorySessions {
    sessions: HashMap<String, String>,
}

#[async_trait::async_trait]
impl SessionStore for MemorySessions {
    async fn lookup(&self, _: &Context, hash: &str) -> Result<SessionLookup> {
        let lookup = match self.sessions.get(hash) {
            Some(user) => SessionLookup::Found(user.clone()),
            None => SessionLookup::NotFound,
        };
        Ok(lookup)
    }
}

/// Initialisation logic for the in-memory session store.
#[derive(Debug)]
pub struct MemorySessionsFactory;

#[async_trait::async_trait]
impl SessionStoreFactory for MemorySessionsFactory {
    fn conf_check(&self, _: &Context, conf: &Json) -> Result<()> {
        serde_json::from_value::<MemorySessionsConf>(conf.clone())?;
        Ok(())
    }

    fn register_metrics(&self, _: &prometheus::Registry) -> Result<()> {
        Ok(())
    }

    async fn session_store<'a>(&self, args: SessionStoreFactoryArgs<'a>) -> Result<Sessions> {
        let conf: MemorySessionsConf = serde_json::from_value(args.conf.clone())?;
        slog::debug!(
            args.context.logger, "Seeded in-memory session store";
            "sessions" => conf.sessions.len(),
        );
        let store = MemorySessions {
            sessions: conf.sessions,
        };
        Ok(Sessions::from(store))
    }
}

#[cfg(test)]
mod tests {
    use panelcore_context::Context;
    use panelcore_sessions::SessionLookup;
    use panelcore_sessions::SessionStoreFactory;
    use panelcore_sessions::SessionStoreFactoryArgs;

    use super::MemorySessionsFactory;

    #[tokio::test]
    async fn lookup_seeded_sessions() {
        let context = Context::fixture();
        let conf = serde_json::json!({
            "sessions": {"abc123": "7"},
        });
        let sessions = MemorySessionsFactory
            .session_store(SessionStoreFactoryArgs {
                conf: &conf,
                context: &context,
            })
            .await
            .unwrap();

        let lookup = sessions.lookup(&context, "abc123").await.unwrap();
        assert_eq!(lookup, SessionLookup::Found("7".to_string()));
        let lookup = sessions.lookup(&context, "missing").await.unwrap();
        assert_eq!(lookup, SessionLookup::NotFound);
    }

    #[test]
    fn conf_check_rejects_malformed_options() {
        let context = Context::fixture();
        let conf = serde_json::json!({"sessions": ["not", "a", "map"]});
        assert!(MemorySessionsFactory.conf_check(&context, &conf).is_err());
    }

    #[test]
    fn conf_check_accepts_empty_options() {
        let context = Context::fixture();
        let conf = serde_json::json!({});
        assert!(MemorySessionsFactory.conf_check(&context, &conf).is_ok());
    }
}
