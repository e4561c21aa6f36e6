//! The server registry and multi-database dispatch.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::Arc,
};

use dict_types::{
    command::Command,
    core::{DatabaseName, ALL_DATABASES, FIRST_MATCH},
    definition::Definition,
    error::ValidationError,
};
use futures::future::BoxFuture;
use thiserror::Error;

use crate::{
    backend::Backend,
    handlers,
    session::{Flow, Session, SessionError},
};

/// A command handler. Handlers run sequentially on their session; at most
/// one is in flight per connection.
pub type Handler =
    for<'a> fn(&'a mut Session, Command) -> BoxFuture<'a, Result<Flow, SessionError>>;

/// An error during `!`/`*`/literal dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The named database isn't registered. The reserved tokens `!` and
    /// `*` never produce this; for them an unmatched query is just empty.
    #[error("Invalid database")]
    InvalidDatabase,
}

/// Process-long server state: the registered databases, the known matching
/// strategies, and the command handlers.
///
/// All registration happens at startup, before the accept loop; afterwards
/// the registries are only read, so sessions can share the server behind a
/// plain [`Arc`].
pub struct Server {
    name: String,
    info: String,
    databases: BTreeMap<DatabaseName, Arc<dyn Backend>>,
    strategies: BTreeMap<String, String>,
    handlers: HashMap<String, Handler>,
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Server")
            .field("name", &self.name)
            .field("databases", &self.databases.keys().collect::<Vec<_>>())
            .field("strategies", &self.strategies.keys().collect::<Vec<_>>())
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Server {
    /// Create a server with the default handler set.
    pub fn new(name: &str, info: &str) -> Self {
        let mut server = Self {
            name: name.to_string(),
            info: info.to_string(),
            databases: BTreeMap::new(),
            strategies: BTreeMap::new(),
            handlers: HashMap::new(),
        };

        for (verb, handler) in handlers::defaults() {
            server.register_handler(verb, handler);
        }

        server
    }

    /// Server name, as it appears in the banner and in msg-ids.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form text shown by `SHOW SERVER`.
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Register `backend` under `name` and adopt its strategies into the
    /// strategy registry. The reserved dispatch tokens `!` and `*` are
    /// rejected. Registering an existing name replaces the old backend.
    pub fn register_database(
        &mut self,
        name: &str,
        backend: Arc<dyn Backend>,
    ) -> Result<(), ValidationError> {
        let name = DatabaseName::try_from(name)?;

        for (strategy, description) in backend.strategies(name.as_str()) {
            self.strategies.entry(strategy).or_insert(description);
        }

        self.databases.insert(name, backend);

        Ok(())
    }

    /// Register a strategy description, e.g. for a strategy a driver adds
    /// on top of what the backends advertise.
    pub fn register_strategy(&mut self, name: &str, description: &str) {
        self.strategies
            .insert(name.to_string(), description.to_string());
    }

    /// Bind `handler` to the (case-insensitive) `verb`.
    pub fn register_handler(&mut self, verb: &str, handler: Handler) {
        self.handlers.insert(verb.to_ascii_uppercase(), handler);
    }

    /// Handler for `verb`, if one is registered.
    pub fn handler(&self, verb: &str) -> Option<Handler> {
        self.handlers.get(verb).copied()
    }

    /// Backend registered under `name`.
    pub fn database(&self, name: &str) -> Option<Arc<dyn Backend>> {
        self.databases.get(name).cloned()
    }

    /// Registered databases, ascending by name. This is also the iteration
    /// order of `!` and `*` dispatch.
    pub fn databases(&self) -> impl Iterator<Item = (&str, &Arc<dyn Backend>)> {
        self.databases
            .iter()
            .map(|(name, backend)| (name.as_str(), backend))
    }

    /// One-line description of the database registered under `name`.
    pub fn describe(&self, name: &str) -> Option<String> {
        self.databases
            .get(name)
            .map(|backend| backend.description(name))
    }

    /// Known strategies with their descriptions, ascending by name.
    pub fn strategies(&self) -> &BTreeMap<String, String> {
        &self.strategies
    }

    /// Look `word` up in `database`, which may be a registered name, `!`
    /// (first database with a result) or `*` (all databases).
    pub async fn define(
        &self,
        database: &str,
        word: &str,
    ) -> Result<Vec<Definition>, DispatchError> {
        let word = word.to_lowercase();

        match database {
            FIRST_MATCH => {
                for (name, backend) in &self.databases {
                    let definitions = backend.define(name.as_str(), &word).await;

                    if !definitions.is_empty() {
                        return Ok(definitions);
                    }
                }

                Ok(Vec::new())
            }
            ALL_DATABASES => {
                let mut all = Vec::new();

                for (name, backend) in &self.databases {
                    all.extend(backend.define(name.as_str(), &word).await);
                }

                Ok(all)
            }
            _ => {
                let backend = self
                    .database(database)
                    .ok_or(DispatchError::InvalidDatabase)?;

                Ok(backend.define(database, &word).await)
            }
        }
    }

    /// Find match candidates for `word` under `strategy`, with the same
    /// database dispatch as [`Server::define`].
    pub async fn matches(
        &self,
        database: &str,
        word: &str,
        strategy: &str,
    ) -> Result<Vec<Definition>, DispatchError> {
        let word = word.to_lowercase();

        match database {
            FIRST_MATCH => {
                for (name, backend) in &self.databases {
                    let candidates = backend.matches(name.as_str(), &word, strategy).await;

                    if !candidates.is_empty() {
                        return Ok(candidates);
                    }
                }

                Ok(Vec::new())
            }
            ALL_DATABASES => {
                let mut all = Vec::new();

                for (name, backend) in &self.databases {
                    all.extend(backend.matches(name.as_str(), &word, strategy).await);
                }

                Ok(all)
            }
            _ => {
                let backend = self
                    .database(database)
                    .ok_or(DispatchError::InvalidDatabase)?;

                Ok(backend.matches(database, &word, strategy).await)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;

    use super::*;

    /// A backend with a fixed word list.
    #[derive(Debug)]
    struct StaticBackend {
        words: Vec<&'static str>,
    }

    impl StaticBackend {
        fn new(words: &[&'static str]) -> Arc<dyn Backend> {
            Arc::new(Self {
                words: words.to_vec(),
            })
        }
    }

    #[async_trait]
    impl Backend for StaticBackend {
        async fn define(&self, name: &str, word: &str) -> Vec<Definition> {
            self.words
                .iter()
                .filter(|known| **known == word)
                .map(|known| Definition::new(*known, format!("{known} per {name}"), name))
                .collect()
        }

        async fn matches(&self, name: &str, word: &str, _strategy: &str) -> Vec<Definition> {
            self.words
                .iter()
                .filter(|known| **known == word)
                .map(|known| Definition::candidate(*known, name))
                .collect()
        }

        fn info(&self, _name: &str) -> String {
            "static word list".to_string()
        }

        fn description(&self, name: &str) -> String {
            format!("static backend {name}")
        }

        fn strategies(&self, _name: &str) -> BTreeMap<String, String> {
            [("exact".to_string(), "Match headwords exactly".to_string())]
                .into_iter()
                .collect()
        }
    }

    fn server() -> Server {
        let mut server = Server::new("test", "test server");
        server
            .register_database("beta", StaticBackend::new(&["shared", "late"]))
            .unwrap();
        server
            .register_database("alpha", StaticBackend::new(&["shared", "early"]))
            .unwrap();
        server
    }

    #[tokio::test]
    async fn test_define_literal_name() {
        let server = server();

        let defs = server.define("alpha", "early").await.unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].source, "alpha");

        // Words are folded to lowercase before delegation.
        assert_eq!(server.define("alpha", "EARLY").await.unwrap(), defs);
    }

    #[tokio::test]
    async fn test_define_unknown_literal_name() {
        let server = server();

        assert_eq!(
            server.define("nope", "shared").await,
            Err(DispatchError::InvalidDatabase)
        );
    }

    #[tokio::test]
    async fn test_define_first_match_short_circuits() {
        let server = server();

        // Both databases know "shared"; `!` stops at the first, and
        // iteration is ascending by name.
        let defs = server.define("!", "shared").await.unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].source, "alpha");

        // A word only the second database knows is still found.
        let defs = server.define("!", "late").await.unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].source, "beta");
    }

    #[tokio::test]
    async fn test_define_all_concatenates() {
        let server = server();

        let defs = server.define("*", "shared").await.unwrap();
        let sources: Vec<_> = defs.iter().map(|def| def.source.as_str()).collect();
        assert_eq!(sources, ["alpha", "beta"]);

        assert!(server.define("*", "nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_matches_dispatch() {
        let server = server();

        let candidates = server.matches("!", "shared", "exact").await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source, "alpha");

        let candidates = server.matches("*", "shared", "exact").await.unwrap();
        assert_eq!(candidates.len(), 2);

        assert_eq!(
            server.matches("nope", "shared", "exact").await,
            Err(DispatchError::InvalidDatabase)
        );
    }

    #[test]
    fn test_reserved_names_are_rejected() {
        let mut server = Server::new("test", "");

        assert!(server
            .register_database("!", StaticBackend::new(&[]))
            .is_err());
        assert!(server
            .register_database("*", StaticBackend::new(&[]))
            .is_err());
        assert!(server
            .register_database("two words", StaticBackend::new(&[]))
            .is_err());
    }

    #[test]
    fn test_registration_adopts_backend_strategies() {
        let server = server();

        assert_eq!(
            server.strategies().get("exact").map(String::as_str),
            Some("Match headwords exactly")
        );
    }

    #[test]
    fn test_default_handlers_are_registered() {
        let server = Server::new("test", "");

        for verb in ["CLIENT", "DEFINE", "MATCH", "SHOW", "OPTION", "QUIT"] {
            assert!(server.handler(verb).is_some(), "missing handler: {verb}");
        }

        assert!(server.handler("AUTH").is_none());
    }
}
