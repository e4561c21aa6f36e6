//! A backend that answers every query with the query itself.

use std::collections::BTreeMap;

use async_trait::async_trait;
use dict_types::definition::Definition;

use super::Backend;

/// Echoes every word back at you. Handy as a smoke-test database and as a
/// fixture in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoBackend;

#[async_trait]
impl Backend for EchoBackend {
    async fn define(&self, name: &str, word: &str) -> Vec<Definition> {
        vec![Definition::new(word, word, name)]
    }

    async fn matches(&self, name: &str, word: &str, _strategy: &str) -> Vec<Definition> {
        vec![Definition::candidate(word, name)]
    }

    fn info(&self, _name: &str) -> String {
        "Echoes every word straight back.\n\nEvery DEFINE succeeds and every MATCH returns the query, whatever the strategy.".to_string()
    }

    fn description(&self, _name: &str) -> String {
        "echo test database".to_string()
    }

    fn strategies(&self, _name: &str) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}
