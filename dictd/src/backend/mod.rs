//! Dictionary backends.

pub mod echo;
pub mod kv;
pub mod phonetic;

use std::{collections::BTreeMap, fmt::Debug};

use async_trait::async_trait;
use dict_types::definition::Definition;
use thiserror::Error;

/// An error from a backend's storage layer.
///
/// Only the write path (the offline loader) ever sees these; on the read
/// path a backend degrades to an empty result and logs, so a DEFINE or
/// MATCH can never take a session down.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Storage(#[from] sled::Error),
}

/// The capability set every dictionary backend exposes.
///
/// The registered name is passed to each call so a backend can stamp it
/// into the definitions it returns; one backend value may be registered
/// under several names. Backends are invoked concurrently from multiple
/// sessions and must not rely on outside serialization.
#[async_trait]
pub trait Backend: Debug + Send + Sync {
    /// Look up `word`, already folded to lowercase by the server. An empty
    /// result means "no match".
    async fn define(&self, name: &str, word: &str) -> Vec<Definition>;

    /// Find candidate headwords for `word` under `strategy`. Candidates
    /// carry no bodies. An unknown strategy yields an empty result.
    async fn matches(&self, name: &str, word: &str, strategy: &str) -> Vec<Definition>;

    /// Multiline text for `SHOW INFO`.
    fn info(&self, name: &str) -> String;

    /// One-line description for `SHOW DB`.
    fn description(&self, name: &str) -> String;

    /// The matching strategies this backend supports, with human-readable
    /// descriptions. May be empty.
    fn strategies(&self, name: &str) -> BTreeMap<String, String>;
}
