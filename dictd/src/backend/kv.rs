//! The indexed key-value backend.
//!
//! One sled tree is partitioned into several logical indexes by a
//! namespace prefix: a key is `namespace LF term`, where the separator is
//! a literal newline, an octet that can never appear inside a command
//! token, so it can't collide with a term.
//!
//! The empty namespace holds definition bodies. Named namespaces hold
//! posting lists: LF-joined, de-duplicated lists of the headwords that
//! share an index key. A word written through [`KvBackend::put_definition`]
//! is indexed under every strategy the backend supports, so `MATCH` is a
//! point read (or a range scan) rather than a search.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use dict_types::definition::Definition;
use log::warn;

use super::{phonetic, Backend, BackendError};

/// Namespace/term separator.
const SEPARATOR: u8 = b'\n';

/// Namespace of the anagram posting lists.
const NS_ANAGRAM: &str = "anagram";
/// Namespace of the soundex posting lists.
const NS_SOUNDEX: &str = "soundex";
/// Namespace of the metaphone posting lists.
const NS_METAPHONE: &str = "metaphone";

/// Edit-distance cutoff for the levenshtein strategy.
const LEVENSHTEIN_THRESHOLD: usize = 1;

/// A dictionary served from an ordered key-value store.
#[derive(Debug)]
pub struct KvBackend {
    db: sled::Db,
    description: String,
    info: String,
}

impl KvBackend {
    /// Open (or create) the store at `path`.
    pub fn open<P>(path: P, description: &str) -> Result<Self, BackendError>
    where
        P: AsRef<Path>,
    {
        let db = sled::open(path)?;

        Ok(Self {
            db,
            description: description.to_string(),
            info: description.to_string(),
        })
    }

    /// Replace the `SHOW INFO` text, which defaults to the description.
    pub fn with_info(mut self, info: &str) -> Self {
        self.info = info.to_string();
        self
    }

    fn key(namespace: &str, term: &str) -> Vec<u8> {
        let mut key = Vec::with_capacity(namespace.len() + 1 + term.len());
        key.extend_from_slice(namespace.as_bytes());
        key.push(SEPARATOR);
        key.extend_from_slice(term.as_bytes());
        key
    }

    /// Store `text` as the definition of `word` and index the word under
    /// every supported strategy.
    pub fn put_definition(&self, word: &str, text: &str) -> Result<(), BackendError> {
        let word = word.to_lowercase();

        self.db.insert(Self::key("", &word), text.as_bytes())?;

        self.index(NS_ANAGRAM, &anagram_key(&word), &word)?;
        self.index(NS_SOUNDEX, &phonetic::soundex(&word), &word)?;

        if word.len() > 2 {
            for token in phonetic::metaphone(&word).split_whitespace() {
                self.index(NS_METAPHONE, token, &word)?;
            }
        }

        Ok(())
    }

    /// Flush dirty buffers to disk.
    pub fn flush(&self) -> Result<(), BackendError> {
        self.db.flush()?;

        Ok(())
    }

    /// Append `word` to the posting list at `namespace`/`term`.
    ///
    /// Read-modify-write with dedup, so indexing the same word twice is
    /// idempotent.
    fn index(&self, namespace: &str, term: &str, word: &str) -> Result<(), BackendError> {
        if term.is_empty() {
            return Ok(());
        }

        let key = Self::key(namespace, term);
        let mut words = match self.db.get(&key)? {
            Some(list) => postings(&list),
            None => Vec::new(),
        };

        if words.iter().any(|known| known == word) {
            return Ok(());
        }

        words.push(word.to_string());
        self.db.insert(key, words.join("\n").into_bytes())?;

        Ok(())
    }

    /// Read the posting list at `namespace`/`term`. Storage errors degrade
    /// to an empty result.
    fn posting(&self, namespace: &str, term: &str) -> Vec<String> {
        match self.db.get(Self::key(namespace, term)) {
            Ok(Some(list)) => postings(&list),
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!("posting list {namespace}/{term} unreadable: {error}");
                Vec::new()
            }
        }
    }

    /// Headwords starting with `query`, in store (byte) order.
    fn scan_prefix(&self, query: &str) -> Vec<String> {
        self.db
            .scan_prefix(Self::key("", query))
            .filter_map(|entry| match entry {
                Ok((key, _)) => headword(&key),
                Err(error) => {
                    warn!("prefix scan failed: {error}");
                    None
                }
            })
            .collect()
    }

    /// Headwords within edit distance [`LEVENSHTEIN_THRESHOLD`] of
    /// `query`, ordered by distance, then alphabetically.
    fn scan_levenshtein(&self, query: &str) -> Vec<String> {
        let mut hits: Vec<(usize, String)> = self
            .db
            .scan_prefix([SEPARATOR])
            .filter_map(|entry| match entry {
                Ok((key, _)) => headword(&key),
                Err(error) => {
                    warn!("store scan failed: {error}");
                    None
                }
            })
            .filter_map(|word| {
                let distance = strsim::levenshtein(query, &word);
                (distance <= LEVENSHTEIN_THRESHOLD).then_some((distance, word))
            })
            .collect();

        hits.sort();
        hits.into_iter().map(|(_, word)| word).collect()
    }

    /// Union of the posting lists of every metaphone token of `query`,
    /// de-duplicated, first-seen order.
    fn scan_metaphone(&self, query: &str) -> Vec<String> {
        let mut words: Vec<String> = Vec::new();

        for token in phonetic::metaphone(query).split_whitespace() {
            for word in self.posting(NS_METAPHONE, token) {
                if !words.contains(&word) {
                    words.push(word);
                }
            }
        }

        words
    }
}

/// Split a posting list into words, dropping empties.
fn postings(list: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(list)
        .split('\n')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip the empty-namespace prefix off a definition key.
fn headword(key: &[u8]) -> Option<String> {
    let term = key.strip_prefix(&[SEPARATOR])?;

    String::from_utf8(term.to_vec()).ok()
}

/// Characters of `word`, sorted ascending: the shared key of all its
/// anagrams.
fn anagram_key(word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

#[async_trait]
impl Backend for KvBackend {
    async fn define(&self, name: &str, word: &str) -> Vec<Definition> {
        let word = word.to_lowercase();

        match self.db.get(Self::key("", &word)) {
            Ok(Some(text)) => {
                vec![Definition::new(
                    word,
                    String::from_utf8_lossy(&text),
                    name,
                )]
            }
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!("definition lookup for {word:?} failed: {error}");
                Vec::new()
            }
        }
    }

    async fn matches(&self, name: &str, word: &str, strategy: &str) -> Vec<Definition> {
        let word = word.to_lowercase();

        let words = match strategy {
            "prefix" => self.scan_prefix(&word),
            "soundex" => self.posting(NS_SOUNDEX, &phonetic::soundex(&word)),
            "anagram" => self.posting(NS_ANAGRAM, &anagram_key(&word)),
            "metaphone" => self.scan_metaphone(&word),
            "levenshtein" => self.scan_levenshtein(&word),
            _ => Vec::new(),
        };

        words
            .into_iter()
            .map(|word| Definition::candidate(word, name))
            .collect()
    }

    fn info(&self, _name: &str) -> String {
        self.info.clone()
    }

    fn description(&self, _name: &str) -> String {
        self.description.clone()
    }

    fn strategies(&self, _name: &str) -> BTreeMap<String, String> {
        [
            ("prefix", "Match prefixes"),
            ("soundex", "Match using SOUNDEX algorithm"),
            ("metaphone", "Match using the metaphone algorithm"),
            ("anagram", "Match anagrams of the headword"),
            ("levenshtein", "Match headwords within Levenshtein distance one"),
        ]
        .into_iter()
        .map(|(name, description)| (name.to_string(), description.to_string()))
        .collect()
    }
}
