//! Definitions.

/// A single definition (or match candidate) produced by a backend.
///
/// A definition remembers the registered name of the database that produced
/// it, so that a response writer can look the database up again, e.g. for
/// the description in a `151` header. The association is by name only; no
/// backend handle is embedded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Definition {
    /// Backend-canonical form of the defined word.
    pub word: String,
    /// Definition body. Empty for match candidates.
    pub text: String,
    /// Registered name of the database that produced this definition.
    pub source: String,
}

impl Definition {
    pub fn new<W, T, S>(word: W, text: T, source: S) -> Self
    where
        W: Into<String>,
        T: Into<String>,
        S: Into<String>,
    {
        Self {
            word: word.into(),
            text: text.into(),
            source: source.into(),
        }
    }

    /// A match candidate: a headword without a body.
    pub fn candidate<W, S>(word: W, source: S) -> Self
    where
        W: Into<String>,
        S: Into<String>,
    {
        Self::new(word, "", source)
    }
}
