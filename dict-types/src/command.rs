//! Client commands.
//!
//! See <https://datatracker.ietf.org/doc/html/rfc2229#section-2.3>.

/// A single client request, as produced by the command-line parser.
///
/// Verbs are matched case-insensitively on the wire, so the verb is
/// upper-cased on construction. Parameters keep the case the client sent;
/// whether they are case-sensitive is up to the consumer (the server folds
/// words to lowercase before handing them to a backend).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    /// Upper-cased verb, e.g. `DEFINE`.
    pub verb: String,
    /// Remaining tokens of the command line, in order.
    pub params: Vec<String>,
}

impl Command {
    /// Create a new command. The verb is upper-cased.
    pub fn new<V>(verb: V, params: Vec<String>) -> Self
    where
        V: AsRef<str>,
    {
        Self {
            verb: verb.as_ref().to_ascii_uppercase(),
            params,
        }
    }

    /// Parameter at `index`, if present.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }
}
