//! Decoding of command lines.
//!
//! A command line is a sequence of tokens separated by whitespace. A token
//! may be enclosed in matching `"` or `'` quotes; inside quotes whitespace
//! is literal and `\` escapes the quote characters and itself:
//!
//! ```text
//! DEFINE jargon foo
//! MATCH ! prefix "two words"
//! CLIENT 'it\'s a client'
//! ```
//!
//! The first token, upper-cased, is the verb; the rest are parameters.

use dict_types::command::Command;
use nom::{
    branch::alt,
    bytes::complete::{escaped, take_while1},
    character::complete::{char, multispace0, one_of},
    combinator::{map, opt},
    multi::many0,
    sequence::{delimited, preceded},
    IResult,
};
use thiserror::Error;

/// An error during command-line decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The line contained no tokens.
    #[error("Empty command line")]
    Empty,
    /// The line could not be tokenized, e.g. an unterminated quote.
    #[error("Malformed command line")]
    Failed,
}

fn is_bare_char(ch: char) -> bool {
    !ch.is_whitespace() && ch != '"' && ch != '\''
}

/// A run of non-whitespace, non-quote characters.
fn bare(input: &str) -> IResult<&str, String> {
    map(take_while1(is_bare_char), str::to_owned)(input)
}

/// A token enclosed in `quote`, with `\` escaping. May be empty.
fn quoted(quote: char) -> impl FnMut(&str) -> IResult<&str, String> {
    move |input| {
        map(
            delimited(
                char(quote),
                opt(escaped(
                    take_while1(move |ch| ch != '\\' && ch != quote),
                    '\\',
                    one_of("\\\"'"),
                )),
                char(quote),
            ),
            |content: Option<&str>| unescape(content.unwrap_or_default()),
        )(input)
    }
}

fn unescape(content: &str) -> String {
    let mut unescaped = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            // `escaped` guarantees a character follows.
            if let Some(escaped) = chars.next() {
                unescaped.push(escaped);
            }
        } else {
            unescaped.push(ch);
        }
    }

    unescaped
}

fn token(input: &str) -> IResult<&str, String> {
    alt((quoted('"'), quoted('\''), bare))(input)
}

/// Split one line (without its terminator) into tokens.
pub fn tokenize(line: &str) -> Result<Vec<String>, DecodeError> {
    let (rest, tokens) =
        many0(preceded(multispace0::<&str, _>, token))(line).map_err(|_| DecodeError::Failed)?;

    if !rest.trim_start().is_empty() {
        return Err(DecodeError::Failed);
    }

    if tokens.is_empty() {
        return Err(DecodeError::Empty);
    }

    Ok(tokens)
}

/// Parse one line into a [`Command`].
pub fn command(line: &str) -> Result<Command, DecodeError> {
    let mut tokens = tokenize(line)?.into_iter();
    let verb = tokens.next().ok_or(DecodeError::Empty)?;

    Ok(Command::new(verb, tokens.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let tests = [
            ("ONE", vec!["ONE"]),
            ("ONE TWO", vec!["ONE", "TWO"]),
            ("ONE FISH TWO FISH RED FISH BLUE FISH", vec![
                "ONE", "FISH", "TWO", "FISH", "RED", "FISH", "BLUE", "FISH",
            ]),
            ("  padded   out  ", vec!["padded", "out"]),
            ("tab\tseparated", vec!["tab", "separated"]),
        ];

        for (line, expected) in tests {
            assert_eq!(tokenize(line).unwrap(), expected, "line: {line:?}");
        }
    }

    #[test]
    fn test_tokenize_simple_round_trips() {
        // Joining simple tokens with a space and tokenizing again is the
        // identity.
        let tests = [
            vec!["DEFINE", "jargon", "foo"],
            vec!["MATCH", "*", "prefix", "fo"],
            vec!["a"],
            vec!["lots", "of", "plain", "tokens", "in", "a", "row"],
        ];

        for tokens in tests {
            let line = tokens.join(" ");
            assert_eq!(tokenize(&line).unwrap(), tokens);
        }
    }

    #[test]
    fn test_tokenize_double_quotes() {
        let tokens = tokenize(r#"ONE "FISH TWO FISH" RED FISH BLUE FISH"#).unwrap();

        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[1], "FISH TWO FISH");
    }

    #[test]
    fn test_tokenize_double_quote_escape() {
        let tokens = tokenize(r#"ONE "FISH \"TWO FISH" RED FISH BLUE FISH"#).unwrap();

        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[1], "FISH \"TWO FISH");
    }

    #[test]
    fn test_tokenize_single_quote_escape() {
        let tokens = tokenize(r"ONE 'FISH \'TWO FISH' RED FISH BLUE FISH").unwrap();

        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[1], "FISH 'TWO FISH");
    }

    #[test]
    fn test_tokenize_mixed_quotes() {
        // A double quote is an ordinary character inside single quotes, and
        // vice versa.
        assert_eq!(tokenize(r#"'a "b" c'"#).unwrap(), [r#"a "b" c"#]);
        assert_eq!(tokenize(r#""it's""#).unwrap(), ["it's"]);
        assert_eq!(tokenize(r#""""#).unwrap(), [""]);
    }

    #[test]
    fn test_tokenize_empty_line() {
        assert_eq!(tokenize(""), Err(DecodeError::Empty));
        assert_eq!(tokenize("   \t "), Err(DecodeError::Empty));
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        assert_eq!(tokenize(r#"DEFINE "jargon"#), Err(DecodeError::Failed));
        assert_eq!(tokenize("MATCH 'oops"), Err(DecodeError::Failed));
    }

    #[test]
    fn test_command() {
        let command = command("define jargon foo").unwrap();

        assert_eq!(command.verb, "DEFINE");
        assert_eq!(command.params, ["jargon", "foo"]);
    }

    #[test]
    fn test_command_quoted_param() {
        let command = command(r#"MATCH ! prefix "two words""#).unwrap();

        assert_eq!(command.verb, "MATCH");
        assert_eq!(command.params, ["!", "prefix", "two words"]);
    }
}
