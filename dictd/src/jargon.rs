//! The jargon text format.
//!
//! A line starting with `:WORD:DEFINITION` opens a record; every following
//! line up to the next record continues the body, joined with CRLF:
//!
//! ```text
//! :foo:foo is a word
//! :bar:bar is another word
//! with a second line
//! ```
//!
//! The offline loader feeds the parsed records into a
//! [`KvBackend`](crate::backend::kv::KvBackend).

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Parse jargon-format records from `reader`.
///
/// Words and the first body line are trimmed; continuation lines are kept
/// verbatim. Anything before the first record is discarded.
pub fn parse<R>(reader: R) -> io::Result<Vec<(String, String)>>
where
    R: BufRead,
{
    let mut records = Vec::new();
    let mut word: Option<String> = None;
    let mut body = String::new();

    for line in reader.lines() {
        let line = line?;

        if let Some(rest) = line.strip_prefix(':') {
            if let Some((head, tail)) = rest.split_once(':') {
                if let Some(word) = word.take() {
                    records.push((word, std::mem::take(&mut body)));
                }

                word = Some(head.trim().to_string());
                body = tail.trim().to_string();
                continue;
            }
        }

        body.push_str("\r\n");
        body.push_str(&line);
    }

    if let Some(word) = word {
        records.push((word, body));
    }

    Ok(records)
}

/// Parse the jargon file at `path`.
pub fn parse_file<P>(path: P) -> io::Result<Vec<(String, String)>>
where
    P: AsRef<Path>,
{
    parse(BufReader::new(File::open(path)?))
}
