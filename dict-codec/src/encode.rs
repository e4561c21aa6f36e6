//! Encoding of replies.
//!
//! Everything the server says is a CRLF-terminated line. Status lines and
//! continuation lines encode to exactly one line; a text block encodes to
//! its content lines (dot-stuffed where needed) followed by a line holding
//! a single `.`:
//!
//! ```rust
//! use dict_codec::encode::{Encoder, ReplyCodec};
//! use dict_types::reply::Reply;
//!
//! let reply = Reply::text("foo is a word", false);
//!
//! assert_eq!(
//!     ReplyCodec::default().encode(&reply),
//!     b"foo is a word\r\n.\r\n",
//! );
//! ```

use dict_types::reply::{Greeting, Reply};

/// MIME prelude emitted at the start of a text block when the session's
/// MIME option is on.
const MIME_PRELUDE: &str =
    "Content-type: text/plain; charset=utf-8\r\nContent-transfer-encoding: 8bit\r\n\r\n";

/// Encoder.
///
/// Implemented for types that know how to encode a specific DICT message.
pub trait Encoder {
    type Message<'a>;

    /// Encode this message, terminators included.
    fn encode(&self, message: Self::Message<'_>) -> Vec<u8>;
}

/// Encoder for the `220` banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreetingCodec;

impl Encoder for GreetingCodec {
    type Message<'a> = &'a Greeting;

    fn encode(&self, greeting: &Greeting) -> Vec<u8> {
        format!(
            "220 {} <{}> <{}>\r\n",
            greeting.server,
            greeting.capabilities.join("."),
            greeting.msg_id,
        )
        .into_bytes()
    }
}

/// Encoder for [`Reply`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplyCodec;

impl Encoder for ReplyCodec {
    type Message<'a> = &'a Reply;

    fn encode(&self, reply: &Reply) -> Vec<u8> {
        let mut out = Vec::new();

        match reply {
            Reply::Status { code, message } => {
                out.extend_from_slice(format!("{code} {message}\r\n").as_bytes());
            }
            Reply::Line(line) => {
                out.extend_from_slice(line.as_bytes());
                out.extend_from_slice(b"\r\n");
            }
            Reply::Text { body, mime } => {
                if *mime {
                    out.extend_from_slice(MIME_PRELUDE.as_bytes());
                }

                for line in body.lines() {
                    // Dot-stuffing: a content line starting with `.` gets
                    // the `.` doubled so it can't terminate the block.
                    if line.as_bytes().first() == Some(&b'.') {
                        out.push(b'.');
                    }

                    out.extend_from_slice(line.as_bytes());
                    out.extend_from_slice(b"\r\n");
                }

                out.extend_from_slice(b".\r\n");
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(reply: &Reply) -> String {
        String::from_utf8(ReplyCodec::default().encode(reply)).unwrap()
    }

    #[test]
    fn test_encode_status_line() {
        let reply = Reply::status(250, "ok");

        assert_eq!(encoded(&reply), "250 ok\r\n");
    }

    #[test]
    fn test_encode_continuation_line() {
        let reply = Reply::line("jargon \"The Jargon File\"");

        assert_eq!(encoded(&reply), "jargon \"The Jargon File\"\r\n");
    }

    #[test]
    fn test_encode_text_block() {
        let tests = [
            ("foo is a word", "foo is a word\r\n.\r\n"),
            ("two\r\nlines", "two\r\nlines\r\n.\r\n"),
            // Bare LF terminators are normalized to CRLF.
            ("two\nlines\n", "two\r\nlines\r\n.\r\n"),
            ("", ".\r\n"),
        ];

        for (body, expected) in tests {
            assert_eq!(encoded(&Reply::text(body, false)), expected, "body: {body:?}");
        }
    }

    #[test]
    fn test_encode_text_block_dot_stuffing() {
        let reply = Reply::text(".hidden\r\n..twice\r\nplain", false);

        assert_eq!(encoded(&reply), "..hidden\r\n...twice\r\nplain\r\n.\r\n");
    }

    #[test]
    fn test_encode_text_block_mime_prelude() {
        let reply = Reply::text("body", true);

        assert_eq!(
            encoded(&reply),
            "Content-type: text/plain; charset=utf-8\r\n\
             Content-transfer-encoding: 8bit\r\n\
             \r\n\
             body\r\n.\r\n",
        );
    }

    #[test]
    fn test_encode_greeting() {
        let greeting = Greeting {
            server: "dictd".into(),
            capabilities: vec!["mime".into()],
            msg_id: "17.42@dictd".into(),
        };

        assert_eq!(
            String::from_utf8(GreetingCodec::default().encode(&greeting)).unwrap(),
            "220 dictd <mime> <17.42@dictd>\r\n",
        );
    }
}
