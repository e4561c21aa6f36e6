//! Tokio support.
//!
//! [`DictServerCodec`] implements [`tokio_util::codec::Decoder`] and
//! [`tokio_util::codec::Encoder`], so a connection can be wrapped in a
//! [`tokio_util::codec::Framed`] and driven with `StreamExt`/`SinkExt`.

use std::io::Error as IoError;

use bytes::{Buf, BytesMut};
use dict_types::{
    command::Command,
    reply::{Greeting, Reply},
};
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};

use crate::{
    decode::{self, DecodeError},
    encode::{Encoder as _, GreetingCodec, ReplyCodec},
};

/// Longest line we are willing to buffer before giving up on finding a
/// terminator.
const MAX_LINE_LENGTH: usize = 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    #[error("Expected `\\r\\n`, got `\\n`")]
    NotCrLf,
    #[error("Could not find a line searching a maximum of {max_line_length} bytes")]
    LineTooLarge { max_line_length: usize },
}

#[derive(Debug, Error)]
pub enum DictServerCodecError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Framing(#[from] FramingError),
}

impl PartialEq for DictServerCodecError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Io(error1), Self::Io(error2)) => error1.kind() == error2.kind(),
            (Self::Framing(kind1), Self::Framing(kind2)) => kind1 == kind2,
            _ => false,
        }
    }
}

/// Something that happened on the read side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A complete, parseable command line.
    Command(Command),
    /// A complete line that did not parse: empty, an unterminated quote,
    /// or not valid UTF-8. The session decides how to answer.
    Invalid(DecodeError),
}

/// Count the bytes needed to cover the next `\n` in `buf`, inclusive.
///
/// Returns `Ok(length)` with `buf[..length]` being the first line including
/// its `\r\n`, or `Err(length)` when the line ended in a bare `\n`.
fn find_crlf_inclusive(buf: &[u8]) -> Option<Result<usize, usize>> {
    #[allow(clippy::manual_map)]
    match buf.iter().position(|item| *item == b'\n') {
        Some(position) => {
            #[cfg(not(feature = "quirk_crlf_relaxed"))]
            if position > 0 && buf[position - 1] == b'\r' {
                Some(Ok(position + 1))
            } else {
                Some(Err(position + 1))
            }
            #[cfg(feature = "quirk_crlf_relaxed")]
            Some(Ok(position + 1))
        }
        None => None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DictServerCodec;

impl Decoder for DictServerCodec {
    type Item = Event;
    type Error = DictServerCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match find_crlf_inclusive(src) {
            Some(Ok(length)) => {
                let line = src.split_to(length);
                // Strip the `\r\n` (or the `\n` with `quirk_crlf_relaxed`).
                let line = &line[..length - terminator_length(&line)];

                let event = match std::str::from_utf8(line) {
                    Ok(text) => match decode::command(text) {
                        Ok(command) => Event::Command(command),
                        Err(error) => Event::Invalid(error),
                    },
                    Err(_) => Event::Invalid(DecodeError::Failed),
                };

                Ok(Some(event))
            }
            Some(Err(length)) => {
                log::warn!("line of {length} bytes ended in a bare LF");
                src.advance(length);

                Err(FramingError::NotCrLf.into())
            }
            None if src.len() > MAX_LINE_LENGTH => Err(FramingError::LineTooLarge {
                max_line_length: MAX_LINE_LENGTH,
            }
            .into()),
            None => Ok(None),
        }
    }
}

fn terminator_length(line: &[u8]) -> usize {
    if line.ends_with(b"\r\n") {
        2
    } else {
        1
    }
}

impl Encoder<&Reply> for DictServerCodec {
    type Error = DictServerCodecError;

    fn encode(&mut self, reply: &Reply, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.extend_from_slice(&ReplyCodec::default().encode(reply));

        Ok(())
    }
}

impl Encoder<&Greeting> for DictServerCodec {
    type Error = DictServerCodecError;

    fn encode(&mut self, greeting: &Greeting, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.extend_from_slice(&GreetingCodec::default().encode(greeting));

        Ok(())
    }
}
