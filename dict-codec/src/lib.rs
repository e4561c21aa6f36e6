#![deny(missing_debug_implementations)]
//! Codec for the DICT protocol ([RFC 2229]).
//!
//! The read side parses CRLF-terminated command lines into
//! [`Command`](dict_types::command::Command)s, honoring the RFC's quoting
//! rules. The write side encodes [`Reply`](dict_types::reply::Reply)s and
//! the session [`Greeting`](dict_types::reply::Greeting): status lines,
//! continuation lines, and dot-terminated text blocks with dot-stuffing and
//! the optional MIME prelude.
//!
//! With the `tokio` feature, [`tokio::DictServerCodec`] plugs both sides
//! into a [`tokio_util::codec::Framed`] transport.
//!
//! [RFC 2229]: https://datatracker.ietf.org/doc/html/rfc2229

pub mod decode;
pub mod encode;
#[cfg(feature = "tokio")]
pub mod tokio;

pub use dict_types;
