#![deny(missing_debug_implementations)]
//! Data structures for the DICT protocol ([RFC 2229]).
//!
//! This crate contains the values exchanged between a DICT server and its
//! backends: client [`Command`](command::Command)s, server
//! [`Reply`](reply::Reply)s, and [`Definition`](definition::Definition)s.
//! It performs no I/O; parsing and encoding live in `dict-codec`.
//!
//! [RFC 2229]: https://datatracker.ietf.org/doc/html/rfc2229

pub mod command;
pub mod core;
pub mod definition;
pub mod error;
pub mod reply;
