#![deny(missing_debug_implementations)]
//! A DICT protocol ([RFC 2229]) dictionary server.
//!
//! The pieces, bottom up:
//!
//! * [`backend`]: the [`Backend`](backend::Backend) contract every
//!   dictionary satisfies, the sled-backed
//!   [`KvBackend`](backend::kv::KvBackend) with its per-strategy indexes,
//!   and the trivial [`EchoBackend`](backend::echo::EchoBackend).
//! * [`server`]: the process-long [`Server`](server::Server) holding the
//!   registered databases, strategies, and command handlers, with the
//!   `!`/`*`/literal multi-database dispatch.
//! * [`session`]: the per-connection [`Session`](session::Session) state
//!   machine running the read/dispatch loop over a framed transport.
//! * [`handlers`]: the DEFINE/MATCH/SHOW/OPTION/CLIENT/QUIT verbs.
//! * [`jargon`] and [`config`]: the jargon-file format parsed by the
//!   offline loader, and the TOML configuration consumed by the `dictd`
//!   binary.
//!
//! [RFC 2229]: https://datatracker.ietf.org/doc/html/rfc2229

pub mod backend;
pub mod config;
pub mod handlers;
pub mod jargon;
pub mod server;
pub mod session;
