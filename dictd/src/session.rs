//! Per-connection session state.
//!
//! A driver accepts a connection, wraps it in a [`Session`] and calls
//! [`Session::run`], which sends the `220` banner and then loops: read a
//! line, parse it, dispatch to the registered handler, repeat. The session
//! ends on `QUIT`, on EOF, or on the first connection error.

use std::{
    fmt,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use dict_codec::tokio::{DictServerCodec, DictServerCodecError, Event};
use dict_types::reply::{code, Greeting, Reply};
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;

use crate::{handlers, server::Server};

/// The byte-duplex transport a session runs on.
pub trait Connection: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T> Connection for T where T: AsyncRead + AsyncWrite + Send + Unpin {}

/// A fatal session error. Everything recoverable is answered on the wire
/// instead; this ends the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Codec(#[from] DictServerCodecError),
}

/// Whether the session keeps serving after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One client connection.
pub struct Session {
    msg_id: String,
    client: String,
    mime: bool,
    server: Arc<Server>,
    framed: Framed<Box<dyn Connection>, DictServerCodec>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Session")
            .field("msg_id", &self.msg_id)
            .field("client", &self.client)
            .field("mime", &self.mime)
            .finish()
    }
}

impl Session {
    pub fn new<C>(server: Arc<Server>, connection: C) -> Self
    where
        C: Connection + 'static,
    {
        Self {
            msg_id: msg_id(server.name()),
            client: String::new(),
            mime: false,
            server,
            framed: Framed::new(Box::new(connection), DictServerCodec),
        }
    }

    /// The session's msg-id, as sent in the banner.
    pub fn msg_id(&self) -> &str {
        &self.msg_id
    }

    /// The shared server this session serves from.
    pub fn server(&self) -> Arc<Server> {
        self.server.clone()
    }

    /// Record the identifier a `CLIENT` command announced.
    pub fn set_client(&mut self, client: String) {
        self.client = client;
    }

    /// Flip the MIME option, returning the new state.
    pub fn toggle_mime(&mut self) -> bool {
        self.mime = !self.mime;
        self.mime
    }

    /// Send one reply.
    pub async fn reply(&mut self, reply: Reply) -> Result<(), SessionError> {
        Ok(self.framed.send(&reply).await?)
    }

    /// Send a `<code> <message>` status line.
    pub async fn status<M>(&mut self, code: u16, message: M) -> Result<(), SessionError>
    where
        M: Into<String>,
    {
        self.reply(Reply::status(code, message)).await
    }

    /// Send a dot-terminated text block, with the MIME prelude when the
    /// session has MIME switched on.
    pub async fn text_block(&mut self, body: &str) -> Result<(), SessionError> {
        self.reply(Reply::text(body, self.mime)).await
    }

    async fn greet(&mut self) -> Result<(), SessionError> {
        let greeting = Greeting {
            server: self.server.name().to_string(),
            capabilities: vec!["mime".to_string()],
            msg_id: self.msg_id.clone(),
        };

        Ok(self.framed.send(&greeting).await?)
    }

    /// Serve the connection until QUIT, EOF, or a connection error.
    pub async fn run(mut self) -> Result<(), SessionError> {
        info!("session {}: connected", self.msg_id);

        self.greet().await?;

        while let Some(event) = self.framed.next().await {
            let flow = match event? {
                Event::Invalid(error) => {
                    warn!("session {}: bad command line: {error}", self.msg_id);
                    self.status(code::UNKNOWN_COMMAND, "unknown command")
                        .await?;

                    Flow::Continue
                }
                Event::Command(command) => {
                    debug!("session {}: {}", self.msg_id, command.verb);

                    match self.server.handler(&command.verb) {
                        Some(handler) => handler(&mut self, command).await?,
                        None => handlers::unknown(&mut self, command).await?,
                    }
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        info!("session {}: closed", self.msg_id);

        Ok(())
    }
}

/// A msg-id unique to this session: wall clock, process id, server name.
fn msg_id(server_name: &str) -> String {
    let clock = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();

    format!("{}.{}@{}", clock, std::process::id(), server_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_id_shape() {
        let msg_id = msg_id("wordserv");

        let (clock, rest) = msg_id.split_once('.').unwrap();
        let (pid, name) = rest.split_once('@').unwrap();

        assert!(clock.chars().all(|ch| ch.is_ascii_digit()));
        assert!(pid.chars().all(|ch| ch.is_ascii_digit()));
        assert_eq!(name, "wordserv");
    }
}
