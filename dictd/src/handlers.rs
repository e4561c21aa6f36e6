//! Protocol handlers for the core verbs.
//!
//! Every handler owns its full exchange: it writes the status lines and
//! text blocks for one command and says whether the session keeps going.
//! Arity problems answer `501`, unknown names `550`, empty results `552`;
//! none of them end the session.

use dict_types::{
    command::Command,
    reply::code,
};
use futures::future::BoxFuture;
use log::debug;

use crate::{
    server::{DispatchError, Handler},
    session::{Flow, Session, SessionError},
};

/// The default verb table.
pub fn defaults() -> [(&'static str, Handler); 6] {
    [
        ("CLIENT", client as Handler),
        ("DEFINE", define as Handler),
        ("MATCH", matches as Handler),
        ("SHOW", show as Handler),
        ("OPTION", option as Handler),
        ("QUIT", quit as Handler),
    ]
}

/// `500 unknown command`, the sink for unregistered verbs and lines that
/// didn't parse.
pub fn unknown(session: &mut Session, command: Command) -> BoxFuture<'_, Result<Flow, SessionError>> {
    Box::pin(async move {
        debug!("unknown command: {}", command.verb);
        session.status(code::UNKNOWN_COMMAND, "unknown command").await?;

        Ok(Flow::Continue)
    })
}

async fn illegal_parameters(session: &mut Session) -> Result<Flow, SessionError> {
    session
        .status(code::ILLEGAL_PARAMETERS, "syntax error, illegal parameters")
        .await?;

    Ok(Flow::Continue)
}

/// `CLIENT <identifier>`: record what the client says it is.
pub fn client(session: &mut Session, command: Command) -> BoxFuture<'_, Result<Flow, SessionError>> {
    Box::pin(async move {
        session.set_client(command.params.join(" "));
        session.status(code::OK, "ok").await?;

        Ok(Flow::Continue)
    })
}

/// `DEFINE <database> <word>`
pub fn define(session: &mut Session, command: Command) -> BoxFuture<'_, Result<Flow, SessionError>> {
    Box::pin(async move {
        if command.params.len() < 2 {
            return illegal_parameters(session).await;
        }

        let database = &command.params[0];
        let word = &command.params[1];
        let server = session.server();

        let definitions = match server.define(database, word).await {
            Ok(definitions) => definitions,
            Err(DispatchError::InvalidDatabase) => {
                session.status(code::INVALID_DATABASE, "invalid database").await?;

                return Ok(Flow::Continue);
            }
        };

        if definitions.is_empty() {
            session.status(code::NO_MATCH, "no match").await?;

            return Ok(Flow::Continue);
        }

        session
            .status(
                code::DEFINITIONS_FOLLOW,
                format!("{} definitions", definitions.len()),
            )
            .await?;

        for definition in &definitions {
            let description = server.describe(&definition.source).unwrap_or_default();

            session
                .status(
                    code::DEFINITION_FOLLOWS,
                    format!(
                        "\"{}\" {} \"{}\"",
                        definition.word, definition.source, description
                    ),
                )
                .await?;
            session.text_block(&definition.text).await?;
        }

        session.status(code::OK, "ok").await?;

        Ok(Flow::Continue)
    })
}

/// `MATCH <database> <strategy> <word>`
pub fn matches(session: &mut Session, command: Command) -> BoxFuture<'_, Result<Flow, SessionError>> {
    Box::pin(async move {
        if command.params.len() < 3 {
            return illegal_parameters(session).await;
        }

        let database = &command.params[0];
        let strategy = command.params[1].to_lowercase();
        let word = &command.params[2];
        let server = session.server();

        let candidates = match server.matches(database, word, &strategy).await {
            Ok(candidates) => candidates,
            Err(DispatchError::InvalidDatabase) => {
                session.status(code::INVALID_DATABASE, "invalid database").await?;

                return Ok(Flow::Continue);
            }
        };

        if candidates.is_empty() {
            session.status(code::NO_MATCH, "no match").await?;

            return Ok(Flow::Continue);
        }

        session
            .status(
                code::MATCHES_FOUND,
                format!("{} matches found", candidates.len()),
            )
            .await?;

        let listing = candidates
            .iter()
            .map(|candidate| format!("{} \"{}\"", candidate.source, candidate.word))
            .collect::<Vec<_>>()
            .join("\r\n");
        session.text_block(&listing).await?;

        session.status(code::OK, "ok").await?;

        Ok(Flow::Continue)
    })
}

/// `SHOW DB|DATABASES|STRAT|STRATEGIES|INFO <db>|SERVER`
pub fn show(session: &mut Session, command: Command) -> BoxFuture<'_, Result<Flow, SessionError>> {
    Box::pin(async move {
        let Some(topic) = command.param(0) else {
            return illegal_parameters(session).await;
        };

        match topic.to_ascii_uppercase().as_str() {
            "DB" | "DATABASES" => {
                let server = session.server();
                let entries: Vec<String> = server
                    .databases()
                    .map(|(name, backend)| format!("{} \"{}\"", name, backend.description(name)))
                    .collect();

                session
                    .status(
                        code::DATABASES_PRESENT,
                        format!("{} databases present", entries.len()),
                    )
                    .await?;
                session.text_block(&entries.join("\r\n")).await?;
                session.status(code::OK, "ok").await?;
            }
            "STRAT" | "STRATEGIES" => {
                let server = session.server();
                let entries: Vec<String> = server
                    .strategies()
                    .iter()
                    .map(|(name, description)| format!("{name} \"{description}\""))
                    .collect();

                session
                    .status(code::STRATEGIES_PRESENT, format!("{} present", entries.len()))
                    .await?;
                session.text_block(&entries.join("\r\n")).await?;
                session.status(code::OK, "ok").await?;
            }
            "INFO" => {
                let Some(name) = command.param(1) else {
                    return illegal_parameters(session).await;
                };

                let Some(backend) = session.server().database(name) else {
                    session.status(code::INVALID_DATABASE, "invalid database").await?;

                    return Ok(Flow::Continue);
                };

                session
                    .status(code::DATABASE_INFO, format!("information for {name}"))
                    .await?;
                session.text_block(&backend.info(name)).await?;
                session.status(code::OK, "ok").await?;
            }
            "SERVER" => {
                let server = session.server();

                session.status(code::SERVER_INFO, "server information").await?;
                session.text_block(server.info()).await?;
                session.status(code::OK, "ok").await?;
            }
            _ => return illegal_parameters(session).await,
        }

        Ok(Flow::Continue)
    })
}

/// `OPTION MIME`: flip the only negotiable option.
pub fn option(session: &mut Session, command: Command) -> BoxFuture<'_, Result<Flow, SessionError>> {
    Box::pin(async move {
        let Some(name) = command.param(0) else {
            return illegal_parameters(session).await;
        };

        match name.to_ascii_uppercase().as_str() {
            "MIME" => {
                if session.toggle_mime() {
                    session.status(code::OK, "ok - mime enabled").await?;
                } else {
                    session.status(code::OK, "ok - no mime").await?;
                }
            }
            _ => {
                session.status(code::UNKNOWN_COMMAND, "unknown command").await?;
            }
        }

        Ok(Flow::Continue)
    })
}

/// `QUIT`
pub fn quit(session: &mut Session, _command: Command) -> BoxFuture<'_, Result<Flow, SessionError>> {
    Box::pin(async move {
        session.status(code::BYE, "bye").await?;

        Ok(Flow::Quit)
    })
}
