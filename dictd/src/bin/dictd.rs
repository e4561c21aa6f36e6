//! The server binary: load the configuration, register the dictionaries,
//! then serve one session per accepted connection.

use std::sync::Arc;

use anyhow::{Context, Result};
use dictd::{backend::kv::KvBackend, config::Config, server::Server, session::Session};
use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("USAGE: dictd <config.toml>")?;
    let config = Config::load(&path).with_context(|| format!("Could not load `{path}`"))?;

    let mut server = Server::new(&config.name, &config.info);

    for database in &config.databases {
        let backend = KvBackend::open(&database.path, &database.description)
            .with_context(|| format!("Could not open store `{}`", database.path.display()))?;

        server
            .register_database(&database.name, Arc::new(backend))
            .with_context(|| format!("Could not register `{}`", database.name))?;

        info!("registered database {}", database.name);
    }

    // Registration is done; from here on the registries are read-only.
    let server = Arc::new(server);

    let listener = TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("Could not bind to `{}`", config.listen))?;
    info!("listening on {}", config.listen);

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                info!("new connection: {peer}");

                let session = Session::new(server.clone(), stream);
                tokio::spawn(async move {
                    if let Err(error) = session.run().await {
                        error!("session failed: {error}");
                    }
                });
            }
            Err(error) => {
                error!("accept failed: {error}");
            }
        }
    }
}
