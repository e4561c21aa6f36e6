//! The offline loader: parse a jargon-format file and write its records,
//! with all their indexes, into a key-value store.
//!
//! The store is opened exclusively; don't run this against a store a
//! server is currently serving from.

use anyhow::{Context, Result};
use dictd::{backend::kv::KvBackend, jargon};
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let store = args
        .next()
        .context("USAGE: dictd-load <store> <jargon-file>")?;
    let input = args
        .next()
        .context("USAGE: dictd-load <store> <jargon-file>")?;

    let records = jargon::parse_file(&input).with_context(|| format!("Could not parse `{input}`"))?;
    let backend =
        KvBackend::open(&store, "").with_context(|| format!("Could not open store `{store}`"))?;

    for (word, text) in &records {
        backend
            .put_definition(word, text)
            .with_context(|| format!("Could not store `{word}`"))?;
    }

    backend.flush().context("Could not flush the store")?;
    info!("loaded {} definitions into {store}", records.len());

    Ok(())
}
