//! Server configuration.
//!
//! A TOML document names the server, its `SHOW SERVER` text, the listen
//! address, and the dictionaries to open:
//!
//! ```toml
//! name = "dictd"
//! info = "A word server."
//! listen = "0.0.0.0:2628"
//!
//! [[database]]
//! name = "jargon"
//! path = "/var/lib/dictd/jargon"
//! description = "The Jargon File"
//! ```

use std::{fs, io, path::Path, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// The dict port, per the IANA assignment.
const DEFAULT_LISTEN: &str = "0.0.0.0:2628";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server name, shown in the banner and stamped into msg-ids.
    pub name: String,
    /// Free-form text for `SHOW SERVER`.
    #[serde(default)]
    pub info: String,
    /// Address to bind.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Dictionaries to open and register, in the order given.
    #[serde(default, rename = "database")]
    pub databases: Vec<DatabaseConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Name to register the database under.
    pub name: String,
    /// Path of the key-value store.
    pub path: PathBuf,
    /// One-line description for `SHOW DB`.
    #[serde(default)]
    pub description: String,
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

impl Config {
    /// Load the configuration at `path`.
    pub fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            name = "dictd"
            info = "A word server."
            listen = "127.0.0.1:2628"

            [[database]]
            name = "jargon"
            path = "/var/lib/dictd/jargon"
            description = "The Jargon File"

            [[database]]
            name = "scratch"
            path = "/tmp/scratch"
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "dictd");
        assert_eq!(config.listen, "127.0.0.1:2628");
        assert_eq!(config.databases.len(), 2);
        assert_eq!(config.databases[0].name, "jargon");
        assert_eq!(config.databases[1].description, "");
    }

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str(r#"name = "dictd""#).unwrap();

        assert_eq!(config.listen, DEFAULT_LISTEN);
        assert_eq!(config.info, "");
        assert!(config.databases.is_empty());
    }
}
