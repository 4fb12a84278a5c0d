use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Process-wide settings, read once at startup and never mutated.
///
/// Every field has a default, so an empty YAML document is a valid config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds to
    pub listen_addr: String,
    /// Directory under which requested files are resolved
    pub document_root: PathBuf,
    /// Display name used on the welcome page and for `<cs371server>`
    pub server_name: String,
    /// How long a client may take to send its request line
    pub read_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            document_root: PathBuf::from("."),
            server_name: "Tagserve".to_string(),
            read_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Loads the config from the process environment.
    ///
    /// See [`Config::from_lookup`] for the variables consulted.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an environment-like lookup.
    ///
    /// `CONFIG` may name a YAML file which is read first. `LISTEN`,
    /// `DOC_ROOT`, `SERVER_NAME` and `READ_TIMEOUT_MS` then override
    /// individual fields.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("CONFIG") {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path))?;
                Self::from_yaml(&raw).with_context(|| format!("parsing config file {}", path))?
            }
            None => Self::default(),
        };

        if let Some(addr) = lookup("LISTEN") {
            cfg.listen_addr = addr;
        }
        if let Some(root) = lookup("DOC_ROOT") {
            cfg.document_root = PathBuf::from(root);
        }
        if let Some(name) = lookup("SERVER_NAME") {
            cfg.server_name = name;
        }
        if let Some(ms) = lookup("READ_TIMEOUT_MS") {
            cfg.read_timeout_ms = ms
                .trim()
                .parse()
                .with_context(|| format!("READ_TIMEOUT_MS is not a number: {}", ms))?;
        }

        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        // serde_yaml reads an empty document as unit, not as an empty map
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
