use anyhow::{Context, bail};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATA_FILE: &str = "golf-data.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
}

impl AppConfig {
    /// Reads `GOLF_BIND_ADDR`, `GOLF_STORE` and `GOLF_DATA_FILE`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("GOLF_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .trim()
            .parse()
            .with_context(|| format!("GOLF_BIND_ADDR is not a socket address: {bind_addr}"))?;

        let store = match lookup("GOLF_STORE")
            .map(|value| value.trim().to_lowercase())
            .as_deref()
        {
            None | Some("") | Some("memory") => StoreBackend::Memory,
            Some("file") => StoreBackend::File(PathBuf::from(
                lookup("GOLF_DATA_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
            )),
            Some(other) => bail!("GOLF_STORE must be `memory` or `file`, got `{other}`"),
        };

        Ok(Self { bind_addr, store })
    }
}
