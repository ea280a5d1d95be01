//! Configuration loading and representation.
//!
//! Everything is read from environment variables:
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `USE_PERSISTENT_STORES` | Postgres warehouse store instead of in-memory | `false` |
//! | `DATABASE_URL` | Postgres connection string (required when persistent) | - |
//! | `LOCATIONS_FILE` | JSON location catalogue replacing the built-in one | - |
//! | `LOG_FORMAT` | `json` or `pretty` | `json` |

use std::path::PathBuf;

use anyhow::{Context, bail};

use fulfilment_observability::LogFormat;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfraConfig {
    pub use_persistent_stores: bool,
    pub database_url: Option<String>,
    pub locations_file: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl InfraConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let use_persistent_stores = match lookup("USE_PERSISTENT_STORES") {
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .with_context(|| format!("USE_PERSISTENT_STORES must be true or false, got '{raw}'"))?,
            None => false,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if use_persistent_stores && database_url.is_none() {
            bail!("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");
        }

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().context("invalid LOG_FORMAT")?,
            None => LogFormat::default(),
        };

        Ok(Self {
            use_persistent_stores,
            database_url,
            locations_file: lookup("LOCATIONS_FILE").map(PathBuf::from),
            log_format,
        })
    }
}
