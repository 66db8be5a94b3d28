//! Environment-driven configuration.
//!
//! | Variable           | Default                         |
//! |--------------------|---------------------------------|
//! | `CATALOG_HOST`     | `0.0.0.0`                       |
//! | `CATALOG_PORT`     | `3000`                          |
//! | `CATALOG_DATABASE` | `Database::get_default_path()`  |

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::info;

use crate::error::{CatalogError, Result};
use crate::storage::Database;

pub const HOST_VAR: &str = "CATALOG_HOST";
pub const PORT_VAR: &str = "CATALOG_PORT";
pub const DATABASE_VAR: &str = "CATALOG_DATABASE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_path: Database::get_default_path(),
        }
    }
}

impl Config {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using `lookup` in place of the environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: try_load(&lookup, HOST_VAR, defaults.host)?,
            port: try_load(&lookup, PORT_VAR, defaults.port)?,
            database_path: try_load(&lookup, DATABASE_VAR, defaults.database_path)?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default:?}");
        return Ok(default);
    };

    raw.trim()
        .parse()
        .map_err(|e| CatalogError::invalid_config(format!("Invalid {key} value {raw:?}: {e}")))
}
