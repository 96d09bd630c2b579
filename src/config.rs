//! Store and server configuration.
//!
//! Both configs follow the same pattern: sensible `Default`, builder-style
//! `with_*` setters, and `from_env()` for process start-up.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `AVALON_ENV` | `prod` or `test` | `prod` |
//! | `AVALON_DATA_DIR` | directory holding the database | `data` |
//! | `AVALON_ADDR` | server listen address | `127.0.0.1:5000` |

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which database file a store opens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Production,
    Test,
}

impl Environment {
    /// Parse an environment name. Anything other than `test` is production.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("test") {
            Environment::Test
        } else {
            Environment::Production
        }
    }
}

/// Where the SQLite store keeps its data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Production or test database.
    pub environment: Environment,

    /// Directory holding the database file. Created on open if missing.
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl StoreConfig {
    /// Build a config from `AVALON_ENV` and `AVALON_DATA_DIR`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(env) = env_var("AVALON_ENV") {
            config.environment = Environment::from_name(&env);
        }
        if let Some(dir) = env_var("AVALON_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Use a different environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Use a different data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Full path of the database file.
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        let file = match self.environment {
            Environment::Production => "avalon.db",
            Environment::Test => "avalon_test.db",
        };
        self.data_dir.join(file)
    }
}

/// HTTP server settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Store opened at start-up.
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 5000)),
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Build a config from the environment.
    ///
    /// An unparsable `AVALON_ADDR` is reported as an error rather than
    /// silently replaced by the default.
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        let mut config = Self {
            store: StoreConfig::from_env(),
            ..Self::default()
        };
        if let Some(addr) = env_var("AVALON_ADDR") {
            config.addr = addr.parse()?;
        }
        Ok(config)
    }

    /// Listen on a different address.
    #[must_use]
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Use a different store config.
    #[must_use]
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
