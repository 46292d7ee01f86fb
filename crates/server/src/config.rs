//! Server configuration from the environment.
use std::env;
use std::path::PathBuf;

use runtime::RuntimeConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 6968;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `map.txt` and `TreasureItems.csv`. The bundled
    /// dungeon is used when unset.
    pub data_dir: Option<PathBuf>,
    /// Directory for `server.log`. Stderr only when unset.
    pub log_dir: Option<PathBuf>,
    pub runtime: RuntimeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            data_dir: None,
            log_dir: None,
            runtime: RuntimeConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Construct server configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_HOST` - Bind address (default: 127.0.0.1)
    /// - `DUNGEON_PORT` - Bind port (default: 6968)
    /// - `DUNGEON_DATA_DIR` - Content directory (default: built-in dungeon)
    /// - `DUNGEON_SEED` - RNG seed for treasure draws and spawn points
    /// - `DUNGEON_LOG_DIR` - Also log to `server.log` in this directory
    /// - `DUNGEON_COMMAND_BUFFER` - World command queue capacity (default: 32)
    /// - `DUNGEON_EVENT_BUFFER` - Event bus capacity (default: 100)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source. Unparsable
    /// values fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = read("DUNGEON_HOST") {
            config.host = host.trim().to_owned();
        }
        if let Some(port) = read_parsed::<u16>(read("DUNGEON_PORT")) {
            config.port = port;
        }
        config.data_dir = read("DUNGEON_DATA_DIR").map(PathBuf::from);
        config.log_dir = read("DUNGEON_LOG_DIR").map(PathBuf::from);
        config.runtime.seed = read_parsed(read("DUNGEON_SEED"));
        if let Some(capacity) = read_parsed::<usize>(read("DUNGEON_COMMAND_BUFFER")) {
            config.runtime.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_parsed::<usize>(read("DUNGEON_EVENT_BUFFER")) {
            config.runtime.event_buffer_size = capacity.max(1);
        }

        config
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read_parsed<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config_from(&[]);
        assert_eq!(config.bind_address(), "127.0.0.1:6968");
        assert!(config.data_dir.is_none());
        assert!(config.log_dir.is_none());
        assert!(config.runtime.seed.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("DUNGEON_HOST", "0.0.0.0"),
            ("DUNGEON_PORT", "7000"),
            ("DUNGEON_DATA_DIR", "/srv/dungeon"),
            ("DUNGEON_SEED", "99"),
            ("DUNGEON_LOG_DIR", "/var/log/dungeon"),
            ("DUNGEON_COMMAND_BUFFER", "8"),
            ("DUNGEON_EVENT_BUFFER", "0"),
        ]);
        assert_eq!(config.bind_address(), "0.0.0.0:7000");
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/dungeon")));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/dungeon")));
        assert_eq!(config.runtime.seed, Some(99));
        assert_eq!(config.runtime.command_buffer_size, 8);
        assert_eq!(config.runtime.event_buffer_size, 1);
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let config = config_from(&[("DUNGEON_PORT", "http"), ("DUNGEON_DATA_DIR", "  ")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.data_dir.is_none());
    }
}
