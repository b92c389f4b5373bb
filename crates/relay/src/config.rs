//! Relay configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

impl Config {
    /// Load configuration from `relay.toml` or use defaults.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from(Path::new("relay.toml"))?;
        config.apply_env();
        Ok(config)
    }

    /// Load from `path`, writing a default file there if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }

    /// `PORT` overrides `server.port`.
    fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid PORT value {:?}", port),
            }
        }
    }
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bind address.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Route of the submit endpoint.
    #[serde(default = "default_submit_path")]
    pub submit_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
            submit_path: default_submit_path(),
        }
    }
}

fn default_port() -> u16 {
    8787
}
fn default_bind() -> String {
    "0.0.0.0".to_string()
}
fn default_submit_path() -> String {
    "/actions/submitScore".to_string()
}

/// Replay guard settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplayConfig {
    /// How long a nonce stays claimed, in seconds.
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
    /// Period of the expired-nonce sweep, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}
fn default_sweep_interval() -> u64 {
    30
}

/// Score ledger binding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub rpc_url: String,
    /// Contract address.
    #[serde(default)]
    pub contract: String,
    /// Environment variable holding the signing key.
    #[serde(default = "default_signer_key_env")]
    pub signer_key_env: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            contract: String::new(),
            signer_key_env: default_signer_key_env(),
        }
    }
}

fn default_signer_key_env() -> String {
    "GAME_PRIVATE_KEY".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.server.submit_path, "/actions/submitScore");
        assert_eq!(config.replay.ttl_secs, 300);
        assert_eq!(config.ledger.signer_key_env, "GAME_PRIVATE_KEY");
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str("[replay]\nttl_secs = 10\n").unwrap();
        assert_eq!(config.replay.ttl_secs, 10);
        assert_eq!(config.replay.sweep_interval_secs, 30);
        assert_eq!(config.server.bind, "0.0.0.0");
    }

    #[test]
    fn test_missing_file_writes_default() {
        let dir = std::env::temp_dir().join(format!("relay-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("relay.toml");
        let _ = std::fs::remove_file(&path);

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.port, 8787);
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.server.submit_path, config.server.submit_path);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
