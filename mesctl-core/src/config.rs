//! Configuration for the mesctl tools
//!
//! Loaded from `~/.mesctl/config.toml`. Every section is optional; command
//! line flags and environment variables (`DATABASE_URL`, `MESCTL_ENDPOINT`)
//! take precedence over the file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MesConfig {
    pub server: Option<ServerSection>,
    pub database: Option<DatabaseSection>,
    pub cli: Option<CliSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Bind address for the HTTP server, e.g. "127.0.0.1:3050".
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliSection {
    /// API endpoint the `orders` commands talk to.
    pub endpoint: Option<String>,
}

impl MesConfig {
    /// Load config from ~/.mesctl/config.toml.
    ///
    /// Fails with an actionable error if the file doesn't exist; callers
    /// that can run without a file should fall back on `Err`.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Config not found at {:?}\n\nRun: mesctl config init",
                path
            );
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content).context("Failed to parse config file (invalid TOML)")
    }

    /// Config file path: ~/.mesctl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mesctl/config.toml")
    }

    /// Save config to its default location, creating the directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(path, toml_str).context(format!("Failed to write config file: {:?}", path))
    }

    /// Starter config written by `mesctl config init`.
    pub fn starter() -> Self {
        Self {
            server: Some(ServerSection {
                bind: Some("127.0.0.1:3050".to_string()),
            }),
            database: Some(DatabaseSection {
                url: None,
                max_connections: Some(5),
            }),
            cli: Some(CliSection {
                endpoint: Some("http://127.0.0.1:3050".to_string()),
            }),
        }
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database.as_ref().and_then(|db| db.url.as_deref())
    }

    pub fn cli_endpoint(&self) -> Option<&str> {
        self.cli.as_ref().and_then(|cli| cli.endpoint.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: MesConfig = toml::from_str(
            r#"
            [server]
            bind = "0.0.0.0:8080"

            [database]
            url = "postgres://localhost/mes"
            max_connections = 10

            [cli]
            endpoint = "http://mes-box:3050"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.server.as_ref().unwrap().bind.as_deref(),
            Some("0.0.0.0:8080")
        );
        assert_eq!(config.database_url(), Some("postgres://localhost/mes"));
        assert_eq!(config.cli_endpoint(), Some("http://mes-box:3050"));
    }

    #[test]
    fn empty_file_is_valid() {
        let config: MesConfig = toml::from_str("").unwrap();
        assert!(config.server.is_none());
        assert!(config.database_url().is_none());
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = MesConfig::starter();
        config.save_to(&path).unwrap();

        let reloaded = MesConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.cli_endpoint(), Some("http://127.0.0.1:3050"));
    }

    #[test]
    fn missing_file_mentions_init() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = MesConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("mesctl config init"));
    }
}
