use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ServiceError};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Bearer token accepted by the verify-token endpoint; with none set,
    /// token verification rejects everything
    #[serde(default)]
    pub service_token: Option<String>,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_email")]
    pub email: String,
}

fn default_port() -> u16 {
    8080
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_user_id() -> String {
    "service".to_string()
}

fn default_email() -> String {
    "service@localhost".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            service_token: None,
            user_id: default_user_id(),
            email: default_email(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory (defaults apply when the
    /// file is absent), then apply `PORT` / `SERVICE_TOKEN` env overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(Path::new("config.toml"))?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            ServiceError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ServiceError::Config(format!("invalid PORT value '{}'", port)))?;
        }
        if let Ok(token) = std::env::var("SERVICE_TOKEN") {
            self.auth.service_token = Some(token);
        }
        Ok(())
    }
}
