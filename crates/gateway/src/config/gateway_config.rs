//! Gateway configuration module.
//!
//! Supports loading configuration from:
//! 1. Config file (TOML, JSON, or YAML) named by `GATEWAY_CONFIG`
//! 2. Environment variables
//!
//! Environment variables take precedence over config file values.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP listener configuration
    pub server: ServerConfig,
    /// Launches REST provider configuration
    pub launches: LaunchesConfig,
    /// User/trip store configuration
    pub store: StoreConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server port (default: 4000)
    pub port: u16,
    /// Bind address (default: "0.0.0.0")
    pub bind: String,
    /// Serve the GraphQL playground on `GET /graphql` (default: true)
    pub playground: bool,
}

/// Launches provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchesConfig {
    /// REST base URL (default: "https://api.spacexdata.com/v2/")
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// How long GET responses are reused, in seconds. 0 disables caching. (default: 60)
    pub cache_ttl_secs: u64,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite connection URL (default: "sqlite://store.sqlite")
    pub url: String,
    /// Maximum connections in the pool (default: 5)
    pub max_connections: u32,
    /// Connection acquire timeout in seconds (default: 30)
    pub acquire_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. Empty (or "*") allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            bind: "0.0.0.0".to_string(),
            playground: true,
        }
    }
}

impl Default for LaunchesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.spacexdata.com/v2/".to_string(),
            timeout_secs: 30,
            cache_ttl_secs: 60,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://store.sqlite".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 30,
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl GatewayConfig {
    /// Load configuration from file and environment variables.
    /// Environment variables override file values.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(config_path) = std::env::var("GATEWAY_CONFIG") {
            config = Self::from_file(&config_path)?;
            tracing::info!("Loaded configuration from: {}", config_path);
        }

        config.apply_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Load configuration from a file (supports TOML, JSON, YAML)
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config: GatewayConfig = match extension {
            "toml" => toml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => {
                if content.trim().starts_with('{') {
                    serde_json::from_str(&content)?
                } else if content.contains("---") || content.contains(": ") {
                    serde_yaml::from_str(&content)?
                } else {
                    toml::from_str(&content)?
                }
            }
        };

        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in `load`).
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server config
        if let Some(port) = var("GATEWAY_PORT").or_else(|| var("PORT")).and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("GATEWAY_BIND") {
            self.server.bind = val;
        }
        if let Some(val) = var("GATEWAY_PLAYGROUND") {
            self.server.playground = val.parse().unwrap_or(true);
        }

        // Launches provider
        if let Some(val) = var("LAUNCH_API_BASE_URL") {
            self.launches.base_url = val;
        }
        if let Some(secs) = var("LAUNCH_API_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.launches.timeout_secs = secs;
        }
        if let Some(secs) = var("LAUNCH_API_CACHE_TTL_SECS").and_then(|v| v.parse().ok()) {
            self.launches.cache_ttl_secs = secs;
        }

        // Store
        if let Some(val) = var("DATABASE_URL") {
            self.store.url = val;
        }
        if let Some(max) = var("DATABASE_MAX_CONNECTIONS").and_then(|v| v.parse().ok()) {
            self.store.max_connections = max;
        }

        // CORS config
        if let Some(val) = var("CORS_ALLOWED_ORIGINS") {
            self.cors.allowed_origins = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}
