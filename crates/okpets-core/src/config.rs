//! OKPets configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{OkpetsError, Result};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OkpetsConfig {
    #[serde(default)]
    pub ok: OkConfig,
    #[serde(default)]
    pub mpets: MpetsConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl OkpetsConfig {
    /// Load config from the default path (~/.okpets/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| OkpetsError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| OkpetsError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".okpets")
            .join("config.toml")
    }

    /// Override file values from process environment variables.
    ///
    /// The variable names match what the original deployment exported, so
    /// a `.env`-style setup keeps working without a config file.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Env override with an injectable lookup, so it is testable without
    /// mutating process-global state.
    pub fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get("OK_APP_ID") {
            self.ok.app_id = v;
        }
        if let Some(v) = get("OK_PUBLIC_KEY") {
            self.ok.public_key = v;
        }
        if let Some(v) = get("OK_SECRET_KEY") {
            self.ok.secret_key = v;
        }
        if let Some(v) = get("OK_REDIRECT_URI") {
            self.ok.redirect_uri = v;
        }
        if let Some(v) = get("MPETS_API_URL") {
            self.mpets.base_url = v;
        }
        if let Some(v) = get("PORT")
            && let Ok(port) = v.parse()
        {
            self.gateway.port = port;
        }
    }
}

/// OK.ru application credentials and endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkConfig {
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_ok_api_url")]
    pub api_url: String,
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

fn default_ok_api_url() -> String {
    "https://api.ok.ru".into()
}
fn default_redirect_uri() -> String {
    "http://localhost:5000/oauth/callback".into()
}

impl Default for OkConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            public_key: String::new(),
            secret_key: String::new(),
            api_url: default_ok_api_url(),
            redirect_uri: default_redirect_uri(),
        }
    }
}

/// mpets.mobi endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MpetsConfig {
    #[serde(default = "default_mpets_url")]
    pub base_url: String,
}

fn default_mpets_url() -> String {
    "https://mpets.mobi".into()
}

impl Default for MpetsConfig {
    fn default() -> Self {
        Self {
            base_url: default_mpets_url(),
        }
    }
}

/// Gateway listen configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    5000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OkpetsConfig::default();
        assert_eq!(config.ok.api_url, "https://api.ok.ru");
        assert_eq!(config.mpets.base_url, "https://mpets.mobi");
        assert_eq!(config.gateway.port, 5000);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [ok]
            app_id = "512000123456"
            public_key = "CBAFJIICAB"
            secret_key = "sekret"

            [gateway]
            port = 8080
        "#;

        let config: OkpetsConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ok.app_id, "512000123456");
        assert_eq!(config.ok.secret_key, "sekret");
        assert_eq!(config.gateway.port, 8080);
        // Untouched sections keep their defaults.
        assert_eq!(config.mpets.base_url, "https://mpets.mobi");
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: OkpetsConfig = toml::from_str("").unwrap();
        assert_eq!(config.gateway.host, "0.0.0.0");
        assert_eq!(config.ok.redirect_uri, "http://localhost:5000/oauth/callback");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = OkpetsConfig::default();
        config.apply_env_from(|name| match name {
            "OK_SECRET_KEY" => Some("from-env".into()),
            "MPETS_API_URL" => Some("http://localhost:9999".into()),
            "PORT" => Some("7000".into()),
            _ => None,
        });
        assert_eq!(config.ok.secret_key, "from-env");
        assert_eq!(config.mpets.base_url, "http://localhost:9999");
        assert_eq!(config.gateway.port, 7000);
    }
}
