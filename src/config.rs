//! Service configuration.
//!
//! Loaded from TOML, then overridden from the environment. Every section
//! has defaults, so an empty file (or no file) is a valid configuration.

use std::path::{Path, PathBuf};

use marketscope_search::{SearchConfig, TavilyConfig, TrustConfig, TrustRegistry};
use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};

/// Placeholder value shipped in sample environment files.
const PLACEHOLDER_LLM_API_KEY: &str = "your_openai_api_key_here";

/// Top-level configuration for the market research service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Search defaults and per-mode thresholds.
    pub search: SearchConfig,
    /// Tavily search provider.
    pub provider: TavilyConfig,
    /// Language model used by the analysis composer.
    pub llm: LlmConfig,
    /// Trusted domain lists and score table.
    pub trust: TrustConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Front-end origin allowed by CORS, in addition to `http://localhost:3000`.
    pub frontend_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8000,
            frontend_url: "http://localhost:3000".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Returns `host:port`, with IPv6 literals bracketed.
    pub fn bind_addr(&self) -> String {
        match self.host.parse::<std::net::IpAddr>() {
            Ok(ip) => std::net::SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }
}

/// Language model configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key. `None` leaves the composer on its built-in narrative.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4".to_owned(),
        }
    }
}

impl LlmConfig {
    /// Whether a usable API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .map(str::trim)
            .is_some_and(|key| !key.is_empty() && key != PLACEHOLDER_LLM_API_KEY)
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| MarketError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| MarketError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/marketscope/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("marketscope").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("marketscope")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/marketscope-config/config.toml")
        }
    }

    /// Load the service configuration.
    ///
    /// Reads `path` when given, otherwise the default path if that file
    /// exists, otherwise starts from defaults. Environment overrides are
    /// applied and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or unparseable, an
    /// override is malformed, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Recognised variables: `TAVILY_API_KEY`, `OPENAI_API_KEY`,
    /// `FRONTEND_URL`, `BACKEND_PORT`. Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Config`] if `BACKEND_PORT` is not a port number.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("TAVILY_API_KEY") {
            self.provider.api_key = Some(key);
        }
        if let Some(key) = get("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = get("FRONTEND_URL") {
            self.server.frontend_url = url.trim().to_owned();
        }
        if let Some(port) = get("BACKEND_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| MarketError::Config(format!("BACKEND_PORT is not a port: {port}")))?;
        }
        Ok(())
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - the server port is not 0
    /// - the front-end URL is an absolute URL
    /// - the provider timeout is not 0
    /// - the search section passes [`SearchConfig::validate`]
    /// - the trust tables build a [`TrustRegistry`]
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(MarketError::Config("server.port must not be 0".into()));
        }
        url::Url::parse(&self.server.frontend_url).map_err(|e| {
            MarketError::Config(format!(
                "server.frontend_url is not a URL ({}): {e}",
                self.server.frontend_url
            ))
        })?;
        if self.provider.timeout_seconds == 0 {
            return Err(MarketError::Config(
                "provider.timeout_seconds must be greater than 0".into(),
            ));
        }
        self.search.validate()?;
        TrustRegistry::from_config(&self.trust)?;
        Ok(())
    }
}
