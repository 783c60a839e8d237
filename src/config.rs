use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Endpoint of the external similarity search service
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Above this similarity score the retrieved document is trusted as-is
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,
    /// At or above this score (and at most the high threshold) the judge is consulted
    #[serde(default = "default_low_threshold")]
    pub low_threshold: f64,
    /// Score substituted when retrieval fails; must stay below the low
    /// threshold so a failed retrieval always routes to generation
    #[serde(default = "default_error_score")]
    pub error_score: f64,
}

pub(crate) fn default_high_threshold() -> f64 {
    0.6
}

pub(crate) fn default_low_threshold() -> f64 {
    0.3
}

pub(crate) fn default_error_score() -> f64 {
    -1.0
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            high_threshold: default_high_threshold(),
            low_threshold: default_low_threshold(),
            error_score: default_error_score(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            println!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::FaqRouterError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Reject threshold arrangements the router cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let routing = &self.routing;
        if routing.low_threshold > routing.high_threshold {
            return Err(crate::FaqRouterError::Config(format!(
                "low_threshold ({}) must not exceed high_threshold ({})",
                routing.low_threshold, routing.high_threshold
            )));
        }
        if routing.error_score >= routing.low_threshold {
            return Err(crate::FaqRouterError::Config(format!(
                "error_score ({}) must be below low_threshold ({}) so failed retrievals fall back to generation",
                routing.error_score, routing.low_threshold
            )));
        }
        Ok(())
    }

    /// Get similarity search endpoint
    pub fn search_endpoint(&self) -> &str {
        &self.search.endpoint
    }

    /// Get LLM base URL
    pub fn llm_base_url(&self) -> &str {
        &self.llm.base_url
    }

    /// Get LLM API key
    pub fn llm_api_key(&self) -> &str {
        &self.llm.api_key
    }

    /// Get LLM model name
    pub fn llm_model(&self) -> &str {
        &self.llm.model
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                endpoint: "http://localhost:8000/ask".to_string(),
                timeout_secs: default_timeout_secs(),
            },
            llm: LlmConfig {
                base_url: "http://localhost:11434/v1".to_string(),
                api_key: "ollama".to_string(),
                model: default_llm_model(),
                timeout_secs: default_timeout_secs(),
            },
            routing: RoutingConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                backtrace: true,
            },
        }
    }
}
