use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaqRouterError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Similarity search error: {0}")]
    Search(String),

    #[error("LLM completion error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FaqRouterError>;
