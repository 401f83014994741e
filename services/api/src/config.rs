use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Defines the supported backend providers for text generation.
/// Both are reached through the OpenAI-compatible chat completions surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    Gemini,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub provider: Provider,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub chat_model: String,
    pub log_level: Level,
    pub prompts_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let provider_str =
            std::env::var("GENERATION_PROVIDER").unwrap_or_else(|_| "gemini".to_string());
        let provider = match provider_str.to_lowercase().as_str() {
            "openai" => Provider::OpenAI,
            _ => Provider::Gemini,
        };

        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok();

        let chat_model = std::env::var("CHAT_MODEL").unwrap_or_else(|_| {
            match provider {
                Provider::OpenAI => "gpt-4o",
                Provider::Gemini => "gemini-2.5-flash",
            }
            .to_string()
        });

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let prompts_path = std::env::var("PROMPTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./prompts"));

        match provider {
            Provider::OpenAI => {
                if openai_api_key.is_none() {
                    return Err(ConfigError::MissingVar(
                        "OPENAI_API_KEY must be set for 'openai' provider".to_string(),
                    ));
                }
            }
            Provider::Gemini => {
                if gemini_api_key.is_none() {
                    return Err(ConfigError::MissingVar(
                        "GEMINI_API_KEY must be set for 'gemini' provider".to_string(),
                    ));
                }
            }
        }

        Ok(Self {
            bind_address,
            database_url,
            provider,
            openai_api_key,
            gemini_api_key,
            chat_model,
            log_level,
            prompts_path,
        })
    }
}
