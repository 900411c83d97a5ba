use thiserror::Error;

/// Provider error types
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

pub mod provider_base;
pub mod scryfall;

pub use provider_base::{AbstractProvider, BaseProvider, RateLimiter};
pub use scryfall::monolith::ScryfallProvider;
