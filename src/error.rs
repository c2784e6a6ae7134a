//! Custom error types for changelog-linker.

use thiserror::Error;

/// Main error type for changelog-linker operations.
#[derive(Error, Debug)]
pub enum LinkerError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Changelog document errors
    #[error(
        "There is missing \"{placeholder}\" placeholder in the changelog. Put it where you want to add dumped merges."
    )]
    MissingPlaceholder { placeholder: String },

    // Forge errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("Invalid git remote URL: {0}")]
    InvalidRemoteUrl(String),

    #[error("Git URL parse error: {0}")]
    GitUrlError(#[from] git_url_parse::GitUrlParseError),

    // Network/API errors
    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    // TOML parsing errors
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Datetime parse error: {0}")]
    ChronoParseError(#[from] chrono::ParseError),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using LinkerError
pub type Result<T> = std::result::Result<T, LinkerError>;

impl LinkerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a missing placeholder error for the given sentinel
    pub fn missing_placeholder(placeholder: impl Into<String>) -> Self {
        Self::MissingPlaceholder {
            placeholder: placeholder.into(),
        }
    }
}

// generic I/O errors land in Other
impl From<std::io::Error> for LinkerError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for LinkerError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code.as_u16();
                if status == 401 {
                    Self::AuthenticationError(source.message.clone())
                } else if source.message.to_lowercase().contains("rate limit")
                    || status == 429
                {
                    Self::RateLimitExceeded
                } else if status == 403 {
                    Self::AuthenticationError(source.message.clone())
                } else {
                    Self::ForgeError(format!("GitHub API error: {}", err))
                }
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}
