use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeoAioError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Fetch failed for {url}: {reason}")]
    FetchError { url: String, reason: String },

    #[error("Oracle command not installed: {0}")]
    OracleNotInstalled(String),

    #[error("Oracle call failed: {0}")]
    OracleFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SeoAioError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SeoAioError::HttpError(_) | SeoAioError::FetchError { .. } => Some(
                "Check the URL and your internet connection, or analyze saved text:\n  seoaio classify --file page.txt"
            ),
            SeoAioError::OracleNotInstalled(_) => Some(
                "Install Claude CLI (curl -fsSL https://claude.ai/install.sh | bash)\nOr skip the AI evaluation: seoaio analyze <url> --no-ai"
            ),
            SeoAioError::OracleFailed(_) => Some(
                "Re-run with SEOAIO_LOG=debug to see the raw oracle output"
            ),
            SeoAioError::ConfigError(_) | SeoAioError::TomlError(_) => Some(
                "Check your settings with `seoaio config show`\nOr locate the file with `seoaio config path`"
            ),
            SeoAioError::UrlParseError(_) => Some(
                "URLs look like https://example.com/page"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SeoAioError>;
