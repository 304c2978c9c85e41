//! Defines the custom error types for the email-vet application.

use thiserror::Error;
use url::ParseError as UrlParseError;

/// The primary error type for the validation engine.
///
/// Problems with the email being checked are never reported through this
/// type; they surface as failing checks in the validation result. These
/// variants cover configuration, transport and caller contract violations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error initializing necessary components (e.g., the HTTP client).
    #[error("Initialization Error: {0}")]
    Initialization(String),

    /// Error during JSON serialization or deserialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing the TOML configuration file.
    #[error("TOML Parsing Error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Error parsing a URL.
    #[error("URL Parsing Error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// Error making HTTP requests via reqwest.
    #[error("HTTP Request Error: {0}")]
    Request(#[from] reqwest::Error),

    /// The resolver answered with a non-success DNS status code.
    #[error("DNS Status {status} for {name}")]
    DnsStatus {
        /// Name that was queried.
        name: String,
        /// The `Status` field of the DoH JSON response (RCODE).
        status: u32,
    },

    /// The resolver answered with a non-success HTTP status.
    #[error("DNS-over-HTTPS endpoint returned HTTP {0}")]
    DnsHttpStatus(u16),

    /// A lookup did not finish within its time limit.
    #[error("DNS Timeout for name: {0}")]
    DnsTimeout(String),

    /// Bulk validation was called with more emails than allowed.
    #[error("Bulk validation accepts at most {max} emails, got {count}")]
    BulkLimitExceeded {
        /// Number of emails supplied.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A validation run panicked before producing a result.
    #[error("Task Execution Error: {0}")]
    Task(String),
}

impl AppError {
    /// Whether retrying the same DNS-over-HTTPS request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            AppError::DnsHttpStatus(code) => *code == 429 || *code >= 500,
            AppError::DnsTimeout(_) => true,
            // SERVFAIL
            AppError::DnsStatus { status, .. } => *status == 2,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
