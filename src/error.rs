use crate::api::response::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

impl From<TransportError> for AppError {
    fn from(error: TransportError) -> Self {
        AppError::Api(ApiError::Transport(error))
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {path}: {message}")]
    InputFile { path: String, message: String },
    #[error("Failed to render output: {0}")]
    Output(String),
}

/// Errors raised to the immediate caller instead of being folded into an
/// `ApiResult`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Lineage steps must not be empty")]
    EmptyLineage,
    #[error("Failed to create HTTP client: {message}")]
    ClientInit { message: String },
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },
    #[error("Server rejected {endpoint} with status {status}: {message}")]
    NotOk {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("{0}")]
    Transport(#[from] TransportError),
}

/// Failures below the application layer. Each variant maps onto exactly one
/// wire error code through [`TransportError::code`].
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Response from {endpoint} is not valid JSON: {source}")]
    Syntax {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Request to {endpoint} timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64, endpoint: String },
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid request URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl TransportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TransportError::Syntax { .. } => ErrorCode::SyntaxError,
            TransportError::Timeout { .. } => ErrorCode::Timeout,
            TransportError::Request { .. } | TransportError::InvalidUrl { .. } => {
                ErrorCode::UnknownError
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },
    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Unknown configuration key '{key}'")]
    UnknownKey { key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::ClientInit { .. } => ErrorSeverity::Critical,
                ApiError::NotOk { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::NotOk { .. } => ErrorSeverity::Medium,
                ApiError::Transport(TransportError::Syntax { .. }) => ErrorSeverity::High,
                ApiError::Transport(_) => ErrorSeverity::Medium,
                ApiError::EmptyLineage | ApiError::InvalidHeader { .. } => ErrorSeverity::Low,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::Transport(TransportError::Timeout { .. })) => Some(
                "Check your connection or raise the timeout with --timeout-ms".to_string(),
            ),
            AppError::Api(ApiError::Transport(TransportError::InvalidUrl { .. })) => {
                Some("'infinibrowser config set base_url <url>' to fix the base URL".to_string())
            }
            AppError::Api(ApiError::NotOk { status: 404, .. }) => {
                Some("Element ids are case sensitive, e.g. 'Water' not 'water'".to_string())
            }
            AppError::Api(ApiError::EmptyLineage) => {
                Some("The steps file must contain at least one lineage step".to_string())
            }
            AppError::Config(ConfigError::ProfileNotFound { .. }) => {
                Some("'infinibrowser config show' to list configured profiles".to_string())
            }
            _ => None,
        }
    }
}
