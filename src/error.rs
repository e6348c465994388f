use thiserror::Error;

/// Main error type for the log file endpoint
#[derive(Debug, Error)]
pub enum LogFileError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration file: {0}")]
    InvalidConfig(String),

    #[error("Configuration validation failed: {0}")]
    ConfigValidationError(String),

    // Log file errors
    #[error("Failed to read log file: {0}")]
    LogFileError(String),

    // HTTP server errors
    #[error("Server error: {0}")]
    ServerError(String),

    // IO errors (automatically converted from std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for log file endpoint operations
pub type Result<T> = std::result::Result<T, LogFileError>;
