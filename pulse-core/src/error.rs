use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure of the single outbound fetch an operation performs.
///
/// Every public operation that reads posts surfaces this type unchanged.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timeout for {endpoint}")]
    Timeout { endpoint: String },

    #[error("Unexpected status {status_code} from {endpoint}")]
    Status { status_code: u16, endpoint: String },

    #[error("Invalid channel name: {channel:?}")]
    InvalidChannel { channel: String },

    #[error("Channel not found: {channel}")]
    ChannelNotFound { channel: String },

    #[error("Forbidden access to resource: {resource}")]
    Forbidden { resource: String },

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Could not read configuration {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
