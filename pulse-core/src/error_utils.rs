use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Network(e) => {
                error!("Network error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Network(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Io(_) => "Could not read or write a local file.".to_string(),
            CoreError::Serialization(_) => {
                "Could not encode the result as JSON.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
        }
    }
}

impl ErrorExt for NetworkError {
    fn log_error(&self) -> &Self {
        error!("NetworkError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("NetworkError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            NetworkError::Transport(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            NetworkError::Timeout { .. } => {
                "Request to Reddit timed out. Please try again.".to_string()
            }
            NetworkError::Status { status_code, .. } => {
                format!("Reddit answered with status {}. Please try again later.", status_code)
            }
            NetworkError::InvalidChannel { channel } => format!(
                "'{}' is not a valid subreddit name. Use letters, digits and underscores.",
                channel
            ),
            NetworkError::ChannelNotFound { channel } => {
                format!("Subreddit '{}' not found or is private.", channel)
            }
            NetworkError::Forbidden { resource } => format!(
                "Access denied to {}. You may not have permission to view this content.",
                resource
            ),
            NetworkError::InvalidResponse { .. } => {
                "Reddit returned data that could not be read.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            NetworkError::Transport(_) => "NETWORK_TRANSPORT".to_string(),
            NetworkError::Timeout { .. } => "NETWORK_TIMEOUT".to_string(),
            NetworkError::Status { .. } => "NETWORK_STATUS".to_string(),
            NetworkError::InvalidChannel { .. } => "NETWORK_INVALID_CHANNEL".to_string(),
            NetworkError::ChannelNotFound { .. } => "NETWORK_CHANNEL_NOT_FOUND".to_string(),
            NetworkError::Forbidden { .. } => "NETWORK_FORBIDDEN".to_string(),
            NetworkError::InvalidResponse { .. } => "NETWORK_INVALID_RESPONSE".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::Unreadable { path, .. } => {
                format!("Configuration file '{}' could not be read.", path)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::ValidationFailed { reason } => {
                format!("Configuration is invalid: {}.", reason)
            }
            ConfigError::Parse(_) => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::Unreadable { .. } => "CONFIG_UNREADABLE".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
