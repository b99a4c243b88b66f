//! Error types for Fitpulse

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FitpulseError>;

#[derive(Error, Debug)]
pub enum FitpulseError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A remote request failed; the message is the one stored on its slice
    #[error("{0}")]
    Request(String),
}

impl FitpulseError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            FitpulseError::InvalidInput(_) => 3,
            FitpulseError::Auth(_) => 2,
            FitpulseError::Api(_) => 1,
            FitpulseError::Config(_) => 1,
            FitpulseError::Storage(_) => 1,
            FitpulseError::Request(_) => 1,
        }
    }

    /// Message shown to the user when the error lands on a slice.
    ///
    /// Auth and validation errors carry their own user-facing text; the
    /// rest collapse into the display string.
    pub fn user_message(&self) -> String {
        match self {
            FitpulseError::Auth(e) => e.to_string(),
            FitpulseError::InvalidInput(msg) | FitpulseError::Request(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid duration for {field}: {message}")]
    InvalidDuration { field: String, message: String },

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage IO failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Snapshot migration to version {version} failed: {message}")]
    Migration { version: u32, message: String },

    #[error("Snapshot version {stored} is newer than supported version {supported}")]
    UnsupportedVersion { stored: u32, supported: u32 },

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Failures talking to a remote HTTP service.
///
/// Every variant is treated the same way by callers ("fetch failed"); the
/// split only exists for logs.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("{service} request failed: {message}")]
    Transport { service: String, message: String },

    #[error("{service} responded with HTTP {status}")]
    Status { service: String, status: u16 },

    #[error("{service} returned a malformed body: {message}")]
    Decode { service: String, message: String },

    #[error("Invalid {service} URL: {message}")]
    InvalidUrl { service: String, message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username not found. Please create an account first.")]
    UnknownUser,

    #[error("Invalid password. Please try again.")]
    WrongPassword,

    #[error("Username already exists. Please choose a different one.")]
    UsernameTaken,

    #[error("{0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = FitpulseError::InvalidInput("Weight must be between 50 and 500 lbs".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_auth_error() {
        let error = FitpulseError::Auth(AuthError::WrongPassword);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_api_error() {
        let error = FitpulseError::Api(ApiError::Status {
            service: "fitness".to_string(),
            status: 502,
        });
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_storage_error() {
        let error = FitpulseError::Storage(StorageError::Unavailable("disk full".to_string()));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_auth_messages_match_form_text() {
        assert_eq!(
            AuthError::UnknownUser.to_string(),
            "Username not found. Please create an account first."
        );
        assert_eq!(AuthError::WrongPassword.to_string(), "Invalid password. Please try again.");
        assert_eq!(
            AuthError::UsernameTaken.to_string(),
            "Username already exists. Please choose a different one."
        );
    }

    #[test]
    fn test_user_message_strips_prefix_for_auth() {
        let error: FitpulseError = AuthError::UnknownUser.into();
        assert_eq!(
            error.user_message(),
            "Username not found. Please create an account first."
        );
        assert!(error.to_string().starts_with("Authentication error: "));
    }

    #[test]
    fn test_user_message_for_api_error_keeps_context() {
        let error: FitpulseError = ApiError::Transport {
            service: "product catalog".to_string(),
            message: "connection refused".to_string(),
        }
        .into();
        let message = error.user_message();
        assert!(message.contains("product catalog"));
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn test_error_message_formatting_config() {
        let error = FitpulseError::Config(ConfigError::MissingField("api.fitness_base_url".to_string()));
        assert_eq!(
            error.to_string(),
            "Configuration error: Missing required field: api.fitness_base_url"
        );
    }

    #[test]
    fn test_migration_error_formatting() {
        let error = StorageError::Migration {
            version: 1,
            message: "theme is not an object".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Snapshot migration to version 1 failed: theme is not an object"
        );
    }

    #[test]
    fn test_api_error_clone() {
        let original = ApiError::Decode {
            service: "fitness".to_string(),
            message: "expected array".to_string(),
        };
        let cloned = original.clone();
        assert_eq!(original.to_string(), cloned.to_string());
    }
}
