use crate::domain::model::FileType;
use std::path::PathBuf;
use thiserror::Error;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FILE_NOT_FOUND: i32 = 1;
pub const EXIT_UNSUPPORTED_FILE_TYPE: i32 = 2;
pub const EXIT_FORMAT_READ: i32 = 3;
pub const EXIT_SAVE_FAILED: i32 = 4;
pub const EXIT_CONFIG: i32 = 5;
pub const EXIT_IO: i32 = 6;

/// Message used when the repository fails with an error it could not classify.
pub const GENERIC_SAVE_MESSAGE: &str = "An error occurred while saving the customer.";

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Unsupported file type: {extension}")]
    UnsupportedFileType { extension: String },

    #[error("Error reading {file_type} file: {message}")]
    FormatRead {
        file_type: FileType,
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("Could not save customer from record {position}: {message}")]
    CouldNotSaveCustomer {
        position: usize,
        message: String,
        #[source]
        source: SaveError,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// Failure reported by a [`crate::domain::ports::CustomerRepository`].
///
/// The first three kinds carry a message meant for the operator; anything the
/// repository cannot classify goes into [`SaveError::Other`].
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    State(String),

    #[error("{0}")]
    Localized(String),

    #[error("{0}")]
    Other(#[source] BoxError),
}

impl SaveError {
    /// Message to surface to the operator. Unclassified errors get the generic
    /// text, the cause stays reachable through `source()`.
    pub fn public_message(&self) -> String {
        match self {
            SaveError::Input(message)
            | SaveError::State(message)
            | SaveError::Localized(message) => message.clone(),
            SaveError::Other(_) => GENERIC_SAVE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Format,
    Repository,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn format_read<E>(file_type: FileType, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        let source = source.into();
        ImportError::FormatRead {
            file_type,
            message: source.to_string(),
            source,
        }
    }

    pub fn could_not_save(position: usize, source: SaveError) -> Self {
        ImportError::CouldNotSaveCustomer {
            position,
            message: source.public_message(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::FileNotFound { .. } | ImportError::UnsupportedFileType { .. } => {
                ErrorCategory::Input
            }
            ImportError::FormatRead { .. } => ErrorCategory::Format,
            ImportError::CouldNotSaveCustomer { .. } => ErrorCategory::Repository,
            ImportError::ConfigError { .. }
            | ImportError::ConfigValidationError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ImportError::IoError(_) | ImportError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Format | ErrorCategory::Repository => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ImportError::FileNotFound { .. } => EXIT_FILE_NOT_FOUND,
            ImportError::UnsupportedFileType { .. } => EXIT_UNSUPPORTED_FILE_TYPE,
            ImportError::FormatRead { .. } => EXIT_FORMAT_READ,
            ImportError::CouldNotSaveCustomer { .. } => EXIT_SAVE_FAILED,
            ImportError::ConfigError { .. }
            | ImportError::ConfigValidationError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => EXIT_CONFIG,
            ImportError::IoError(_) | ImportError::SerializationError(_) => EXIT_IO,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::FileNotFound { path } => format!("File not found: {}", path.display()),
            ImportError::UnsupportedFileType { extension } if extension.is_empty() => {
                "Unsupported file type: the source file has no extension".to_string()
            }
            ImportError::CouldNotSaveCustomer { position, message, .. } => {
                format!("Could not save customer from record {}: {}", position, message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::FileNotFound { .. } => {
                "Check that the source path is relative to the root directory (--root-dir)"
            }
            ImportError::UnsupportedFileType { .. } => "Use a .csv, .json, .txt or .xml source file",
            ImportError::FormatRead { .. } => {
                "Check the file encoding (UTF-8) and that its content matches the extension"
            }
            ImportError::CouldNotSaveCustomer { .. } => {
                "Fix the record and re-run, or use --on-error continue to import the remaining rows"
            }
            ImportError::ConfigError { .. }
            | ImportError::ConfigValidationError { .. }
            | ImportError::InvalidConfigValueError { .. } => {
                "Review the TOML configuration and command line options"
            }
            ImportError::MissingConfigError { .. } => {
                "Set the missing value in the configuration file or pass it on the command line"
            }
            ImportError::IoError(_) | ImportError::SerializationError(_) => {
                "Check file permissions and available disk space"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
