use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Invalid catalog entry: field '{field}' = '{value}' ({reason})")]
    InvalidEntry {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown product: {id}")]
    UnknownProduct { id: String },

    #[error("Invalid gesture '{input}': {reason}")]
    InvalidGesture { input: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CartError {
    pub fn invalid_entry(field: &str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CartError::InvalidEntry {
            field: field.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::InvalidEntry { .. } => ErrorCategory::Catalog,
            CartError::ConfigValidationError { .. }
            | CartError::InvalidConfigValueError { .. }
            | CartError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CartError::UnknownProduct { .. } | CartError::InvalidGesture { .. } => {
                ErrorCategory::Input
            }
            CartError::IoError(_) | CartError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一商品錯誤只會被跳過，不影響購物車
            CartError::InvalidEntry { .. } => ErrorSeverity::Low,
            CartError::UnknownProduct { .. } | CartError::InvalidGesture { .. } => {
                ErrorSeverity::Medium
            }
            CartError::ConfigValidationError { .. }
            | CartError::InvalidConfigValueError { .. }
            | CartError::MissingConfigError { .. } => ErrorSeverity::High,
            CartError::IoError(_) | CartError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CartError::InvalidEntry { field, .. } => format!(
                "Fix the product's '{}' in the catalog; the product was skipped",
                field
            ),
            CartError::IoError(_) => "Check that the catalog file exists and is readable".to_string(),
            CartError::SerializationError(_) => "Retry without --json output".to_string(),
            CartError::ConfigValidationError { field, .. }
            | CartError::InvalidConfigValueError { field, .. } => {
                format!("Correct '{}' in the catalog file", field)
            }
            CartError::MissingConfigError { field } => {
                format!("Add the required '{}' setting", field)
            }
            CartError::UnknownProduct { .. } => {
                "Use one of the product ids listed in the catalog".to_string()
            }
            CartError::InvalidGesture { .. } => {
                "Use plus:<id>, minus:<id>, delete:<id> or set:<id>=<n>".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::InvalidEntry { reason, .. } => format!("A product could not be added: {}", reason),
            CartError::IoError(e) => format!("Could not read a file: {}", e),
            CartError::SerializationError(e) => format!("Could not produce output: {}", e),
            CartError::ConfigValidationError { message, .. } => {
                format!("The catalog file is invalid: {}", message)
            }
            CartError::InvalidConfigValueError { field, reason, .. } => {
                format!("The catalog setting '{}' is invalid: {}", field, reason)
            }
            CartError::MissingConfigError { field } => format!("The catalog is missing '{}'", field),
            CartError::UnknownProduct { id } => format!("There is no product '{}' on this page", id),
            CartError::InvalidGesture { input, .. } => format!("Could not understand action '{}'", input),
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;
