//! Error types for layout and fitting.

use thiserror::Error;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur while building layouts or fitting content
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Zero, negative or non-finite dimensions given to the cover fitter
    #[error("Invalid dimensions: {reason}")]
    InvalidDimensions { reason: String },

    /// Layout name absent from the catalog
    #[error("Unknown layout name: {name}")]
    UnknownLayoutName { name: String },

    /// A layout template violates a geometric invariant
    #[error("Invalid layout template '{layout}': {reason}")]
    InvalidTemplate { layout: String, reason: String },

    /// FitContract configuration error
    #[error("FitContract error: {reason}")]
    ContractError { reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error (for FitContract)
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error (for FitContract)
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}

impl LayoutError {
    /// Create an invalid dimensions error
    pub fn invalid_dimensions(reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            reason: reason.into(),
        }
    }

    /// Create an unknown layout name error
    pub fn unknown_layout(name: impl Into<String>) -> Self {
        Self::UnknownLayoutName { name: name.into() }
    }

    /// Create an invalid template error
    pub fn invalid_template(layout: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            layout: layout.into(),
            reason: reason.into(),
        }
    }

    /// Create a contract error
    pub fn contract_error(reason: impl Into<String>) -> Self {
        Self::ContractError {
            reason: reason.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDimensions { .. } => "LAYOUT001",
            Self::UnknownLayoutName { .. } => "LAYOUT002",
            Self::InvalidTemplate { .. } => "LAYOUT003",
            Self::ContractError { .. } => "LAYOUT004",
            Self::IoError(_) => "LAYOUT005",
            Self::TomlError(_) => "LAYOUT006",
            Self::TomlSerError(_) => "LAYOUT007",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = LayoutError::invalid_dimensions("source height is zero");
        assert_eq!(err.code(), "LAYOUT001");
        assert!(err.to_string().contains("source height is zero"));

        let err = LayoutError::unknown_layout("three_column");
        assert_eq!(err.code(), "LAYOUT002");
        assert!(err.to_string().contains("three_column"));
    }

    #[test]
    fn test_error_display() {
        let err = LayoutError::invalid_template("two_column", "regions overlap at z 5");
        assert!(err.to_string().contains("two_column"));
        assert!(err.to_string().contains("z 5"));

        let err = LayoutError::contract_error("max_points must be at least 1");
        assert_eq!(err.code(), "LAYOUT004");
    }
}
