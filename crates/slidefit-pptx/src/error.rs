//! Error types for PPTX output.

use thiserror::Error;

/// Result type for PPTX operations
pub type Result<T> = std::result::Result<T, PptxError>;

/// Errors that can occur while writing a PPTX package
#[derive(Error, Debug)]
pub enum PptxError {
    /// A slide references an image whose bytes were never added
    #[error("Missing media '{id}' on slide {slide}")]
    MissingMedia { id: String, slide: u32 },

    /// Media with a content type PowerPoint cannot embed
    #[error("Unsupported media type '{content_type}' for '{id}'")]
    UnsupportedMedia { id: String, content_type: String },

    /// Fitted content names a region the layout does not have
    #[error("Unknown region '{region}' in layout {layout}")]
    UnknownRegion { region: String, layout: String },

    /// ZIP archive error
    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PptxError {
    /// Create a missing media error
    pub fn missing_media(id: impl Into<String>, slide: u32) -> Self {
        Self::MissingMedia {
            id: id.into(),
            slide,
        }
    }

    /// Create an unsupported media error
    pub fn unsupported_media(id: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::UnsupportedMedia {
            id: id.into(),
            content_type: content_type.into(),
        }
    }

    /// Create an unknown region error
    pub fn unknown_region(region: impl Into<String>, layout: impl Into<String>) -> Self {
        Self::UnknownRegion {
            region: region.into(),
            layout: layout.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingMedia { .. } => "PPTX001",
            Self::UnsupportedMedia { .. } => "PPTX002",
            Self::UnknownRegion { .. } => "PPTX003",
            Self::ZipError(_) => "PPTX004",
            Self::IoError(_) => "PPTX005",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PptxError::missing_media("hero", 3);
        assert_eq!(err.code(), "PPTX001");
        assert!(err.to_string().contains("hero"));
        assert!(err.to_string().contains('3'));

        let err = PptxError::unsupported_media("logo", "image/svg+xml");
        assert_eq!(err.code(), "PPTX002");
        assert!(err.to_string().contains("image/svg+xml"));
    }

    #[test]
    fn test_error_display() {
        let err = PptxError::unknown_region("sidebar", "title_content");
        assert!(err.to_string().contains("sidebar"));
        assert!(err.to_string().contains("title_content"));

        let err = PptxError::from(std::io::Error::other("disk full"));
        assert_eq!(err.code(), "PPTX005");
    }
}
