//! Fitted content
//!
//! The output of fitting is one [`FittedContent`] per region of the chosen
//! layout. Backends consume these without re-measuring anything.

use serde::{Deserialize, Serialize};

use crate::geometry::{PixelRect, PixelSize, Rect};

/// Render-ready payload for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedContent {
    /// Name of the region this content belongs to
    pub region_name: String,
    pub body: FittedBody,
}

/// Text or image payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FittedBody {
    Text {
        lines: Vec<String>,
        font_size_pt: u32,
        /// Whether any line was shortened to fit the budget
        truncated: bool,
    },
    Image {
        image_id: String,
        source: PixelSize,
        /// Portion of the source to show, in source pixels
        crop_rect: PixelRect,
        /// Where the crop lands on the canvas
        dest_rect: Rect,
        /// Source pixels to slide units
        scale: f64,
    },
}

impl FittedContent {
    /// Text content
    pub fn text(
        region_name: impl Into<String>,
        lines: Vec<String>,
        font_size_pt: u32,
        truncated: bool,
    ) -> Self {
        Self {
            region_name: region_name.into(),
            body: FittedBody::Text {
                lines,
                font_size_pt,
                truncated,
            },
        }
    }

    /// Text content with no lines, used for empty regions
    pub fn empty_text(region_name: impl Into<String>, font_size_pt: u32) -> Self {
        Self::text(region_name, Vec::new(), font_size_pt, false)
    }

    /// Lines of a text payload, `None` for images
    pub fn lines(&self) -> Option<&[String]> {
        match &self.body {
            FittedBody::Text { lines, .. } => Some(lines),
            FittedBody::Image { .. } => None,
        }
    }

    /// Font size of a text payload, `None` for images
    pub fn font_size_pt(&self) -> Option<u32> {
        match &self.body {
            FittedBody::Text { font_size_pt, .. } => Some(*font_size_pt),
            FittedBody::Image { .. } => None,
        }
    }

    /// Whether the payload is text with no lines
    pub fn is_empty_text(&self) -> bool {
        matches!(&self.body, FittedBody::Text { lines, .. } if lines.is_empty())
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.body, FittedBody::Text { truncated: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let content = FittedContent::empty_text("subtitle", 24);
        assert!(content.is_empty_text());
        assert_eq!(content.font_size_pt(), Some(24));
        assert!(!content.is_truncated());
    }

    #[test]
    fn test_image_body_has_no_lines() {
        let content = FittedContent {
            region_name: "image".to_string(),
            body: FittedBody::Image {
                image_id: "img-1".to_string(),
                source: PixelSize::new(1024, 768),
                crop_rect: PixelRect::new(0, 42, 1024, 683),
                dest_rect: Rect::new(0.5, 1.7, 7.398, 4.935),
                scale: 7.398 / 1024.0,
            },
        };
        assert!(content.lines().is_none());
        assert!(!content.is_empty_text());
    }

    #[test]
    fn test_body_serializes_with_type_tag() {
        let content = FittedContent::text("title", vec!["Hello".to_string()], 32, false);
        let json = serde_json::to_string(&content).unwrap();
        assert!(json.contains("\"type\":\"text\""));
    }
}
