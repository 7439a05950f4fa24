//! Layout regions
//!
//! A region is a named rectangle of a layout template. Text regions carry a
//! character budget and a font range; media regions receive a cropped image.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Horizontal text alignment within a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// DrawingML paragraph alignment value
    pub fn as_drawingml(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
            Self::Justify => "just",
        }
    }
}

/// What a region is for, which decides where record content is routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionRole {
    /// Receives the slide title
    Title,
    /// Receives the first bullet
    Subtitle,
    /// Receives the bullets
    Body,
    /// Receives the image, if any
    Media,
    /// Receives the single most relevant bullet
    Caption,
}

impl RegionRole {
    /// Whether the region renders text
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Media)
    }
}

/// Inclusive font size bounds in points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontRange {
    pub min_pt: u32,
    pub max_pt: u32,
}

impl FontRange {
    /// Create a font range
    pub const fn new(min_pt: u32, max_pt: u32) -> Self {
        Self { min_pt, max_pt }
    }

    /// `max - min`
    pub fn span(&self) -> u32 {
        self.max_pt.saturating_sub(self.min_pt)
    }

    /// Whether `min <= max`
    pub fn is_valid(&self) -> bool {
        self.min_pt <= self.max_pt
    }

    /// Whether `size` lies within the bounds
    pub fn contains(&self, size: u32) -> bool {
        (self.min_pt..=self.max_pt).contains(&size)
    }
}

/// One named region of a layout template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRegion {
    /// Unique name within its template
    pub name: String,

    /// Position on the canvas
    pub rect: Rect,

    /// Stacking order, higher draws on top
    pub z_index: i32,

    #[serde(default)]
    pub alignment: Alignment,

    /// Character budget for text regions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_budget: Option<usize>,

    pub font_range: FontRange,

    pub role: RegionRole,

    /// Cap on the number of bullets this region receives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_points: Option<usize>,
}

impl LayoutRegion {
    /// Create a region with left alignment and no budget or point cap
    pub fn new(
        name: impl Into<String>,
        role: RegionRole,
        rect: Rect,
        z_index: i32,
        font_range: FontRange,
    ) -> Self {
        Self {
            name: name.into(),
            rect,
            z_index,
            alignment: Alignment::Left,
            text_budget: None,
            font_range,
            role,
            max_points: None,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_budget(mut self, budget: usize) -> Self {
        self.text_budget = Some(budget);
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }

    /// Whether the region renders text
    pub fn is_text(&self) -> bool {
        self.role.is_text()
    }
}
