//! Geometry in slide units and in source-pixel space
//!
//! Layout works in "slide units" (inches on the default 13.33 x 7.5 canvas);
//! backends map them to their own coordinate system. Raster crops work in
//! whole source pixels.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing slide-unit coordinates
pub const EPSILON: f64 = 1e-9;

/// An axis-aligned rectangle in slide units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`)
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area of the rectangle
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Width over height, `None` for a zero or negative height
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height > 0.0).then(|| self.width / self.height)
    }

    /// Whether all coordinates are finite and non-negative
    pub fn is_non_negative(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }

    /// Whether the interiors of two rectangles intersect.
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() - EPSILON
            && other.x < self.right() - EPSILON
            && self.y < other.bottom() - EPSILON
            && other.y < self.bottom() - EPSILON
    }
}

/// The fixed drawing surface every layout is computed against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in slide units
    pub width: f64,
    /// Height in slide units
    pub height: f64,
}

impl Canvas {
    /// 16:9 widescreen canvas (13.33 x 7.5)
    pub const WIDESCREEN: Canvas = Canvas {
        width: 13.33,
        height: 7.5,
    };

    /// 4:3 canvas (10 x 7.5)
    pub const STANDARD: Canvas = Canvas {
        width: 10.0,
        height: 7.5,
    };

    /// Create a canvas
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Whether the canvas has a usable, finite, positive size
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Whether `rect` lies entirely on the canvas
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.is_non_negative()
            && rect.right() <= self.width + EPSILON
            && rect.bottom() <= self.height + EPSILON
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

/// Dimensions of a raster image in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelSize {
    /// Create a pixel size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A rectangle in source-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl PixelRect {
    /// Create a pixel rectangle
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle lies within an image of the given size
    pub fn fits_within(&self, size: PixelSize) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(size.width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(size.height)
    }
}
