//! slidefit-ast - Slide data model
//!
//! This crate provides the value types shared by every stage of the
//! slidefit pipeline:
//!
//! - [`SlideRecord`] / [`SlideKind`]: one parsed slide, before layout
//! - [`Rect`], [`Canvas`], [`PixelSize`], [`PixelRect`]: geometry in slide
//!   units and in source-pixel space
//! - [`LayoutRegion`]: a named rectangle of a layout template
//! - [`FittedContent`]: the render-ready payload for one region
//! - [`ImageHandle`]: an externally generated raster and its dimensions
//!
//! # Example
//!
//! ```
//! use slidefit_ast::{SlideKind, SlideRecord};
//!
//! let record = SlideRecord::new(1, "Demo").with_kind(SlideKind::TitleSlide);
//! assert_eq!(record.kind.tag(), "title_slide");
//! assert!(record.bullets.is_empty());
//! ```

pub mod fitted;
pub mod geometry;
pub mod image;
pub mod record;
pub mod region;

pub use fitted::{FittedBody, FittedContent};
pub use geometry::{Canvas, PixelRect, PixelSize, Rect};
pub use image::ImageHandle;
pub use record::{SlideKind, SlideRecord};
pub use region::{Alignment, FontRange, LayoutRegion, RegionRole};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
