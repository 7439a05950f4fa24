//! slidefit-layout - Layout selection and content fitting
//!
//! Takes parsed slide records and turns each one into a [`ResolvedSlide`]:
//! a layout from the built-in [`LayoutCatalog`], with every region of that
//! layout filled by fitted text or a cover-cropped image.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use slidefit_ast::ImageHandle;
//! use slidefit_layout::{LayoutName, SlideAssembler};
//!
//! let raw = "\
//! SLIDE 1 - INTRO:
//! TITLE: Aurora
//! SLIDE_TYPE: title_slide
//! MAIN_POINTS:
//! - Reports, faster
//!
//! SLIDE 2 - ARCHITECTURE:
//! TITLE: How it fits together
//! SLIDE_TYPE: architecture_slide
//! MAIN_POINTS:
//! - Three services behind one gateway
//! ";
//!
//! let mut images: HashMap<u32, ImageHandle> = HashMap::new();
//! images.insert(2, ImageHandle::new("arch", 1600, 900));
//!
//! let slides = SlideAssembler::new().assemble(raw, &images);
//! assert_eq!(slides[0].layout_name, LayoutName::TitleSlide);
//! assert_eq!(slides[1].layout_name, LayoutName::DiagramFocus);
//! assert!(slides.iter().all(|s| !s.degraded));
//! ```

pub mod assembler;
pub mod catalog;
pub mod contract;
pub mod cover;
pub mod error;
pub mod lookup;
pub mod resolved;
pub mod scoring;
pub mod selector;
pub mod sink;
pub mod text_fit;

pub use assembler::{Assembly, SlideAssembler};
pub use catalog::{LayoutCatalog, LayoutName, LayoutTemplate};
pub use contract::FitContract;
pub use cover::{fit_cover, fit_image, CoverFit};
pub use error::{LayoutError, Result};
pub use lookup::{ImageLookup, NoImages};
pub use resolved::ResolvedSlide;
pub use scoring::{prioritize, BulletScorer, KeywordLengthScorer};
pub use selector::select;
pub use sink::{CollectingSink, DocumentSink};
pub use text_fit::{TextFit, TextFitter};

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
