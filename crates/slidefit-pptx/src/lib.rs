//! # slidefit-pptx
//!
//! PowerPoint (PPTX) output for resolved slides.
//!
//! [`PptxWriter`] is a [`DocumentSink`](slidefit_layout::DocumentSink):
//! hand it to [`SlideAssembler::assemble_into`](slidefit_layout::SlideAssembler::assemble_into)
//! and every slide is placed as free-standing shapes at the geometry of its
//! layout regions. Text keeps the fitted font size; images are embedded
//! whole and cropped with `a:srcRect`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use slidefit_layout::{NoImages, SlideAssembler};
//! use slidefit_pptx::PptxWriter;
//!
//! let mut writer = PptxWriter::default().with_title("Aurora");
//! SlideAssembler::new().assemble_into(raw, &NoImages, &mut writer)?;
//! std::fs::write("output.pptx", writer.generate()?)?;
//! ```

pub mod error;
pub mod writer;

// Re-exports
pub use error::{PptxError, Result};
pub use writer::PptxWriter;

/// PPTX-related constants
pub mod constants {
    /// EMU per inch (slide units are inches)
    pub const EMU_PER_INCH: i64 = 914_400;

    /// Font sizes in DrawingML are hundredths of a point
    pub const CENTIPOINTS_PER_POINT: u32 = 100;

    /// `a:srcRect` offsets are thousandths of a percent
    pub const SRC_RECT_FULL: u64 = 100_000;

    /// PresentationML namespace
    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML namespace
    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// Relationships namespace
    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Package relationships namespace
    pub const NS_PACKAGE_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// Slide relationship type
    pub const REL_TYPE_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    /// Slide layout relationship type
    pub const REL_TYPE_SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

    /// Slide master relationship type
    pub const REL_TYPE_SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

    /// Theme relationship type
    pub const REL_TYPE_THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

    /// Image relationship type
    pub const REL_TYPE_IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
}

/// Convert slide units (inches) to EMU
pub fn to_emu(inches: f64) -> i64 {
    (inches * constants::EMU_PER_INCH as f64).round() as i64
}
