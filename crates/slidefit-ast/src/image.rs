//! Image handles

use serde::{Deserialize, Serialize};

use crate::geometry::PixelSize;

/// A reference to an externally generated raster image
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle {
    /// Opaque identifier understood by the rendering backend
    pub id: String,
    pub width_px: u32,
    pub height_px: u32,
}

impl ImageHandle {
    pub fn new(id: impl Into<String>, width_px: u32, height_px: u32) -> Self {
        Self {
            id: id.into(),
            width_px,
            height_px,
        }
    }

    /// Source dimensions
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width_px, self.height_px)
    }
}
