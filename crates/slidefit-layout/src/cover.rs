//! Cover fitting for raster images
//!
//! "Cover" scales an image until it fills the destination completely and
//! crops whatever sticks out, keeping the crop centered. It never
//! letterboxes and never distorts.

use serde::{Deserialize, Serialize};
use slidefit_ast::{FittedBody, FittedContent, ImageHandle, LayoutRegion, PixelRect, PixelSize, Rect};

use crate::error::{LayoutError, Result};

/// Result of a cover fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverFit {
    /// Visible part of the source, in source pixels
    pub crop_rect: PixelRect,
    /// Destination on the canvas (echoed back)
    pub dest_rect: Rect,
    /// Slide units per source pixel
    pub scale: f64,
}

/// Compute the centered crop that makes `source` cover `dest`.
///
/// # Errors
///
/// [`LayoutError::InvalidDimensions`] if the source has a zero side or the
/// destination has a non-positive or non-finite side.
pub fn fit_cover(source: PixelSize, dest: Rect) -> Result<CoverFit> {
    if source.is_empty() {
        return Err(LayoutError::invalid_dimensions(format!(
            "source image is {}x{} px",
            source.width, source.height
        )));
    }
    let dest_ok = |v: f64| v.is_finite() && v > 0.0;
    if !dest_ok(dest.width) || !dest_ok(dest.height) {
        return Err(LayoutError::invalid_dimensions(format!(
            "destination is {} x {}",
            dest.width, dest.height
        )));
    }

    let src_w = f64::from(source.width);
    let src_h = f64::from(source.height);

    // Compare aspect ratios without dividing
    let source_wider = src_w * dest.height > dest.width * src_h;

    let (crop_rect, scale) = if source_wider {
        let scale = dest.height / src_h;
        let crop_w = clamp_px(dest.width / scale, source.width);
        let crop_x = (source.width - crop_w) / 2;
        (PixelRect::new(crop_x, 0, crop_w, source.height), scale)
    } else {
        let scale = dest.width / src_w;
        let crop_h = clamp_px(dest.height / scale, source.height);
        let crop_y = (source.height - crop_h) / 2;
        (PixelRect::new(0, crop_y, source.width, crop_h), scale)
    };

    Ok(CoverFit {
        crop_rect,
        dest_rect: dest,
        scale,
    })
}

/// Round to whole pixels, keeping the result within `1..=limit`
fn clamp_px(value: f64, limit: u32) -> u32 {
    let rounded = value.round();
    if rounded >= f64::from(limit) {
        limit
    } else if rounded < 1.0 {
        1
    } else {
        rounded as u32
    }
}

/// Cover-fit an image handle into a media region
pub fn fit_image(image: &ImageHandle, region: &LayoutRegion) -> Result<FittedContent> {
    let fit = fit_cover(image.size(), region.rect)?;

    Ok(FittedContent {
        region_name: region.name.clone(),
        body: FittedBody::Image {
            image_id: image.id.clone(),
            source: image.size(),
            crop_rect: fit.crop_rect,
            dest_rect: fit.dest_rect,
            scale: fit.scale,
        },
    })
}
