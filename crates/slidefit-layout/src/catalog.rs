//! Layout catalog
//!
//! The fixed set of slide templates and their region geometry. A catalog
//! is built for one canvas and validated as a whole when it is built; once
//! built it is never mutated.
//!
//! Geometry uses a 0.5 margin on every side. Horizontal positions are
//! fractions of the content width (`canvas.width - 1.0`). Vertically, the
//! title band sits at a fixed distance from the top edge and body regions
//! extend down to the bottom margin.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use slidefit_ast::{Alignment, Canvas, FontRange, LayoutRegion, Rect, RegionRole};

use crate::error::{LayoutError, Result};

/// Margin on every side of the canvas
pub const MARGIN: f64 = 0.5;

/// Gap between the title band and the body
const TITLE_GAP: f64 = 0.2;

/// Names of the built-in layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutName {
    TitleSlide,
    TitleContent,
    TwoColumn,
    ImageText,
    DiagramFocus,
}

impl LayoutName {
    /// Every layout, in catalog order
    pub const ALL: [LayoutName; 5] = [
        LayoutName::TitleSlide,
        LayoutName::TitleContent,
        LayoutName::TwoColumn,
        LayoutName::ImageText,
        LayoutName::DiagramFocus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TitleSlide => "title_slide",
            Self::TitleContent => "title_content",
            Self::TwoColumn => "two_column",
            Self::ImageText => "image_text",
            Self::DiagramFocus => "diagram_focus",
        }
    }

    fn position(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for LayoutName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutName {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| LayoutError::unknown_layout(s))
    }
}

/// One layout: its name and its regions in declaration order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutTemplate {
    pub name: LayoutName,
    pub regions: Vec<LayoutRegion>,
}

impl LayoutTemplate {
    /// Find a region by name
    pub fn region(&self, name: &str) -> Option<&LayoutRegion> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Region names in declaration order
    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.name.as_str())
    }

    /// Regions that receive a given role
    pub fn regions_with_role(&self, role: RegionRole) -> impl Iterator<Item = &LayoutRegion> {
        self.regions.iter().filter(move |r| r.role == role)
    }

    fn validate(&self, canvas: Canvas) -> Result<()> {
        let fail = |reason: String| Err(LayoutError::invalid_template(self.name.as_str(), reason));

        if self.regions.is_empty() {
            return fail("template has no regions".to_string());
        }

        for (i, region) in self.regions.iter().enumerate() {
            if !canvas.contains(&region.rect) {
                return fail(format!(
                    "region '{}' at {:?} is outside the {} x {} canvas",
                    region.name, region.rect, canvas.width, canvas.height
                ));
            }
            if region.rect.width <= 0.0 || region.rect.height <= 0.0 {
                return fail(format!("region '{}' has an empty rectangle", region.name));
            }
            if region.font_range.min_pt == 0 || !region.font_range.is_valid() {
                return fail(format!(
                    "region '{}' has invalid font range {}-{}",
                    region.name, region.font_range.min_pt, region.font_range.max_pt
                ));
            }

            for other in &self.regions[i + 1..] {
                if other.name == region.name {
                    return fail(format!("duplicate region name '{}'", region.name));
                }
                if region.rect.overlaps(&other.rect) && region.z_index == other.z_index {
                    return fail(format!(
                        "regions '{}' and '{}' overlap at z {}",
                        region.name, other.name, region.z_index
                    ));
                }
            }
        }

        Ok(())
    }
}

/// The validated, read-only set of layout templates for one canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutCatalog {
    canvas: Canvas,
    templates: Vec<LayoutTemplate>,
}

static GLOBAL: Lazy<Arc<LayoutCatalog>> =
    Lazy::new(|| match LayoutCatalog::new(Canvas::default()) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => panic!("built-in layout catalog is invalid: {e}"),
    });

impl LayoutCatalog {
    /// Build and validate the catalog for a canvas
    pub fn new(canvas: Canvas) -> Result<Self> {
        if !canvas.is_valid() {
            return Err(LayoutError::invalid_template(
                "*",
                format!("canvas {} x {} is not usable", canvas.width, canvas.height),
            ));
        }

        let templates: Vec<LayoutTemplate> = LayoutName::ALL
            .into_iter()
            .map(|name| LayoutTemplate {
                name,
                regions: build_regions(name, canvas),
            })
            .collect();

        for template in &templates {
            template.validate(canvas)?;
        }

        Ok(Self { canvas, templates })
    }

    /// The process-wide catalog for the default 13.33 x 7.5 canvas.
    ///
    /// # Panics
    ///
    /// On first use, if the built-in geometry fails validation.
    pub fn global() -> &'static LayoutCatalog {
        &GLOBAL
    }

    /// Another handle on [`global`](Self::global), without copying it
    pub fn shared() -> Arc<LayoutCatalog> {
        Arc::clone(&GLOBAL)
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Template for a layout
    pub fn get(&self, name: LayoutName) -> &LayoutTemplate {
        &self.templates[name.position()]
    }

    /// Template for a layout given by its string name
    pub fn get_by_name(&self, name: &str) -> Result<&LayoutTemplate> {
        name.parse::<LayoutName>().map(|name| self.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = LayoutName> + '_ {
        self.templates.iter().map(|t| t.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayoutTemplate> {
        self.templates.iter()
    }
}

fn region_at(
    name: &str,
    role: RegionRole,
    rect: Rect,
    z_index: i32,
    (min_pt, max_pt): (u32, u32),
    alignment: Alignment,
) -> LayoutRegion {
    LayoutRegion::new(name, role, rect, z_index, FontRange::new(min_pt, max_pt))
        .with_alignment(alignment)
}

fn build_regions(name: LayoutName, canvas: Canvas) -> Vec<LayoutRegion> {
    let content_w = canvas.width - 2.0 * MARGIN;
    let content_h = canvas.height - 2.0 * MARGIN;

    // Standard title band and the body area below it
    let title = region_at(
        "title",
        RegionRole::Title,
        Rect::new(MARGIN, MARGIN, content_w, 1.0),
        10,
        (24, 32),
        Alignment::Left,
    );
    let body_top = MARGIN + 1.0 + TITLE_GAP;
    let body_h = content_h - 1.0 - TITLE_GAP;

    match name {
        LayoutName::TitleSlide => vec![
            region_at(
                "title",
                RegionRole::Title,
                Rect::new(MARGIN, 2.0, content_w, 1.5),
                10,
                (36, 48),
                Alignment::Center,
            ),
            region_at(
                "subtitle",
                RegionRole::Subtitle,
                Rect::new(MARGIN, 4.0, content_w, 1.0),
                10,
                (18, 24),
                Alignment::Center,
            ),
        ],

        LayoutName::TitleContent => vec![
            title,
            region_at(
                "content",
                RegionRole::Body,
                Rect::new(MARGIN, body_top, content_w, body_h),
                5,
                (14, 18),
                Alignment::Left,
            )
            .with_budget(500),
        ],

        LayoutName::TwoColumn => {
            let gutter = 0.2;
            let column_w = (content_w - gutter) / 2.0;
            vec![
                title,
                region_at(
                    "left_content",
                    RegionRole::Body,
                    Rect::new(MARGIN, body_top, column_w, body_h),
                    5,
                    (12, 16),
                    Alignment::Left,
                )
                .with_budget(250),
                region_at(
                    "right_content",
                    RegionRole::Body,
                    Rect::new(
                        MARGIN + content_w / 2.0 + gutter / 2.0,
                        body_top,
                        column_w,
                        body_h,
                    ),
                    5,
                    (12, 16),
                    Alignment::Left,
                )
                .with_budget(250),
            ]
        }

        LayoutName::ImageText => vec![
            title,
            region_at(
                "image",
                RegionRole::Media,
                Rect::new(MARGIN, body_top, content_w * 0.6, body_h),
                3,
                (12, 16),
                Alignment::Center,
            ),
            region_at(
                "text_content",
                RegionRole::Body,
                Rect::new(
                    MARGIN + content_w * 0.65,
                    body_top,
                    content_w * 0.35 - 0.1,
                    body_h,
                ),
                5,
                (12, 16),
                Alignment::Left,
            )
            .with_budget(300)
            .with_max_points(3),
        ],

        LayoutName::DiagramFocus => {
            let inset = 1.0;
            let caption_h = 0.5;
            vec![
                region_at(
                    "title",
                    RegionRole::Title,
                    Rect::new(MARGIN, MARGIN, content_w, 0.8),
                    10,
                    (20, 28),
                    Alignment::Center,
                ),
                region_at(
                    "diagram",
                    RegionRole::Media,
                    Rect::new(
                        MARGIN + inset,
                        MARGIN + inset,
                        content_w - 2.0 * inset,
                        content_h - 2.0 * inset,
                    ),
                    3,
                    (10, 14),
                    Alignment::Center,
                ),
                region_at(
                    "caption",
                    RegionRole::Caption,
                    Rect::new(
                        MARGIN,
                        canvas.height - MARGIN - 0.6,
                        content_w,
                        caption_h,
                    ),
                    5,
                    (10, 14),
                    Alignment::Center,
                )
                .with_budget(100)
                .with_max_points(1),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_catalog_has_every_layout() {
        let catalog = LayoutCatalog::global();
        let names: Vec<_> = catalog.names().collect();

        assert_eq!(names, LayoutName::ALL.to_vec());
        assert_eq!(catalog.canvas(), Canvas::WIDESCREEN);
    }

    #[test]
    fn test_region_names_in_declaration_order() {
        let catalog = LayoutCatalog::global();

        let names: Vec<_> = catalog.get(LayoutName::TwoColumn).region_names().collect();
        assert_eq!(names, vec!["title", "left_content", "right_content"]);

        let names: Vec<_> = catalog.get(LayoutName::DiagramFocus).region_names().collect();
        assert_eq!(names, vec!["title", "diagram", "caption"]);
    }

    #[test]
    fn test_title_content_geometry() {
        let template = LayoutCatalog::global().get(LayoutName::TitleContent);
        let content = template.region("content").unwrap();

        assert!((content.rect.x - 0.5).abs() < 1e-9);
        assert!((content.rect.y - 1.7).abs() < 1e-9);
        assert!((content.rect.width - 12.33).abs() < 1e-9);
        assert!((content.rect.height - 5.3).abs() < 1e-9);
        assert_eq!(content.text_budget, Some(500));
        assert_eq!(content.font_range, FontRange::new(14, 18));
    }

    #[test]
    fn test_two_columns_do_not_touch() {
        let template = LayoutCatalog::global().get(LayoutName::TwoColumn);
        let left = template.region("left_content").unwrap();
        let right = template.region("right_content").unwrap();

        assert!((right.rect.x - left.rect.right() - 0.2).abs() < 1e-9);
        assert!((right.rect.right() - 12.83).abs() < 1e-9);
        assert!(!left.rect.overlaps(&right.rect));
    }

    #[test]
    fn test_image_text_caps_points() {
        let template = LayoutCatalog::global().get(LayoutName::ImageText);

        assert_eq!(template.region("text_content").unwrap().max_points, Some(3));
        assert_eq!(template.regions_with_role(RegionRole::Media).count(), 1);
    }

    #[test]
    fn test_get_by_name() {
        let catalog = LayoutCatalog::global();

        assert_eq!(
            catalog.get_by_name("image_text").unwrap().name,
            LayoutName::ImageText
        );

        let err = catalog.get_by_name("three_column").unwrap_err();
        assert_eq!(err.code(), "LAYOUT002");
    }

    #[test]
    fn test_layout_name_round_trip() {
        for name in LayoutName::ALL {
            assert_eq!(name.as_str().parse::<LayoutName>().unwrap(), name);
        }
    }

    #[test]
    fn test_geometry_scales_with_canvas() {
        let catalog = LayoutCatalog::new(Canvas::STANDARD).unwrap();
        let content = catalog.get(LayoutName::TitleContent).region("content").unwrap();

        assert!((content.rect.width - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_small_canvas_fails_fast() {
        let err = LayoutCatalog::new(Canvas::new(4.0, 3.0)).unwrap_err();
        assert_eq!(err.code(), "LAYOUT003");

        assert!(LayoutCatalog::new(Canvas::new(0.0, 7.5)).is_err());
    }

    #[test]
    fn test_validation_rejects_overlap_at_same_z() {
        let region = |name: &str, x: f64| {
            region_at(
                name,
                RegionRole::Body,
                Rect::new(x, 1.0, 3.0, 1.0),
                5,
                (12, 16),
                Alignment::Left,
            )
        };
        let template = LayoutTemplate {
            name: LayoutName::TwoColumn,
            regions: vec![region("a", 0.5), region("b", 2.0)],
        };

        let err = template.validate(Canvas::default()).unwrap_err();
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn test_validation_rejects_duplicate_names_and_bad_fonts() {
        let ok = region_at(
            "x",
            RegionRole::Body,
            Rect::new(0.5, 0.5, 1.0, 1.0),
            1,
            (12, 16),
            Alignment::Left,
        );
        let mut dup = ok.clone();
        dup.rect = Rect::new(5.0, 5.0, 1.0, 1.0);

        let template = LayoutTemplate {
            name: LayoutName::TitleContent,
            regions: vec![ok.clone(), dup],
        };
        assert!(template.validate(Canvas::default()).is_err());

        let mut zero_font = ok;
        zero_font.font_range = FontRange::new(0, 16);
        let template = LayoutTemplate {
            name: LayoutName::TitleContent,
            regions: vec![zero_font],
        };
        assert!(template.validate(Canvas::default()).is_err());
    }
}
