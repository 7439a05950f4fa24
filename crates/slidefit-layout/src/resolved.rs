//! Resolved slides
//!
//! A [`ResolvedSlide`] is the finished product of the pipeline for one
//! record: the record itself, the chosen layout, and one fitted payload for
//! every region of that layout, in region declaration order.

use serde::Serialize;
use slidefit_ast::{FittedContent, SlideRecord};
use slidefit_core::Diagnostic;

use crate::catalog::LayoutName;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSlide {
    pub record: SlideRecord,

    pub layout_name: LayoutName,

    /// One entry per region, keyed by `region_name`, in declaration order
    pub fitted: Vec<FittedContent>,

    /// Notes about degraded or shortened content on this slide
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,

    /// Whether some region fell back to a placeholder after an error
    pub degraded: bool,
}

impl ResolvedSlide {
    /// Slide index (same as the record's)
    pub fn index(&self) -> u32 {
        self.record.index
    }

    /// Fitted content for a region
    pub fn get(&self, region_name: &str) -> Option<&FittedContent> {
        self.fitted.iter().find(|f| f.region_name == region_name)
    }

    /// Region names in declaration order
    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.fitted.iter().map(|f| f.region_name.as_str())
    }
}
