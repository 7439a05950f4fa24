//! Layout selection
//!
//! Maps a record and the kind of image available for it onto one of the
//! catalog layouts. The decision table is evaluated top to bottom and the
//! first matching row wins:
//!
//! | condition                                  | layout          |
//! |--------------------------------------------|-----------------|
//! | kind is `TitleSlide`                       | `title_slide`   |
//! | a diagram is available                     | `diagram_focus` |
//! | an image is available                      | `image_text`    |
//! | kind is `Features` or `Metrics`, 4+ bullets | `two_column`    |
//! | otherwise                                  | `title_content` |

use slidefit_ast::{SlideKind, SlideRecord};

use crate::catalog::LayoutName;

/// Bullet count from which feature and metric slides are split in two
pub const TWO_COLUMN_MIN_BULLETS: usize = 4;

/// Pick the layout for a record. Always returns a catalog layout.
pub fn select(record: &SlideRecord, has_image: bool, has_diagram: bool) -> LayoutName {
    if record.kind == SlideKind::TitleSlide {
        LayoutName::TitleSlide
    } else if has_diagram {
        LayoutName::DiagramFocus
    } else if has_image {
        LayoutName::ImageText
    } else if matches!(record.kind, SlideKind::Features | SlideKind::Metrics)
        && record.bullets.len() >= TWO_COLUMN_MIN_BULLETS
    {
        LayoutName::TwoColumn
    } else {
        LayoutName::TitleContent
    }
}
