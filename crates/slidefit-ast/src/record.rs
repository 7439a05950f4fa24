//! Slide records
//!
//! A [`SlideRecord`] is one slide's worth of structured data as recovered
//! from generated text, before any layout decision has been made.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared kind of a slide.
///
/// The string tags are the ones emitted after `SLIDE_TYPE:` by the text
/// generator. Lookup is case-sensitive and anything unknown becomes
/// [`SlideKind::Content`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SlideKind {
    /// Opening slide (large centered title)
    #[serde(rename = "title_slide")]
    TitleSlide,

    /// System / technical architecture
    #[serde(rename = "architecture_slide")]
    Architecture,

    /// Feature overview
    #[serde(rename = "features_slide")]
    Features,

    /// Quality or business metrics
    #[serde(rename = "metrics_slide")]
    Metrics,

    /// Roadmap / future work
    #[serde(rename = "roadmap_slide")]
    Roadmap,

    /// Plain title and bullets
    #[default]
    #[serde(rename = "content_slide")]
    Content,
}

impl SlideKind {
    /// Every kind, in declaration order
    pub const ALL: [SlideKind; 6] = [
        SlideKind::TitleSlide,
        SlideKind::Architecture,
        SlideKind::Features,
        SlideKind::Metrics,
        SlideKind::Roadmap,
        SlideKind::Content,
    ];

    /// The `SLIDE_TYPE:` tag for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            Self::TitleSlide => "title_slide",
            Self::Architecture => "architecture_slide",
            Self::Features => "features_slide",
            Self::Metrics => "metrics_slide",
            Self::Roadmap => "roadmap_slide",
            Self::Content => "content_slide",
        }
    }

    /// Look up a kind by its exact tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Look up a kind by tag, coercing unknown tags to `Content`
    pub fn from_tag_or_default(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_default()
    }
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One parsed slide.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlideRecord {
    /// 1-based position in the source text (order of appearance)
    pub index: u32,

    /// Text following `SLIDE <n> -` in the marker line
    #[serde(default)]
    pub label: String,

    /// Slide title (last `TITLE:` wins)
    pub title: String,

    /// Declared slide kind
    #[serde(default)]
    pub kind: SlideKind,

    /// Bullet points in source order
    #[serde(default)]
    pub bullets: Vec<String>,

    /// Free-form theme name, passed through to external theming
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_hint: Option<String>,
}

impl SlideRecord {
    /// Create a record with a title and no bullets
    pub fn new(index: u32, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the marker label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the slide kind
    pub fn with_kind(mut self, kind: SlideKind) -> Self {
        self.kind = kind;
        self
    }

    /// Append one bullet
    pub fn with_bullet(mut self, bullet: impl Into<String>) -> Self {
        self.bullets.push(bullet.into());
        self
    }

    /// Replace all bullets
    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }

    /// Set the theme hint
    pub fn with_theme_hint(mut self, theme: impl Into<String>) -> Self {
        self.theme_hint = Some(theme.into());
        self
    }

    /// Whether this is the opening slide of a deck
    pub fn is_title_slide(&self) -> bool {
        self.kind == SlideKind::TitleSlide
    }
}
