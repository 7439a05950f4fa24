//! Text fitting
//!
//! Fitting a list of bullets into a text region happens in three steps:
//!
//! 1. keep at most `max_points` bullets (see [`crate::scoring`])
//! 2. shorten each bullet to the region's character budget
//! 3. pick a font size from the length of the resulting text block
//!
//! The font size is a coarse step function of the character count, not a
//! measurement of rendered glyphs. It never leaves the region's font range.

use slidefit_ast::{FittedContent, FontRange, LayoutRegion, RegionRole};

use crate::contract::TextConfig;
use crate::scoring::{prioritize, BulletScorer, KeywordLengthScorer};

/// Fitted text plus what was cut to get there
#[derive(Debug, Clone, PartialEq)]
pub struct TextFit {
    pub content: FittedContent,
    /// Bullets removed by the point cap
    pub dropped: usize,
    /// Whether any kept bullet was cut to the character budget
    pub shortened: bool,
}

/// Blocks shorter than this many characters get the largest font
pub const SHORT_BLOCK: usize = 50;
/// Upper bound of the "medium" bucket
pub const MEDIUM_BLOCK: usize = 150;
/// Upper bound of the "long" bucket; anything longer gets the smallest font
pub const LONG_BLOCK: usize = 300;

/// Font size for a text block of `len` characters.
///
/// `< 50` gives `max`, `< 150` gives `min + 0.7 * range`, `< 300` gives
/// `min + 0.4 * range` (both rounded down), anything longer gives `min`.
pub fn font_size_for(len: usize, range: FontRange) -> u32 {
    let min = f64::from(range.min_pt);
    let span = f64::from(range.span());

    let size = if len < SHORT_BLOCK {
        range.max_pt
    } else if len < MEDIUM_BLOCK {
        (min + 0.7 * span).floor() as u32
    } else if len < LONG_BLOCK {
        (min + 0.4 * span).floor() as u32
    } else {
        range.min_pt
    };

    size.clamp(range.min_pt, range.max_pt.max(range.min_pt))
}

/// Shorten `text` to at most `budget` characters plus `ellipsis`.
///
/// Within the first `budget` characters the cut is made, in order of
/// preference, right after the last `.` past 70% of the budget (no
/// ellipsis), at the last whitespace past 80% of the budget, or at the
/// budget itself. Returns the text and whether it was shortened.
pub fn truncate_to_budget(text: &str, budget: usize, ellipsis: &str) -> (String, bool) {
    if text.chars().count() <= budget {
        return (text.to_string(), false);
    }

    let head: Vec<char> = text.chars().take(budget).collect();
    let past = |pos: usize, ratio: f64| pos as f64 > budget as f64 * ratio;

    if let Some(pos) = head.iter().rposition(|&c| c == '.') {
        if past(pos, 0.7) {
            return (head[..=pos].iter().collect(), true);
        }
    }

    let cut = match head.iter().rposition(|c| c.is_whitespace()) {
        Some(pos) if past(pos, 0.8) => pos,
        _ => head.len(),
    };
    let kept: String = head[..cut].iter().collect();

    (format!("{}{}", kept.trim_end(), ellipsis), true)
}

/// Fits bullet lists into text regions
#[derive(Debug, Clone)]
pub struct TextFitter<S = KeywordLengthScorer> {
    scorer: S,
    max_points: usize,
    ellipsis: String,
    bullet_glyph: String,
}

impl Default for TextFitter {
    fn default() -> Self {
        Self::from_config(&TextConfig::default())
    }
}

impl TextFitter {
    /// Fitter with the default keyword scorer and tunables
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitter using the keyword scorer and tunables of a contract
    pub fn from_config(config: &TextConfig) -> Self {
        Self {
            scorer: KeywordLengthScorer::from_config(config),
            max_points: config.max_points,
            ellipsis: config.ellipsis.clone(),
            bullet_glyph: config.bullet_glyph.clone(),
        }
    }
}

impl<S: BulletScorer> TextFitter<S> {
    /// Swap the bullet scorer
    pub fn with_scorer<T: BulletScorer>(self, scorer: T) -> TextFitter<T> {
        TextFitter {
            scorer,
            max_points: self.max_points,
            ellipsis: self.ellipsis,
            bullet_glyph: self.bullet_glyph,
        }
    }

    /// Default point cap for regions without one
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Point cap that applies to `region`
    pub fn max_points_for(&self, region: &LayoutRegion) -> usize {
        region.max_points.unwrap_or(self.max_points)
    }

    /// Fit `bullets` into `region`.
    ///
    /// An empty list yields an empty text at the region's largest font.
    /// `truncated` is set when bullets were dropped or shortened.
    pub fn fit_text(&self, bullets: &[String], region: &LayoutRegion) -> FittedContent {
        self.fit_text_with_report(bullets, region).content
    }

    /// Like [`fit_text`](Self::fit_text), also saying which kind of
    /// truncation happened.
    pub fn fit_text_with_report(&self, bullets: &[String], region: &LayoutRegion) -> TextFit {
        let range = region.font_range;
        if bullets.is_empty() {
            return TextFit {
                content: FittedContent::empty_text(&region.name, range.max_pt),
                dropped: 0,
                shortened: false,
            };
        }

        let kept = prioritize(bullets, self.max_points_for(region), &self.scorer);
        let dropped = bullets.len() - kept.len();

        let mut shortened = false;
        let lines: Vec<String> = kept
            .into_iter()
            .map(|line| match region.text_budget {
                Some(budget) => {
                    let (line, cut) = truncate_to_budget(&line, budget, &self.ellipsis);
                    shortened |= cut;
                    line
                }
                None => line,
            })
            .collect();

        let block_len = self.rendered_len(&lines, region.role);
        let font_size_pt = font_size_for(block_len, range);

        let truncated = shortened || dropped > 0;

        TextFit {
            content: FittedContent::text(&region.name, lines, font_size_pt, truncated),
            dropped,
            shortened,
        }
    }

    /// Character count of the newline-joined block as it will be shown.
    /// Body lines carry a bullet glyph and a space.
    fn rendered_len(&self, lines: &[String], role: RegionRole) -> usize {
        let prefix = match role {
            RegionRole::Body => self.bullet_glyph.chars().count() + 1,
            _ => 0,
        };
        let text: usize = lines.iter().map(|l| l.chars().count() + prefix).sum();
        text + lines.len().saturating_sub(1)
    }
}
