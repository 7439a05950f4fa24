//! Bullet prioritization
//!
//! When a region receives more bullets than it may show, each bullet is
//! scored and the best ones are kept. The default scorer is a heuristic:
//! shorter bullets and bullets mentioning a priority keyword score higher.
//! It is not a summarizer and makes no claim to pick the "best" points.

use crate::contract::TextConfig;

/// Scores one bullet; higher scores survive prioritization
pub trait BulletScorer {
    fn score(&self, bullet: &str) -> i64;
}

impl<F> BulletScorer for F
where
    F: Fn(&str) -> i64,
{
    fn score(&self, bullet: &str) -> i64 {
        self(bullet)
    }
}

/// Length plus keyword heuristic.
///
/// `score = max(0, 100 - chars) + weight * hits`, where `hits` counts the
/// distinct priority keywords found in the bullet (case-insensitive
/// substring match).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordLengthScorer {
    keywords: Vec<String>,
    weight: i64,
}

impl KeywordLengthScorer {
    pub fn new<I, S>(keywords: I, weight: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            weight,
        }
    }

    /// Scorer configured from the `[text]` section of a contract
    pub fn from_config(config: &TextConfig) -> Self {
        Self::new(&config.priority_keywords, config.keyword_weight)
    }

    /// Number of distinct keywords present in `bullet`
    pub fn keyword_hits(&self, bullet: &str) -> usize {
        let lowered = bullet.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .count()
    }
}

impl Default for KeywordLengthScorer {
    fn default() -> Self {
        Self::from_config(&TextConfig::default())
    }
}

impl BulletScorer for KeywordLengthScorer {
    fn score(&self, bullet: &str) -> i64 {
        let len = i64::try_from(bullet.chars().count()).unwrap_or(i64::MAX);
        let hits = i64::try_from(self.keyword_hits(bullet)).unwrap_or(i64::MAX);
        (100 - len).max(0) + self.weight.saturating_mul(hits)
    }
}

/// Keep the `max_points` best bullets, best first.
///
/// Bullets are ranked by descending score with a stable sort, so equal
/// scores keep source order. Inputs at or under the cap are returned as is.
pub fn prioritize<S>(bullets: &[String], max_points: usize, scorer: &S) -> Vec<String>
where
    S: BulletScorer + ?Sized,
{
    if bullets.len() <= max_points {
        return bullets.to_vec();
    }

    let mut ranked: Vec<(usize, i64)> = bullets
        .iter()
        .enumerate()
        .map(|(i, b)| (i, scorer.score(b)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(max_points)
        .map(|(i, _)| bullets[i].clone())
        .collect()
}
