//! FitContract configuration for layout and fitting.
//!
//! A FitContract holds the tunables of the fitting heuristics (point cap,
//! priority keywords, ellipsis) and the canvas size. Every field has a
//! default, so an empty TOML file is a valid contract.
//!
//! ```toml
//! [meta]
//! name = "Board deck"
//!
//! [canvas]
//! width = 13.33
//! height = 7.5
//!
//! [text]
//! max_points = 5
//! priority_keywords = ["key", "risk"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use slidefit_ast::{Canvas, SlideKind};

use crate::error::{LayoutError, Result};

/// FitContract configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitContract {
    /// Metadata about the contract
    #[serde(default)]
    pub meta: ContractMeta,

    /// Canvas size
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Text fitting tunables
    #[serde(default)]
    pub text: TextConfig,

    /// Image handling
    #[serde(default)]
    pub images: ImageConfig,
}

/// Contract metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractMeta {
    /// Display name
    #[serde(default = "default_name")]
    pub name: String,

    /// Locale code (e.g., "en-US", "it-IT")
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Contract version
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_name() -> String {
    "Default".to_string()
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Canvas dimensions in slide units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_width")]
    pub width: f64,

    #[serde(default = "default_canvas_height")]
    pub height: f64,
}

fn default_canvas_width() -> f64 {
    Canvas::WIDESCREEN.width
}
fn default_canvas_height() -> f64 {
    Canvas::WIDESCREEN.height
}

/// Text fitting tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Bullets kept per region when the region sets no cap of its own
    #[serde(default = "default_max_points")]
    pub max_points: usize,

    /// Words that make a bullet more likely to survive prioritization
    #[serde(default = "default_priority_keywords")]
    pub priority_keywords: Vec<String>,

    /// Score added per keyword present
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: i64,

    /// Marker appended to hard or word-boundary cuts
    #[serde(default = "default_ellipsis")]
    pub ellipsis: String,

    /// Glyph prefixed to body bullets when measuring the text block
    #[serde(default = "default_bullet_glyph")]
    pub bullet_glyph: String,
}

fn default_max_points() -> usize {
    4
}
fn default_priority_keywords() -> Vec<String> {
    ["key", "important", "critical", "main", "primary"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_keyword_weight() -> i64 {
    10
}
fn default_ellipsis() -> String {
    "...".to_string()
}
fn default_bullet_glyph() -> String {
    "•".to_string()
}

/// Image handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Slide kinds whose image is a diagram rather than an illustration
    #[serde(default = "default_diagram_kinds")]
    pub diagram_kinds: Vec<SlideKind>,
}

fn default_diagram_kinds() -> Vec<SlideKind> {
    vec![SlideKind::Architecture, SlideKind::Metrics, SlideKind::Roadmap]
}

impl Default for ContractMeta {
    fn default() -> Self {
        Self {
            name: default_name(),
            locale: default_locale(),
            version: default_version(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            max_points: default_max_points(),
            priority_keywords: default_priority_keywords(),
            keyword_weight: default_keyword_weight(),
            ellipsis: default_ellipsis(),
            bullet_glyph: default_bullet_glyph(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            diagram_kinds: default_diagram_kinds(),
        }
    }
}

impl FitContract {
    /// Load FitContract from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse FitContract from a TOML string and validate it
    pub fn from_toml_str(toml_content: &str) -> Result<Self> {
        let contract: FitContract = toml::from_str(toml_content)?;
        contract.validate()?;
        Ok(contract)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The configured canvas
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas.width, self.canvas.height)
    }

    /// Whether images on slides of this kind are diagrams
    pub fn is_diagram_kind(&self, kind: SlideKind) -> bool {
        self.images.diagram_kinds.contains(&kind)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !self.canvas().is_valid() {
            return Err(LayoutError::contract_error(format!(
                "canvas must have a positive finite size, got {} x {}",
                self.canvas.width, self.canvas.height
            )));
        }

        if self.text.max_points == 0 {
            return Err(LayoutError::contract_error(
                "text.max_points must be at least 1",
            ));
        }

        if let Some(empty) = self.text.priority_keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(LayoutError::contract_error(format!(
                "text.priority_keywords[{}] is empty",
                empty
            )));
        }

        Ok(())
    }
}
