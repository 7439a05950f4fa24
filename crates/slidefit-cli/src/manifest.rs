//! Image manifest
//!
//! Maps slide indices to image files:
//!
//! ```toml
//! [[image]]
//! slide = 2
//! path = "architecture.png"
//!
//! [[image]]
//! slide = 4
//! path = "report.jpg"
//! width = 1024   # optional, read from the file when absent
//! height = 768
//! ```
//!
//! Relative paths are resolved against the manifest's directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use slidefit_ast::ImageHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageManifest {
    #[serde(default, rename = "image")]
    pub images: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    /// 1-based slide index
    pub slide: u32,

    pub path: PathBuf,

    /// Image id; defaults to `slide<N>`
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,
}

/// An image ready for assembly, with its bytes for embedding
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub handle: ImageHandle,
    pub path: PathBuf,
    /// MIME type, when the format could be determined
    pub content_type: Option<&'static str>,
}

impl ImageManifest {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid image manifest")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read image manifest: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse image manifest: {}", path.display()))
    }

    /// Resolve every entry against `base` and read missing dimensions.
    ///
    /// A missing file is an error. A file whose dimensions cannot be read
    /// is kept with a 0x0 size, so the slide degrades instead of aborting
    /// the run.
    pub fn load(&self, base: &Path) -> Result<BTreeMap<u32, LoadedImage>> {
        let mut loaded = BTreeMap::new();

        for entry in &self.images {
            let path = if entry.path.is_absolute() {
                entry.path.clone()
            } else {
                base.join(&entry.path)
            };

            if !path.exists() {
                anyhow::bail!(
                    "Image for slide {} not found: {}",
                    entry.slide,
                    path.display()
                );
            }

            let (width, height) = match (entry.width, entry.height) {
                (Some(w), Some(h)) => (w, h),
                _ => match image::image_dimensions(&path) {
                    Ok(size) => size,
                    Err(e) => {
                        warn!(slide = entry.slide, path = %path.display(), "unreadable image: {}", e);
                        (0, 0)
                    }
                },
            };

            let content_type = image::ImageFormat::from_path(&path)
                .ok()
                .map(|format| format.to_mime_type());

            let id = entry
                .id
                .clone()
                .unwrap_or_else(|| format!("slide{}", entry.slide));

            debug!(slide = entry.slide, %id, width, height, "image registered");

            if loaded
                .insert(
                    entry.slide,
                    LoadedImage {
                        handle: ImageHandle::new(id, width, height),
                        path,
                        content_type,
                    },
                )
                .is_some()
            {
                warn!(slide = entry.slide, "later manifest entry replaces earlier image");
            }
        }

        Ok(loaded)
    }
}

/// Handles only, for [`slidefit_layout::ImageLookup`]
pub fn handles(images: &BTreeMap<u32, LoadedImage>) -> BTreeMap<u32, ImageHandle> {
    images
        .iter()
        .map(|(&slide, image)| (slide, image.handle.clone()))
        .collect()
}
