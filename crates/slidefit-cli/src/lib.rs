//! slidefit CLI - Command-line interface library
//!
//! This library provides the CLI functionality for slidefit:
//! - Parse: show the records found in generated slide text
//! - Layouts: list the layout catalog for a canvas
//! - Assemble: lay out and fit a deck, as JSON or PPTX
//!
//! # Binary Usage
//!
//! ```bash
//! # Inspect what the parser made of a file
//! slidefit parse deck.txt --format json
//!
//! # Fit a deck with generated images into a PowerPoint file
//! slidefit assemble deck.txt --images images.toml --format pptx -o deck.pptx
//! ```

pub mod app;
pub mod manifest;

// Re-export main entry point and types
pub use app::{assemble_command, describe_catalog, layouts_command, parse_command};
pub use app::{run_cli, AssembleFormat, OutputFormat};
pub use manifest::{ImageManifest, LoadedImage, ManifestEntry};
