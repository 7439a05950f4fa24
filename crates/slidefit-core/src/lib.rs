//! slidefit-core - From generated text to slide records
//!
//! Core library for slidefit, providing the tolerant record parser, the
//! canonical serializer that writes records back in marker form, and the
//! diagnostics model shared by every later stage.
//!
//! # Example
//!
//! ```
//! use slidefit_core::{parse_with_diagnostics, serialize};
//!
//! let raw = "\
//! - stray bullet
//! SLIDE 1 - FEATURES:
//! TITLE: What it does
//! MAIN_POINTS:
//! - Parses loosely structured text
//! - Never fails on bad input
//! ";
//!
//! let output = parse_with_diagnostics(raw);
//! assert_eq!(output.records.len(), 1);
//! assert_eq!(output.records[0].bullets.len(), 2);
//! assert_eq!(output.diagnostics.len(), 1);
//!
//! let canonical = serialize(&output.records);
//! assert!(canonical.starts_with("SLIDE 1 - FEATURES:"));
//! ```

pub mod diagnostics;
pub mod parser;
pub mod serialize;

// Re-export main types and functions
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use parser::{parse, parse_with_diagnostics, ParseOutput, ParserState, RecordParser};
pub use serialize::serialize;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
