//! Canonical marker form
//!
//! Writes records back out in the exact shape the parser reads, one block
//! per slide separated by a blank line:
//!
//! ```text
//! SLIDE 1 - OVERVIEW:
//! TITLE: Demo
//! SLIDE_TYPE: title_slide
//! MAIN_POINTS:
//! - First point
//! ```

use std::fmt::Write;

use slidefit_ast::SlideRecord;

/// Serialize records into canonical marker form
pub fn serialize(records: &[SlideRecord]) -> String {
    let mut out = String::new();

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_record(&mut out, record);
    }

    out
}

fn write_record(out: &mut String, record: &SlideRecord) {
    // Writing into a String cannot fail
    let _ = writeln!(out, "SLIDE {} - {}:", record.index, record.label);
    let _ = writeln!(out, "TITLE: {}", record.title);
    if let Some(ref theme) = record.theme_hint {
        let _ = writeln!(out, "THEME_SUGGESTION: {}", theme);
    }
    let _ = writeln!(out, "SLIDE_TYPE: {}", record.kind.tag());
    out.push_str("MAIN_POINTS:\n");
    for bullet in &record.bullets {
        let _ = writeln!(out, "- {}", bullet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidefit_ast::SlideKind;

    #[test]
    fn test_serialize_single_record() {
        let record = SlideRecord::new(1, "Demo")
            .with_label("OVERVIEW")
            .with_kind(SlideKind::TitleSlide)
            .with_bullet("Summary");

        assert_eq!(
            serialize(&[record]),
            "SLIDE 1 - OVERVIEW:\nTITLE: Demo\nSLIDE_TYPE: title_slide\nMAIN_POINTS:\n- Summary\n"
        );
    }

    #[test]
    fn test_serialize_separates_records() {
        let records = vec![
            SlideRecord::new(1, "A").with_theme_hint("dark"),
            SlideRecord::new(2, "B"),
        ];
        let text = serialize(&records);

        assert!(text.contains("THEME_SUGGESTION: dark\n"));
        assert!(text.contains("MAIN_POINTS:\n\nSLIDE 2 - :"));
        assert_eq!(text.matches("THEME_SUGGESTION").count(), 1);
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(serialize(&[]), "");
    }
}
