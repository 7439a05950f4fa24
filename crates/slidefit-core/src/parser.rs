//! Slide record parser
//!
//! This module turns the loosely structured text produced by a language
//! model into [`SlideRecord`] values.
//!
//! # Recognized lines
//!
//! - Slide marker: `SLIDE 3 - ARCHITECTURE:` (emphasis such as `**` or a
//!   leading `##` is tolerated)
//! - Header fields: `TITLE:`, `THEME_SUGGESTION:`, `SLIDE_TYPE:`
//! - `MAIN_POINTS:` followed by bullets starting with `-`, `*` or `•`
//!
//! Anything else is ignored. The parser never fails; odd input is reported
//! as [`Diagnostic`]s instead.
//!
//! # Example
//!
//! ```
//! use slidefit_ast::SlideKind;
//! use slidefit_core::parser;
//!
//! let input = "SLIDE 1 - OVERVIEW:\nTITLE: Demo\nSLIDE_TYPE: title_slide\n";
//! let records = parser::parse(input);
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].title, "Demo");
//! assert_eq!(records[0].kind, SlideKind::TitleSlide);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use slidefit_ast::{SlideKind, SlideRecord};
use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics};

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^SLIDE\s+(\d+)\s*[-–]\s*(.*?)\s*:?\s*$").expect("marker pattern is valid")
});

static UNKNOWN_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_ ]*:").expect("field pattern is valid"));

/// Current state of the line scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParserState {
    /// No slide is open; fields and bullets are dropped
    Seeking,
    /// A slide marker was seen; header fields are being read
    InTitle,
    /// Reading bullets of the open slide
    InBullets,
    /// Input is exhausted; further lines are ignored
    Idle,
}

/// What a single line means, independent of state
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    Marker { label: String },
    Title(String),
    Theme(String),
    SlideType(String),
    MainPoints,
    Bullet(String),
    UnknownMarker(String),
    Other,
}

impl LineKind {
    fn describe(&self) -> &'static str {
        match self {
            Self::Marker { .. } => "slide marker",
            Self::Title(_) => "TITLE",
            Self::Theme(_) => "THEME_SUGGESTION",
            Self::SlideType(_) => "SLIDE_TYPE",
            Self::MainPoints => "MAIN_POINTS",
            Self::Bullet(_) => "bullet",
            Self::UnknownMarker(_) => "marker",
            Self::Other => "text",
        }
    }
}

/// Record mutation requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Open { label: String },
    SetTitle(String),
    SetTheme(String),
    SetKind(String),
    AppendBullet(String),
    Orphan(&'static str),
    Flag(String),
    Ignore,
}

/// A raw line together with its emphasis-stripped form
struct Line<'a> {
    raw: &'a str,
    clean: String,
}

impl<'a> Line<'a> {
    fn new(raw: &'a str) -> Self {
        let raw = raw.trim();
        let clean = raw.replace('*', "").replace("__", "");
        let clean = clean.trim_start_matches('#').trim().to_string();
        Self { raw, clean }
    }
}

type Classifier = fn(&Line<'_>) -> Option<LineKind>;

/// Line classifiers, tried in order; the first match wins
const CLASSIFIERS: [Classifier; 8] = [
    classify_glyph_bullet,
    classify_marker,
    classify_title,
    classify_theme,
    classify_slide_type,
    classify_main_points,
    classify_bullet,
    classify_unknown_marker,
];

fn classify(line: &Line<'_>) -> LineKind {
    CLASSIFIERS
        .iter()
        .find_map(|classifier| classifier(line))
        .unwrap_or(LineKind::Other)
}

fn classify_marker(line: &Line<'_>) -> Option<LineKind> {
    MARKER_RE.captures(&line.clean).map(|caps| LineKind::Marker {
        label: caps
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    })
}

fn field_value<'l>(line: &'l Line<'_>, name: &str) -> Option<&'l str> {
    line.clean.strip_prefix(name).map(str::trim)
}

fn classify_title(line: &Line<'_>) -> Option<LineKind> {
    field_value(line, "TITLE:").map(|v| LineKind::Title(v.to_string()))
}

fn classify_theme(line: &Line<'_>) -> Option<LineKind> {
    field_value(line, "THEME_SUGGESTION:").map(|v| LineKind::Theme(v.to_string()))
}

fn classify_slide_type(line: &Line<'_>) -> Option<LineKind> {
    field_value(line, "SLIDE_TYPE:").map(|v| LineKind::SlideType(v.to_string()))
}

fn classify_main_points(line: &Line<'_>) -> Option<LineKind> {
    field_value(line, "MAIN_POINTS:").map(|_| LineKind::MainPoints)
}

fn classify_bullet(line: &Line<'_>) -> Option<LineKind> {
    let rest = line.raw.strip_prefix("**").unwrap_or(line.raw);
    let mut chars = rest.chars();
    let glyph = chars.next()?;
    let after = chars.as_str();

    let body = match glyph {
        '•' => after,
        '-' | '*' if after.is_empty() || after.starts_with(char::is_whitespace) => after,
        _ => return None,
    };

    Some(LineKind::Bullet(clean_bullet(body)))
}

/// A glyph and whitespace at the very start make a bullet, whatever the
/// text says (`* TITLE: x` is a bullet, not a field)
fn classify_glyph_bullet(line: &Line<'_>) -> Option<LineKind> {
    let mut chars = line.raw.chars();
    if !matches!(chars.next()?, '-' | '*' | '•') {
        return None;
    }
    if !chars.as_str().starts_with(char::is_whitespace) {
        return None;
    }
    classify_bullet(line)
}

fn classify_unknown_marker(line: &Line<'_>) -> Option<LineKind> {
    UNKNOWN_MARKER_RE
        .find(&line.clean)
        .map(|m| LineKind::UnknownMarker(m.as_str().trim_end_matches(':').to_string()))
}

/// Strip emphasis from bullet text and collapse interior whitespace
fn clean_bullet(text: &str) -> String {
    let text = text.replace('*', "").replace("__", "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The state transition table
fn transition(state: ParserState, line: LineKind) -> (ParserState, Action) {
    use LineKind as L;
    use ParserState as S;

    match (state, line) {
        (S::Idle, _) => (S::Idle, Action::Ignore),

        (_, L::Marker { label }) => (S::InTitle, Action::Open { label }),
        (s, L::Other) => (s, Action::Ignore),
        (s, L::UnknownMarker(name)) => (s, Action::Flag(name)),

        (S::Seeking, other) => (S::Seeking, Action::Orphan(other.describe())),

        (s, L::Title(title)) => (s, Action::SetTitle(title)),
        (s, L::Theme(theme)) => (s, Action::SetTheme(theme)),
        (s, L::SlideType(tag)) => (s, Action::SetKind(tag)),
        (_, L::MainPoints) => (S::InBullets, Action::Ignore),
        (_, L::Bullet(text)) => (S::InBullets, Action::AppendBullet(text)),
    }
}

/// Records and diagnostics from one parse pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseOutput {
    pub records: Vec<SlideRecord>,
    pub diagnostics: Diagnostics,
}

/// Line-at-a-time slide record parser
///
/// Feed lines with [`RecordParser::feed_line`] and call
/// [`RecordParser::finish`] at end of input to flush the last record.
#[derive(Debug)]
pub struct RecordParser {
    state: ParserState,
    current: Option<SlideRecord>,
    title_set: bool,
    records: Vec<SlideRecord>,
    diagnostics: Diagnostics,
    line_no: usize,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Seeking,
            current: None,
            title_set: false,
            records: Vec::new(),
            diagnostics: Diagnostics::new(),
            line_no: 0,
        }
    }

    /// Current scanner state
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Records flushed so far
    pub fn records(&self) -> &[SlideRecord] {
        &self.records
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Process one line of input
    pub fn feed_line(&mut self, line: &str) {
        if self.state == ParserState::Idle {
            return;
        }
        self.line_no += 1;

        let kind = classify(&Line::new(line));
        let (next, action) = transition(self.state, kind);
        self.apply(action);
        self.state = next;
    }

    /// Flush the open record and stop accepting input
    pub fn finish(&mut self) {
        if self.state == ParserState::Idle {
            return;
        }
        self.flush();
        self.state = ParserState::Idle;
        debug!(
            records = self.records.len(),
            diagnostics = self.diagnostics.len(),
            "parse finished"
        );
    }

    /// Finish and return everything collected
    pub fn into_output(mut self) -> ParseOutput {
        self.finish();
        ParseOutput {
            records: self.records,
            diagnostics: self.diagnostics,
        }
    }

    fn current_index(&self) -> Option<u32> {
        self.current.as_ref().map(|r| r.index)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        let mut diagnostic = diagnostic.with_line(self.line_no);
        if let Some(index) = self.current_index() {
            diagnostic = diagnostic.with_slide(index);
        }
        self.diagnostics.push(diagnostic);
    }

    fn flush(&mut self) {
        if let Some(record) = self.current.take() {
            self.records.push(record);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Open { label } => {
                self.flush();
                let index = u32::try_from(self.records.len() + 1).unwrap_or(u32::MAX);
                self.current = Some(SlideRecord::new(index, "").with_label(label));
                self.title_set = false;
            }
            Action::SetTitle(title) => {
                if self.title_set {
                    self.report(
                        Diagnostic::info("Duplicate TITLE line overrides the previous title")
                            .with_code("PARSE002"),
                    );
                }
                if let Some(record) = self.current.as_mut() {
                    record.title = title;
                }
                self.title_set = true;
            }
            Action::SetTheme(theme) => {
                if let Some(record) = self.current.as_mut() {
                    record.theme_hint = (!theme.is_empty()).then_some(theme);
                }
            }
            Action::SetKind(tag) => {
                let kind = SlideKind::from_tag(&tag);
                if kind.is_none() {
                    self.report(
                        Diagnostic::warning(format!("Unknown slide type '{}'", tag))
                            .with_code("PARSE003")
                            .with_help("Falling back to content_slide"),
                    );
                }
                if let Some(record) = self.current.as_mut() {
                    record.kind = kind.unwrap_or_default();
                }
            }
            Action::AppendBullet(text) => {
                if text.is_empty() {
                    self.report(Diagnostic::hint("Empty bullet skipped").with_code("PARSE005"));
                } else if let Some(record) = self.current.as_mut() {
                    record.bullets.push(text);
                }
            }
            Action::Orphan(what) => {
                self.report(
                    Diagnostic::warning(format!("{} outside of any slide was dropped", what))
                        .with_code("PARSE001")
                        .with_help("Start the slide with a `SLIDE <n> - <label>` line"),
                );
            }
            Action::Flag(name) => {
                self.report(
                    Diagnostic::hint(format!("Unrecognized marker '{}:' ignored", name))
                        .with_code("PARSE004"),
                );
            }
            Action::Ignore => {}
        }
    }
}

/// Parse raw text into slide records, discarding diagnostics.
///
/// Empty input yields an empty list. This function never fails.
pub fn parse(raw: &str) -> Vec<SlideRecord> {
    parse_with_diagnostics(raw).records
}

/// Parse raw text into slide records and parse diagnostics
pub fn parse_with_diagnostics(raw: &str) -> ParseOutput {
    let mut parser = RecordParser::new();
    for line in raw.lines() {
        parser.feed_line(line);
    }
    parser.into_output()
}
