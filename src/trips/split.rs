// src/trips/split.rs
use clap::ValueEnum;
use serde::Serialize;

/// Number of fields every trip row must have.
pub const FIELD_COUNT: usize = 6;

/// Candidate delimiters for auto-detection, in priority order.
pub const AUTO_DELIMITERS: [Delimiter; 3] =
    [Delimiter::Comma, Delimiter::Tab, Delimiter::Semicolon];

/// A single field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Tab,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
        }
    }
}

/// How the ingest loop picks a delimiter for each line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterMode {
    /// Try comma, then tab, then semicolon; first one giving 6 fields wins.
    #[default]
    Auto,
    Comma,
    Tab,
    Semicolon,
}

impl DelimiterMode {
    pub fn fixed(self) -> Option<Delimiter> {
        match self {
            DelimiterMode::Auto => None,
            DelimiterMode::Comma => Some(Delimiter::Comma),
            DelimiterMode::Tab => Some(Delimiter::Tab),
            DelimiterMode::Semicolon => Some(Delimiter::Semicolon),
        }
    }
}

fn trim_field(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Split `line` on `delim` into exactly six trimmed fields.
///
/// An empty segment after a trailing delimiter is not a field, so
/// `"a,b,c,d,e,"` has five fields and an empty line has none.
/// Returns `None` when the field count is anything other than six.
pub fn split_fields(line: &str, delim: Delimiter) -> Option<[&str; FIELD_COUNT]> {
    let mut fields = [""; FIELD_COUNT];
    let mut n = 0;
    let mut parts = line.split(delim.as_char()).peekable();

    while let Some(part) = parts.next() {
        if part.is_empty() && parts.peek().is_none() {
            break;
        }
        if n == FIELD_COUNT {
            return None;
        }
        fields[n] = trim_field(part);
        n += 1;
    }

    (n == FIELD_COUNT).then_some(fields)
}

/// Try each auto-detect delimiter in priority order and return the first
/// split that yields six fields, along with the delimiter that produced it.
pub fn split_auto(line: &str) -> Option<(Delimiter, [&str; FIELD_COUNT])> {
    AUTO_DELIMITERS
        .iter()
        .find_map(|&d| split_fields(line, d).map(|cols| (d, cols)))
}

/// Split according to `mode`.
pub fn split_line(line: &str, mode: DelimiterMode) -> Option<(Delimiter, [&str; FIELD_COUNT])> {
    match mode.fixed() {
        Some(d) => split_fields(line, d).map(|cols| (d, cols)),
        None => split_auto(line),
    }
}
