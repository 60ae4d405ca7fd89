//! Filename Normalization
//!
//! Pure helpers that turn a raw basename into a comparison key and extract
//! structural identifiers ("Bài 10", "Unit 8", "Chapter 3"). Both functions
//! are total: any input produces a result, garbage in means a garbage key,
//! never an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Parenthesized runs containing at least one digit are treated as
/// date/version stamps, e.g. "(13.3.2025)" or "(TB2025)".
static DATED_PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\d[^)]*\)").unwrap());

/// Separator characters that get collapsed into word boundaries.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\-()\[\]]").unwrap());

/// Catalog abbreviations (textbook series, publisher codes) that carry no
/// grouping signal and only add noise to the comparison key.
static STOP_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(kntt|sgv|cd|sbt|sgk|hdtn|hoat dong trai nghiem)\b").unwrap());

/// Structural identifier pattern: a unit/lesson/chapter keyword followed by
/// an integer, with or without whitespace in between. Vietnamese keywords
/// appear both with diacritics and in their ASCII folded form.
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:chủ đề|chu de|bài|bai|chương|chuong|phần|phan|tuần|tuan|tiết|tiet|tập|tap|unit|chapter|lesson|topic|section|week|volume|vol)\s*\d+",
    )
    .unwrap()
});

/// A keyword+number token extracted from a filename, e.g. "Bài 10".
///
/// Equality for grouping purposes goes through [`Identifier::key`], which is
/// case- and whitespace-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    text: String,
}

impl Identifier {
    /// The identifier exactly as it appeared in the filename.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lowercased, whitespace-stripped form used for matching.
    pub fn key(&self) -> String {
        self.text
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    /// Title-cased form used when the identifier becomes a group name.
    pub fn title_cased(&self) -> String {
        title_case(&self.text)
    }
}

/// Normalize a basename into its comparison key.
///
/// Pipeline order matters: extension off, lowercase, dated parens out,
/// separators to spaces, stop words out, whitespace collapsed.
pub fn normalize(name: &str) -> String {
    let stem = strip_extension(name).to_lowercase();
    let cleaned = DATED_PARENS.replace_all(&stem, "");
    let spaced = SEPARATORS.replace_all(&cleaned, " ");
    let stripped = STOP_WORDS.replace_all(&spaced, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract structural identifiers from a basename, in order of appearance.
///
/// Scans the original stem (only the extension is dropped), not the
/// normalized key, so separator and stop-word removal cannot create or
/// destroy matches.
pub fn extract_identifiers(name: &str) -> Vec<Identifier> {
    let stem = strip_extension(name);
    IDENTIFIER
        .find_iter(stem)
        .map(|m| Identifier {
            text: m.as_str().to_string(),
        })
        .collect()
}

/// Drop the final extension from a filename. A leading dot is not an
/// extension ("`.env`" stays intact).
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Capitalize the first letter of every word, lowercase the rest.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
