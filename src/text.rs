//! Accent- and case-insensitive comparison helpers used by every text filter.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold a value for comparison: lower-case, strip diacritics, trim. Absent input is "".
///
/// The Turkish dotless `ı` has no decomposition, so it is folded to `i` explicitly;
/// `normalize("Kadıköy") == "kadikoy"`.
pub fn normalize(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let folded: String = value
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(|ch| if ch == 'ı' { 'i' } else { ch })
        .collect();

    folded.trim().to_string()
}

pub fn normalize_str(value: &str) -> String {
    normalize(Some(value))
}

/// True when the folded `needle` occurs in the folded `haystack`.
pub fn contains_normalized(haystack: Option<&str>, needle: &str) -> bool {
    normalize(haystack).contains(&normalize_str(needle))
}
