//! Common utility functions shared across the codebase.

/// Quote characters that may wrap a selected string literal.
pub const QUOTES: [char; 2] = ['\'', '"'];

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use arbx::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hello"));
/// assert!(contains_alphabetic("你好"));
/// assert!(contains_alphabetic("Hello123"));
/// assert!(!contains_alphabetic("123"));
/// assert!(!contains_alphabetic("---"));
/// assert!(!contains_alphabetic("$100"));
/// assert!(!contains_alphabetic(""));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Keeps only the alphabetic characters of `text`.
pub fn alphabetic_only(text: &str) -> String {
    text.chars().filter(|c| c.is_alphabetic()).collect()
}

/// Strips one layer of quote characters from each end of a selected literal.
///
/// Surrounding whitespace is trimmed first. Each end is handled on its own, so a
/// selection that caught only the opening quote is still unwrapped.
///
/// # Examples
///
/// ```
/// use arbx::utils::unwrap_quotes;
///
/// assert_eq!(unwrap_quotes("'Save'"), "Save");
/// assert_eq!(unwrap_quotes("\"Save\""), "Save");
/// assert_eq!(unwrap_quotes("\"'nested'\""), "'nested'");
/// assert_eq!(unwrap_quotes("Save"), "Save");
/// ```
pub fn unwrap_quotes(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix(QUOTES).unwrap_or(trimmed);
    trimmed.strip_suffix(QUOTES).unwrap_or(trimmed)
}

/// Uppercases the first character of `word`, leaving the rest untouched.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character of `word`, leaving the rest untouched.
pub fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
