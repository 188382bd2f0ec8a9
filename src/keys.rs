//! Key derivation.
//!
//! Two strategies produce a lookup key:
//!
//! - a variable name namespaced by a context label (usually the source file name),
//!   `("save", "homePage")` → `homePageSave`;
//! - the phrase itself, title-cased word by word, `"Hello World"` → `helloWorld`.
//!
//! Both are pure and deterministic. Neither can fail, but a phrase without any
//! alphabetic word yields an empty key, which the caller must reject.

use crate::utils::{
    QUOTES, alphabetic_only, capitalize_first, contains_alphabetic, lowercase_first,
};

/// Derives a key from a variable name and the label of the context it came from.
///
/// Both parts are converted to snake_case, joined as `context_variable` and the
/// result is converted to camelCase. An empty context leaves only the variable name.
pub fn derive_key_from_name_and_context(variable_name: &str, context_label: &str) -> String {
    let variable = to_snake_case(variable_name);
    let context = to_snake_case(context_label);

    let combined = if context.is_empty() {
        variable
    } else if variable.is_empty() {
        context
    } else {
        format!("{}_{}", context, variable)
    };

    to_camel_case(&combined)
}

/// Derives a key from the words of a phrase.
///
/// Quotes are dropped, each whitespace-separated word keeps only its alphabetic
/// characters and gets an uppercase first letter, and the concatenation gets a
/// lowercase first letter.
pub fn derive_key_from_phrase(phrase: &str) -> String {
    let unquoted: String = phrase.chars().filter(|c| !QUOTES.contains(c)).collect();

    let joined: String = unquoted
        .split_whitespace()
        .filter(|word| contains_alphabetic(word))
        .map(|word| capitalize_first(&alphabetic_only(word)))
        .collect();

    lowercase_first(&joined)
}

/// Converts an identifier or label to snake_case.
///
/// An underscore is inserted before every uppercase letter and in place of any run
/// of non-alphanumeric characters; leading and trailing separators are dropped.
pub fn to_snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);

    for c in input.chars() {
        if c.is_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c.is_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }

    out.trim_end_matches('_').to_string()
}

/// Converts a snake_case string to camelCase.
pub fn to_camel_case(snake: &str) -> String {
    let mut parts = snake.split('_').filter(|part| !part.is_empty());

    let Some(first) = parts.next() else {
        return String::new();
    };

    let mut out = lowercase_first(first);
    for part in parts {
        out.push_str(&capitalize_first(part));
    }
    out
}
