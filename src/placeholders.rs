//! Placeholder decomposition.
//!
//! Interpolation is recognised lexically: the sigil `$` followed by either a
//! brace-delimited expression (`${user?.name}`, `${items[0]}`) or a bare
//! identifier path (`$count`, `$user.name`). This is not a parser:
//! anything outside that subset (`${a + b}`) is not a placeholder.
//!
//! An escaped sigil (`\$`) that starts a reference is still a reference and the
//! backslash is dropped with it. Any other `\$` is a literal `$`.
//!
//! ```text
//! "Hello $user.name, you have ${count} items"
//!        ^^^^^^^^^^           ^^^^^^^^
//!        bare: username       braced: {count}
//! "Hello username, you have {count} items"
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{ExtractError, Result};
use crate::utils::alphabetic_only;

/// The character that introduces an interpolation expression.
pub const SIGIL: char = '$';

static INTERPOLATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\\?\$(?:\{(?P<braced>[A-Za-z_][\w.?!\[\]]*)\}|(?P<bare>[A-Za-z_]\w*(?:(?:\?\.|\.)[A-Za-z_]\w*|\[[^\]\s]*\])*))",
    )
    .unwrap()
});

/// `{name}` tokens inside an already canonical translation value.
static TEMPLATE_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_]\w*)\}").unwrap());

/// One interpolation reference found in a literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderToken {
    /// The reference as written, sigil and any escaping backslash included
    /// (`$user.name`, `${count}`, `\${count}`).
    pub raw_expression: String,
    /// The expression with every non-alphabetic character removed (`username`).
    pub clean_name: String,
    /// True for the `${...}` form.
    pub braced: bool,
}

impl PlaceholderToken {
    /// The expression without sigil or braces, usable as a call argument.
    pub fn expression(&self) -> &str {
        let inner = self
            .raw_expression
            .trim_start_matches('\\')
            .trim_start_matches(SIGIL);
        if self.braced {
            inner
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .unwrap_or(inner)
        } else {
            inner
        }
    }

    /// What the reference becomes in the canonical translation value.
    fn template(&self) -> String {
        if self.braced {
            format!("{{{}}}", self.clean_name)
        } else {
            self.clean_name.clone()
        }
    }
}

/// Returns true if `text` contains an unescaped sigil or an escaped one that starts a reference.
pub fn contains_interpolation(text: &str) -> bool {
    has_unescaped_sigil(text) || INTERPOLATION_REGEX.is_match(text)
}

fn has_unescaped_sigil(text: &str) -> bool {
    let mut previous = None;
    for c in text.chars() {
        if c == SIGIL && previous != Some('\\') {
            return true;
        }
        previous = Some(c);
    }
    false
}

/// Replaces every escaped sigil (`\$`) with a bare `$`.
pub fn unescape_sigils(text: &str) -> String {
    text.replace("\\$", "$")
}

/// Collects interpolation references in order of appearance.
///
/// A variable referenced twice yields two tokens. Fails with
/// [`ExtractError::NoPlaceholdersFound`] when nothing parses.
pub fn extract_placeholders(text: &str) -> Result<Vec<PlaceholderToken>> {
    let tokens: Vec<PlaceholderToken> = INTERPOLATION_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let raw = caps.get(0)?.as_str();
            let (expression, braced) = match caps.name("braced") {
                Some(m) => (m.as_str(), true),
                None => (caps.name("bare")?.as_str(), false),
            };
            let clean_name = alphabetic_only(expression);
            if clean_name.is_empty() {
                tracing::warn!(raw, "skipping placeholder without alphabetic characters");
                return None;
            }
            Some(PlaceholderToken {
                raw_expression: raw.to_string(),
                clean_name,
                braced,
            })
        })
        .collect();

    if tokens.is_empty() {
        return Err(ExtractError::NoPlaceholdersFound(text.to_string()));
    }
    Ok(tokens)
}

/// Rewrites `text` into a translation template.
///
/// Tokens are applied in order. Each one replaces the first occurrence of its raw
/// expression at or after the end of the previous replacement, so text produced by
/// an earlier replacement is never matched again.
pub fn canonicalize(text: &str, tokens: &[PlaceholderToken]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for token in tokens {
        let Some(offset) = text[cursor..].find(&token.raw_expression) else {
            tracing::debug!(raw = %token.raw_expression, "placeholder not found after cursor");
            continue;
        };
        let start = cursor + offset;
        out.push_str(&unescape_sigils(&text[cursor..start]));
        out.push_str(&token.template());
        cursor = start + token.raw_expression.len();
    }

    out.push_str(&unescape_sigils(&text[cursor..]));
    out
}

/// Placeholder names in the order the tokens were found, duplicates removed.
pub fn placeholder_names(tokens: &[PlaceholderToken]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !names.contains(&token.clean_name) {
            names.push(token.clean_name.clone());
        }
    }
    names
}

/// Names of the `{name}` tokens in a canonical translation value, in order, duplicates removed.
pub fn template_names(value: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in TEMPLATE_TOKEN_REGEX.captures_iter(value) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
