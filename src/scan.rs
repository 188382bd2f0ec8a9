//! Bulk scan for string literals tagged with a marker token.
//!
//! With the default marker `.i18n`, the literal in
//!
//! ```dart
//! Text('Sign in'.i18n)
//! ```
//!
//! is a candidate. Candidates are found per file in parallel; extracting them is
//! left to the caller, one at a time.

use std::{
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use rayon::prelude::*;
use regex::Regex;
use walkdir::WalkDir;

use crate::placeholders::SIGIL;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Collects source files under `includes` with one of `extensions`, minus `ignores`.
pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    extensions: &[String],
) -> ScanResult {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                    Err(e) => tracing::warn!(pattern = %inc, error = %e, "invalid include pattern"),
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    tracing::warn!(path = %path.display(), "include path does not exist");
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    tracing::warn!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let relative = path.strip_prefix(base_dir).unwrap_or(path);
            if glob_patterns
                .iter()
                .any(|p| p.matches_path(relative) || p.matches_path(path))
            {
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }

            let has_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext));
            if has_extension {
                files.push(path.to_path_buf());
            }
        }
    }

    // Overlapping includes can reach the same file twice.
    files.sort();
    files.dedup();
    ScanResult {
        files,
        skipped_count,
    }
}

/// A tagged literal found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub file_path: PathBuf,
    /// 1-based.
    pub line: usize,
    /// 1-based, in characters.
    pub col: usize,
    pub source_line: String,
    /// The literal as written, quotes and any `r` prefix included.
    pub literal: String,
    /// A raw string (`r'...'`), which has no escapes.
    pub raw: bool,
    /// Byte range of literal and marker in the file.
    pub span: Range<usize>,
}

impl Candidate {
    /// The literal without `r` prefix, still wrapped in its quotes. Escaped quotes
    /// of non-raw strings are unescaped.
    pub fn text(&self) -> String {
        if self.raw {
            return self.literal[1..].to_string();
        }
        self.literal.replace("\\'", "'").replace("\\\"", "\"")
    }
}

/// Finds marker-tagged literals.
pub struct CandidateFinder {
    regex: Regex,
}

impl CandidateFinder {
    pub fn new(marker: &str) -> Result<Self> {
        // Triple-quoted literals are matched whole so they are not split into
        // single-quoted pieces; they are skipped afterwards.
        let pattern = format!(
            r#"(?P<raw>\br)?(?:'''(?s:.*?)'''|"""(?s:.*?)"""|"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*')\s*{}"#,
            regex::escape(marker)
        );
        let regex = Regex::new(&pattern)
            .with_context(|| format!("Invalid marker for scanning: \"{}\"", marker))?;
        Ok(Self { regex })
    }

    /// Candidates in `source`, in order of appearance.
    pub fn find_in_source(&self, file_path: &Path, source: &str) -> Vec<Candidate> {
        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        self.regex
            .captures_iter(source)
            .filter_map(|caps| {
                let m = caps.get(0)?;
                // `'x'.i18nFoo` is a different member, not the marker.
                if source[m.end()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_')
                {
                    return None;
                }

                let matched = m.as_str();
                let raw = caps.name("raw").is_some();
                let body = if raw { &matched[1..] } else { matched };
                if body.starts_with("'''") || body.starts_with("\"\"\"") {
                    tracing::debug!(path = %file_path.display(), "skipping triple-quoted literal");
                    return None;
                }
                let quote = body.chars().next()?;
                let literal = matched.len() - body.len() + literal_end(body, quote)?;
                if raw && matched[..literal].contains(SIGIL) {
                    // No escapes in raw strings, so `$` there is literal text.
                    tracing::debug!(path = %file_path.display(), "skipping raw literal with '$'");
                    return None;
                }

                let line_index = line_starts.partition_point(|&start| start <= m.start()) - 1;
                let line_start = line_starts[line_index];
                let line_end = source[line_start..]
                    .find('\n')
                    .map_or(source.len(), |i| line_start + i);
                let source_line = source[line_start..line_end].trim_end_matches('\r');

                Some(Candidate {
                    file_path: file_path.to_path_buf(),
                    line: line_index + 1,
                    col: source[line_start..m.start()].chars().count() + 1,
                    source_line: source_line.to_string(),
                    literal: matched[..literal].to_string(),
                    raw,
                    span: m.range(),
                })
            })
            .collect()
    }

    /// Reads `files` in parallel and returns all candidates ordered by file and position.
    ///
    /// Unreadable files are logged and counted.
    pub fn find_in_files(&self, files: &[PathBuf]) -> (Vec<Candidate>, usize) {
        let per_file: Vec<Option<Vec<Candidate>>> = files
            .par_iter()
            .map(|path| match fs::read_to_string(path) {
                Ok(source) => Some(self.find_in_source(path, &source)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot read source file");
                    None
                }
            })
            .collect();

        let unreadable = per_file.iter().filter(|found| found.is_none()).count();
        let candidates = per_file.into_iter().flatten().flatten().collect();
        (candidates, unreadable)
    }
}

/// Byte length of the quoted literal at the start of `matched`, honouring escapes.
fn literal_end(matched: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in matched.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Some(i + c.len_utf8());
        }
    }
    None
}

/// Splices `replacements` into `source`, working from the end so earlier spans stay valid.
///
/// Spans must not overlap.
pub fn apply_replacements(source: &str, replacements: &[(Range<usize>, String)]) -> String {
    let mut sorted: Vec<&(Range<usize>, String)> = replacements.iter().collect();
    sorted.sort_by_key(|(span, _)| std::cmp::Reverse(span.start));

    let mut out = source.to_string();
    for (span, text) in sorted {
        out.replace_range(span.clone(), text);
    }
    out
}

/// Rewrites one source file in place.
pub fn rewrite_file(path: &Path, replacements: &[(Range<usize>, String)]) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let updated = apply_replacements(&source, replacements);
    fs::write(path, updated)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}
