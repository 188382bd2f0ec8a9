//! Report formatting and printing utilities.
//!
//! Candidates and placeholder issues are printed in cargo-style format. Kept
//! separate from the extraction logic so arbx can be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::scan::ApplySummary;
use crate::{
    codegen::CodegenStatus,
    error::ExtractError,
    extract::{ExtractionResult, Outcome},
    resource::PlaceholderIssue,
    scan::Candidate,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// `path` relative to `root` when it lies below it.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

// ============================================================
// extract
// ============================================================

pub fn print_extraction(result: &ExtractionResult, resource: &str) {
    print_extraction_to(result, resource, &mut io::stdout().lock());
}

pub fn print_extraction_to<W: Write>(result: &ExtractionResult, resource: &str, writer: &mut W) {
    match result.outcome {
        Outcome::Inserted => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Added \"{}\" to {}", result.key, resource).green()
            );
        }
        Outcome::ExistingKey | Outcome::ExistingValue => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Reused \"{}\"", result.key).green()
            );
            if let Some(notice) = &result.notice {
                let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), notice);
            }
        }
    }
    let _ = writeln!(
        writer,
        "  {} {} {}",
        "=".blue(),
        "replace with:".bold(),
        result.replacement_text
    );
}

/// Print a rejected extraction request to stderr.
pub fn print_rejected(err: &ExtractError) {
    print_rejected_to(err, &mut io::stderr().lock());
}

pub fn print_rejected_to<W: Write>(err: &ExtractError, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", "error:".bold().red(), err);
}

/// Print a warning when the resource was written but code generation failed.
pub fn print_codegen_warning(status: &CodegenStatus) {
    print_codegen_warning_to(status, &mut io::stderr().lock());
}

pub fn print_codegen_warning_to<W: Write>(status: &CodegenStatus, writer: &mut W) {
    if let CodegenStatus::Failed(message) = status {
        let _ = writeln!(
            writer,
            "{} code generation failed, generated accessors may be stale: {}",
            "warning:".bold().yellow(),
            message
        );
    }
}

// ============================================================
// scan
// ============================================================

/// Print tagged literals in cargo-style format to stdout.
pub fn report_candidates(candidates: &[Candidate], root: &Path) {
    report_candidates_to(candidates, root, &mut io::stdout().lock());
}

pub fn report_candidates_to<W: Write>(candidates: &[Candidate], root: &Path, writer: &mut W) {
    let max_line_width = candidates
        .iter()
        .map(|c| c.line)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for candidate in candidates {
        let _ = writeln!(
            writer,
            "{}: {}  {}",
            "candidate".bold().cyan(),
            candidate.literal,
            "tagged-string".dimmed().cyan()
        );
        print_source_location(
            writer,
            &display_path(&candidate.file_path, root),
            candidate.line,
            candidate.col,
            &candidate.source_line,
            max_line_width,
        );
        let _ = writeln!(writer);
    }
}

fn print_source_location<W: Write>(
    writer: &mut W,
    file_path: &str,
    line: usize,
    col: usize,
    source_line: &str,
    max_line_width: usize,
) {
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    // col is 1-based
    let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        "^".cyan(),
        width = max_line_width,
        padding = caret_padding
    );
}

pub fn print_scan_preview(candidate_count: usize, file_count: usize) {
    print_scan_preview_to(candidate_count, file_count, &mut io::stdout().lock());
}

pub fn print_scan_preview_to<W: Write>(candidate_count: usize, file_count: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} {} in {} {}.",
        "Would extract".yellow().bold(),
        candidate_count,
        plural(candidate_count, "string", "strings"),
        file_count,
        plural(file_count, "file", "files")
    );
    let _ = writeln!(writer, "Run with {} to extract them.", "--apply".cyan());
}

pub fn print_scan_success(source_files: usize) {
    print_scan_success_to(source_files, &mut io::stdout().lock());
}

pub fn print_scan_success_to<W: Write>(source_files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Scanned {} source {} - no tagged strings found",
            source_files,
            plural(source_files, "file", "files")
        )
        .green()
    );
}

pub fn print_apply_summary(summary: &ApplySummary, root: &Path) {
    print_apply_summary_to(summary, root, &mut io::stdout().lock());
}

pub fn print_apply_summary_to<W: Write>(summary: &ApplySummary, root: &Path, writer: &mut W) {
    for rejected in &summary.rejected {
        let candidate = &rejected.candidate;
        let _ = writeln!(
            writer,
            "{}: {}  {}",
            "skipped".bold().yellow(),
            rejected.reason,
            "rejected-string".dimmed().cyan()
        );
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            display_path(&candidate.file_path, root),
            candidate.line,
            candidate.col
        );
        let _ = writeln!(writer);
    }

    let extracted = summary.inserted + summary.reused;
    if extracted > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} in {} {}.",
            "Extracted".green().bold(),
            extracted,
            plural(extracted, "string", "strings"),
            summary.file_count,
            plural(summary.file_count, "file", "files")
        );
        let _ = writeln!(writer, "  - new keys: {}", summary.inserted);
        if summary.reused > 0 {
            let _ = writeln!(writer, "  - reused keys: {}", summary.reused);
        }
    }
    if !summary.rejected.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} {} could not be extracted",
            FAILURE_MARK.red(),
            summary.rejected.len(),
            plural(summary.rejected.len(), "string", "strings")
        );
    }
}

/// Print a warning about source files that could not be read.
pub fn print_read_warning(count: usize, verbose: bool) {
    print_read_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_read_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// check
// ============================================================

/// Print placeholder issues of `resource` to stdout.
pub fn report_placeholder_issues(issues: &[PlaceholderIssue], resource: &str) {
    report_placeholder_issues_to(issues, resource, &mut io::stdout().lock());
}

pub fn report_placeholder_issues_to<W: Write>(
    issues: &[PlaceholderIssue],
    resource: &str,
    writer: &mut W,
) {
    if issues.is_empty() {
        return;
    }

    for issue in issues {
        let _ = writeln!(
            writer,
            "{}: {}  {}",
            "error".bold().red(),
            issue,
            issue.rule().dimmed().cyan()
        );
        let _ = writeln!(writer, "  {} {}", "-->".blue(), resource);
        let _ = writeln!(writer);
    }

    let _ = writeln!(
        writer,
        "{} {} {}",
        FAILURE_MARK.red(),
        issues.len(),
        plural(issues.len(), "problem", "problems")
    );
}

pub fn print_check_success(entries: usize, resource: &str) {
    print_check_success_to(entries, resource, &mut io::stdout().lock());
}

pub fn print_check_success_to<W: Write>(entries: usize, resource: &str, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} in {} - no issues found",
            entries,
            plural(entries, "entry", "entries"),
            resource
        )
        .green()
    );
}
