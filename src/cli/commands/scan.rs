use std::{collections::BTreeMap, ops::Range, path::PathBuf};

use anyhow::{Result, bail};

use super::super::{
    args::ScanCommand,
    context::ProjectContext,
    exit_status::ExitStatus,
    report::{
        print_apply_summary, print_codegen_warning, print_read_warning, print_scan_preview,
        print_scan_success, report_candidates,
    },
};
use crate::{
    codegen::CodegenStatus,
    error::ExtractError,
    extract::Extractor,
    resource::ResourceDocument,
    scan::{Candidate, CandidateFinder, rewrite_file, scan_files},
};

/// A tagged literal that was left in place.
#[derive(Debug)]
pub struct RejectedCandidate {
    pub candidate: Candidate,
    pub reason: String,
}

/// Outcome of `scan --apply`.
#[derive(Debug)]
pub struct ApplySummary {
    pub inserted: usize,
    pub reused: usize,
    /// Source files rewritten.
    pub file_count: usize,
    pub rejected: Vec<RejectedCandidate>,
    pub codegen: CodegenStatus,
}

pub fn scan(cmd: ScanCommand, verbose: bool) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let marker = cmd.marker.as_deref().unwrap_or(&ctx.config.marker);
    if marker.trim().is_empty() {
        bail!("Marker must not be empty");
    }

    let finder = CandidateFinder::new(marker)?;
    let scanned = scan_files(
        &ctx.root,
        &ctx.config.includes,
        &ctx.config.ignores,
        &ctx.config.extensions,
    );
    let (candidates, unreadable) = finder.find_in_files(&scanned.files);
    tracing::debug!(
        files = scanned.files.len(),
        skipped = scanned.skipped_count,
        candidates = candidates.len(),
        "scan finished"
    );

    if candidates.is_empty() {
        print_scan_success(scanned.files.len());
        print_read_warning(unreadable, verbose);
        return Ok(ExitStatus::Success);
    }

    if !cmd.apply {
        let file_count = count_files(&candidates);
        report_candidates(&candidates, &ctx.root);
        print_scan_preview(candidates.len(), file_count);
        print_read_warning(unreadable, verbose);
        return Ok(ExitStatus::Failure);
    }

    let summary = apply(&ctx, candidates)?;
    print_apply_summary(&summary, &ctx.root);
    print_codegen_warning(&summary.codegen);
    print_read_warning(unreadable, verbose);

    let codegen_failed = matches!(summary.codegen, CodegenStatus::Failed(_));
    Ok(if summary.rejected.is_empty() && !codegen_failed {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    })
}

fn count_files(candidates: &[Candidate]) -> usize {
    let mut files: Vec<&PathBuf> = candidates.iter().map(|c| &c.file_path).collect();
    files.dedup();
    files.len()
}

/// Extracts every candidate into one loaded document, then rewrites sources.
///
/// Code generation runs once at the end when any entry was added. A read or
/// write failure of the resource file stops extraction; sources are still
/// rewritten for the candidates extracted before it.
fn apply(ctx: &ProjectContext, candidates: Vec<Candidate>) -> Result<ApplySummary> {
    let extractor =
        Extractor::new(&ctx.resource_path).with_lookup_prefix(ctx.config.lookup_prefix.clone());
    let mut doc = ResourceDocument::load(extractor.resource_path())?;

    let mut replacements: BTreeMap<PathBuf, Vec<(Range<usize>, String)>> = BTreeMap::new();
    let mut inserted = 0;
    let mut reused = 0;
    let mut rejected = Vec::new();
    let mut failure: Option<ExtractError> = None;

    for candidate in candidates {
        match extractor.extract_into(&mut doc, &candidate.text(), None, None) {
            Ok(result) => {
                if result.is_inserted() {
                    inserted += 1;
                } else {
                    reused += 1;
                }
                replacements
                    .entry(candidate.file_path.clone())
                    .or_default()
                    .push((candidate.span.clone(), result.replacement_text));
            }
            Err(err) if err.is_input_error() => {
                tracing::debug!(
                    path = %candidate.file_path.display(),
                    line = candidate.line,
                    error = %err,
                    "candidate rejected"
                );
                rejected.push(RejectedCandidate {
                    candidate,
                    reason: err.to_string(),
                });
            }
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    for (path, file_replacements) in &replacements {
        rewrite_file(path, file_replacements)?;
    }

    if let Some(err) = failure {
        return Err(err.into());
    }

    let codegen = if inserted > 0 {
        CodegenStatus::after_persist(ctx.codegen().as_ref())
    } else {
        CodegenStatus::Skipped
    };

    Ok(ApplySummary {
        inserted,
        reused,
        file_count: replacements.len(),
        rejected,
        codegen,
    })
}
