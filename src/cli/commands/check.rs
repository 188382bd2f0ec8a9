use anyhow::Result;

use super::super::{
    args::CheckCommand,
    context::ProjectContext,
    exit_status::ExitStatus,
    report::{print_check_success, report_placeholder_issues},
};
use crate::resource::ResourceDocument;

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let doc = ResourceDocument::load(&ctx.resource_path)?;
    let resource = ctx.display_path(&ctx.resource_path);

    let issues = doc.placeholder_issues();
    if issues.is_empty() {
        print_check_success(doc.entry_count(), &resource);
        return Ok(ExitStatus::Success);
    }

    tracing::debug!(count = issues.len(), "placeholder issues found");
    report_placeholder_issues(&issues, &resource);
    Ok(ExitStatus::Failure)
}
