use anyhow::Result;

use super::super::{
    args::ExtractCommand,
    context::ProjectContext,
    exit_status::ExitStatus,
    report::{print_codegen_warning, print_extraction, print_rejected},
};
use crate::codegen::CodegenStatus;

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let extractor = ctx.extractor();

    let result = match extractor.extract(&cmd.text, cmd.key.as_deref(), cmd.context.as_deref()) {
        Ok(result) => result,
        Err(err) if err.is_input_error() => {
            if cmd.json {
                println!("{}", serde_json::json!({ "error": err.to_string() }));
            } else {
                print_rejected(&err);
            }
            return Ok(ExitStatus::Failure);
        }
        Err(err) => return Err(err.into()),
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_extraction(&result, &ctx.display_path(&ctx.resource_path));
    }
    print_codegen_warning(&result.codegen);

    Ok(match result.codegen {
        CodegenStatus::Failed(_) => ExitStatus::Failure,
        _ => ExitStatus::Success,
    })
}
