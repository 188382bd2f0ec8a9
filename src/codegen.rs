//! Code generation hook.
//!
//! After every successful persist the orchestrator asks a [`CodeGenerator`] to
//! regenerate accessor code from the resource file. A failure here is reported
//! but never undoes the write.

use std::{
    fmt,
    path::{Path, PathBuf},
    process::Command,
};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Something that regenerates code from the resource file.
pub trait CodeGenerator {
    /// Runs the generator once. Called after each persist.
    fn run(&self) -> Result<(), CodegenError>;

    /// Whether this generator does anything at all.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Generator used when code generation is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCodegen;

impl CodeGenerator for NoCodegen {
    fn run(&self) -> Result<(), CodegenError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Runs an external command, e.g. `flutter gen-l10n`, in the project root.
#[derive(Debug, Clone)]
pub struct CommandCodegen {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl CommandCodegen {
    /// Builds a generator from an argv list. Returns `None` for an empty list.
    pub fn from_argv(argv: &[String], working_dir: &Path) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            working_dir: working_dir.to_path_buf(),
        })
    }
}

impl fmt::Display for CommandCodegen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl CodeGenerator for CommandCodegen {
    fn run(&self) -> Result<(), CodegenError> {
        tracing::info!(command = %self, "running code generation");

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|source| CodegenError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        Err(CodegenError::Failed {
            command: self.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// What happened to code generation during one extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "camelCase")]
pub enum CodegenStatus {
    /// Nothing was persisted, or generation is disabled.
    Skipped,
    Succeeded,
    /// The resource was persisted but generated code is stale.
    Failed(String),
}

impl CodegenStatus {
    /// Runs `generator` and records the outcome.
    pub fn after_persist(generator: &dyn CodeGenerator) -> Self {
        if !generator.is_enabled() {
            return CodegenStatus::Skipped;
        }
        match generator.run() {
            Ok(()) => CodegenStatus::Succeeded,
            Err(err) => {
                tracing::warn!(error = %err, "code generation failed");
                CodegenStatus::Failed(err.to_string())
            }
        }
    }
}
