use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{args::CommonArgs, report};
use crate::{
    codegen::{CodeGenerator, CommandCodegen, NoCodegen},
    config::{Config, load_config},
    extract::Extractor,
};

/// Configuration resolved for one command invocation: config file plus flag overrides.
pub struct ProjectContext {
    /// Directory that relative config paths resolve against.
    pub root: PathBuf,
    pub config: Config,
    pub resource_path: PathBuf,
    pub codegen_enabled: bool,
}

impl ProjectContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::from_dir(&cwd, common)
    }

    pub fn from_dir(dir: &Path, common: &CommonArgs) -> Result<Self> {
        let loaded = load_config(dir)?;
        let resource_path = match &common.resource {
            Some(path) => dir.join(path),
            None => loaded.resource_path(),
        };

        let mut config = loaded.config;
        if let Some(prefix) = &common.lookup_prefix {
            config.lookup_prefix = prefix.clone();
        }

        tracing::debug!(
            resource = %resource_path.display(),
            from_file = loaded.from_file,
            "resolved project context"
        );

        Ok(Self {
            root: loaded.root,
            codegen_enabled: !common.no_codegen && !config.codegen_command.is_empty(),
            config,
            resource_path,
        })
    }

    pub fn codegen(&self) -> Box<dyn CodeGenerator> {
        if !self.codegen_enabled {
            return Box::new(NoCodegen);
        }
        match CommandCodegen::from_argv(&self.config.codegen_command, &self.root) {
            Some(generator) => Box::new(generator),
            None => Box::new(NoCodegen),
        }
    }

    pub fn extractor(&self) -> Extractor {
        Extractor::new(&self.resource_path)
            .with_lookup_prefix(self.config.lookup_prefix.clone())
            .with_codegen(self.codegen())
    }

    /// Path relative to the project root, for display.
    pub fn display_path(&self, path: &Path) -> String {
        report::display_path(path, &self.root)
    }
}
