use std::{fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, Config, default_config_json};

pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::write(config_path, default_config_json()?)?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    let resource_path = Config::default().resource_path;
    let resource = Path::new(&resource_path);
    if !resource.exists() {
        if let Some(parent) = resource.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(resource, "{}\n")
            .with_context(|| format!("Failed to write file: {}", resource.display()))?;
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", resource_path).green()
        );
    }

    Ok(ExitStatus::Success)
}
