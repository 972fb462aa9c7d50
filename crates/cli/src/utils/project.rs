use anyhow::{Context, Result};
use restgen_core::{GeneratorSettings, ProjectModel};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load the project model from a directory or an explicit descriptor file
pub fn load_project(project_arg: Option<&str>) -> Result<ProjectModel> {
    let path = match project_arg {
        Some(arg) => PathBuf::from(arg),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    debug!("Loading project from: {}", path.display());
    if path.is_file() {
        ProjectModel::load(&path)
            .with_context(|| format!("Failed to load project descriptor {}", path.display()))
    } else {
        ProjectModel::discover(&path)
            .with_context(|| format!("Failed to load project in {}", path.display()))
    }
}

/// Settings from an explicit file, or the project's conventional lookup
pub fn load_settings(config_arg: Option<&str>, base_dir: &Path) -> Result<GeneratorSettings> {
    match config_arg {
        Some(path) => GeneratorSettings::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load settings from {path}")),
        None => GeneratorSettings::load_for_project(base_dir)
            .with_context(|| format!("Failed to load settings for {}", base_dir.display())),
    }
}
