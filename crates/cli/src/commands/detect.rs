use anyhow::Result;
use restgen_core::EnvironmentDetector;
use tracing::debug;

use crate::display::{detection_json, print_detection};
use crate::utils::load_project;

pub fn detect_command(project_arg: Option<&str>, json: bool) -> Result<()> {
    let project = load_project(project_arg)?;
    debug!(
        "Detecting environment for {} ({} dependencies, {} source roots)",
        project.base_dir.display(),
        project.dependencies.len(),
        project.source_roots.len()
    );

    let (detection, transport) = EnvironmentDetector::for_project(&project).detect_with_transport();

    if json {
        println!("{}", serde_json::to_string_pretty(&detection_json(&detection, &transport))?);
    } else {
        print_detection(&project, &detection, &transport);
    }

    Ok(())
}
