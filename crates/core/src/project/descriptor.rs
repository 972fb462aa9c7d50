//! Project descriptor loading
//!
//! The host build writes a descriptor (JSON or TOML) listing the resolved
//! dependencies and source roots of the project being scaffolded.

use super::{DependencyList, ProjectModel};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Descriptor file names probed in a project directory, in order
pub const DESCRIPTOR_FILE_NAMES: &[&str] = &["restgen-project.json", "restgen-project.toml"];

/// On-disk representation of a project descriptor
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDescriptor {
    #[serde(alias = "base_dir")]
    pub base_dir: Option<PathBuf>,

    #[serde(alias = "build_dir")]
    pub build_dir: Option<PathBuf>,

    #[serde(alias = "build_output_dir")]
    pub build_output_dir: Option<PathBuf>,

    #[serde(alias = "source_roots")]
    pub source_roots: Option<Vec<PathBuf>>,

    pub dependencies: DependencyList,

    /// Dependency list report to append after the inline dependencies
    #[serde(alias = "dependency_report")]
    pub dependency_report: Option<PathBuf>,
}

impl ProjectDescriptor {
    /// Parse a descriptor, picking the format from the file extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::DescriptorError(format!("failed to read {}: {e}", path.display()))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&contents)?),
            Some("toml") => Ok(toml::from_str(&contents)?),
            other => Err(Error::DescriptorError(format!(
                "unsupported descriptor format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    /// Resolve relative paths against `anchor` and fill in defaults
    pub fn into_model(self, anchor: &Path) -> Result<ProjectModel> {
        let base_dir = match self.base_dir {
            Some(dir) => resolve(anchor, &dir),
            None => anchor.to_path_buf(),
        };
        let build_dir = self
            .build_dir
            .map(|d| resolve(&base_dir, &d))
            .unwrap_or_else(|| base_dir.join("target"));
        let build_output_dir = self
            .build_output_dir
            .map(|d| resolve(&base_dir, &d))
            .unwrap_or_else(|| build_dir.join("classes"));
        let source_roots = match self.source_roots {
            Some(roots) => roots.iter().map(|r| resolve(&base_dir, r)).collect(),
            None => vec![base_dir.join("src").join("main").join("java")],
        };

        let mut dependencies: Vec<_> = self.dependencies.iter().cloned().collect();
        if let Some(report) = self.dependency_report {
            let report = resolve(&base_dir, &report);
            let text = fs::read_to_string(&report).map_err(|e| {
                Error::DescriptorError(format!(
                    "failed to read dependency report {}: {e}",
                    report.display()
                ))
            })?;
            let appended = DependencyList::from_report(&text);
            tracing::debug!(
                "Appending {} dependencies from report {:?}",
                appended.len(),
                report
            );
            dependencies.extend(appended.iter().cloned());
        }

        Ok(ProjectModel {
            base_dir,
            build_dir,
            build_output_dir,
            source_roots,
            dependencies: DependencyList::new(dependencies),
        })
    }
}

fn resolve(anchor: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        anchor.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toml_descriptor_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("restgen-project.toml");
        fs::write(
            &path,
            r#"
[[dependencies]]
group_id = "org.apache.camel"
artifact_id = "camel-core"
version = "4.4.0"
"#,
        )
        .unwrap();

        let model = ProjectDescriptor::from_file(&path)
            .unwrap()
            .into_model(temp_dir.path())
            .unwrap();

        assert_eq!(model.base_dir, temp_dir.path());
        assert_eq!(model.build_output_dir, temp_dir.path().join("target/classes"));
        assert_eq!(model.source_roots, vec![temp_dir.path().join("src/main/java")]);
        assert_eq!(model.dependencies.len(), 1);
    }

    #[test]
    fn test_json_descriptor_with_report() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("deps.txt"),
            "[INFO]    org.apache.camel:camel-undertow:jar:4.4.0:compile\n",
        )
        .unwrap();
        let path = temp_dir.path().join("restgen-project.json");
        fs::write(
            &path,
            r#"{
                "sourceRoots": ["src/main/java", "src/generated/java"],
                "buildOutputDir": "out/classes",
                "dependencies": [
                    {"groupId": "org.apache.camel", "artifactId": "camel-core", "version": "4.4.0"}
                ],
                "dependencyReport": "deps.txt"
            }"#,
        )
        .unwrap();

        let model = ProjectDescriptor::from_file(&path)
            .unwrap()
            .into_model(temp_dir.path())
            .unwrap();

        assert_eq!(model.source_roots.len(), 2);
        assert_eq!(model.build_output_dir, temp_dir.path().join("out/classes"));
        let artifacts: Vec<_> = model.dependencies.iter().map(|d| d.artifact_id.as_str()).collect();
        assert_eq!(artifacts, vec!["camel-core", "camel-undertow"]);
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("project.xml");
        fs::write(&path, "<project/>").unwrap();

        let err = ProjectDescriptor::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::DescriptorError(_)));
    }
}
