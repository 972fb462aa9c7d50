//! Host project model: base directories, source roots and resolved dependencies

mod dependency;
mod descriptor;

pub use dependency::{DependencyList, DependencyRecord};
pub use descriptor::{DESCRIPTOR_FILE_NAMES, ProjectDescriptor};

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Read-only view of the project being scaffolded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectModel {
    pub base_dir: PathBuf,
    /// Root of build outputs (`target` by default)
    pub build_dir: PathBuf,
    /// Compiled outputs, also the project-local strategy root
    pub build_output_dir: PathBuf,
    pub source_roots: Vec<PathBuf>,
    pub dependencies: DependencyList,
}

impl ProjectModel {
    /// Project rooted at `base_dir` with default layout and the given dependencies
    pub fn new(base_dir: impl Into<PathBuf>, dependencies: DependencyList) -> Self {
        let base_dir = base_dir.into();
        let build_dir = base_dir.join("target");
        Self {
            build_output_dir: build_dir.join("classes"),
            source_roots: vec![base_dir.join("src").join("main").join("java")],
            build_dir,
            base_dir,
            dependencies,
        }
    }

    pub fn with_source_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.source_roots = roots;
        self
    }

    pub fn with_build_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_output_dir = dir.into();
        self
    }

    /// Load the descriptor from an explicit file
    pub fn load(descriptor: &Path) -> Result<Self> {
        let anchor = descriptor
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        ProjectDescriptor::from_file(descriptor)?.into_model(anchor)
    }

    /// Locate a descriptor in `dir` and load it
    pub fn discover(dir: &Path) -> Result<Self> {
        for name in DESCRIPTOR_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                tracing::debug!("Found project descriptor at: {:?}", candidate);
                return Self::load(&candidate);
            }
        }
        Err(Error::DescriptorError(format!(
            "no project descriptor ({}) found in {}",
            DESCRIPTOR_FILE_NAMES.join(" or "),
            dir.display()
        )))
    }
}
