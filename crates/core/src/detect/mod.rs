//! Environment detection
//!
//! Infers the integration framework version, the transport component, the
//! presence of the companion application framework and its entry package from
//! the project's resolved dependencies and source roots.

mod scanner;
mod transport;

pub use scanner::{
    DEFAULT_ENTRY_MARKER, DEFAULT_SOURCE_EXTENSION, EntryMatch, SourceScanner, grab_package_name,
};
pub use transport::{DEFAULT_TRANSPORT, FallbackDependency, TRANSPORT_COMPONENTS, TransportChoice};

use crate::project::{DependencyList, ProjectModel};
use std::path::PathBuf;

/// Group of the core integration framework
pub const CORE_GROUP: &str = "org.apache.camel";

/// Group of the core framework's companion-framework variant artifacts
pub const COMPANION_VARIANT_GROUP: &str = "org.apache.camel.springboot";

/// Group of the companion application framework
pub const COMPANION_FRAMEWORK_GROUP: &str = "org.springframework.boot";

/// What was learned about the host project
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetectionResult {
    pub framework_version: Option<String>,
    pub transport_component: Option<String>,
    pub has_companion_framework: bool,
    pub entry_package: Option<String>,
}

/// Detector over one project's dependencies and source roots
#[derive(Debug, Clone)]
pub struct EnvironmentDetector<'a> {
    dependencies: &'a DependencyList,
    source_roots: &'a [PathBuf],
    scanner: SourceScanner,
}

impl<'a> EnvironmentDetector<'a> {
    pub fn new(dependencies: &'a DependencyList, source_roots: &'a [PathBuf]) -> Self {
        Self {
            dependencies,
            source_roots,
            scanner: SourceScanner::default(),
        }
    }

    pub fn for_project(project: &'a ProjectModel) -> Self {
        Self::new(&project.dependencies, &project.source_roots)
    }

    pub fn with_scanner(mut self, scanner: SourceScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Run every sub-detection
    pub fn detect(&self) -> DetectionResult {
        let has_companion_framework = self.detect_companion_framework();
        let result = DetectionResult {
            framework_version: self.detect_framework_version(),
            transport_component: self.detect_transport_component(),
            has_companion_framework,
            entry_package: if has_companion_framework {
                self.detect_entry_package()
            } else {
                None
            },
        };
        tracing::debug!("Detection result: {:?}", result);
        result
    }

    /// Version of the first core-framework dependency that declares one
    pub fn detect_framework_version(&self) -> Option<String> {
        self.dependencies
            .iter()
            .filter(|d| d.group_id == CORE_GROUP)
            .find_map(|d| d.declared_version())
            .map(str::to_string)
    }

    /// Transport of the earliest-declared dependency naming a known one
    ///
    /// The priority order of [`TRANSPORT_COMPONENTS`] only decides between
    /// candidates for a single artifact; an earlier dependency always beats a
    /// later one carrying a higher-priority transport.
    pub fn detect_transport_component(&self) -> Option<String> {
        self.dependencies
            .iter()
            .filter(|d| d.group_id == CORE_GROUP || d.group_id == COMPANION_VARIANT_GROUP)
            .find_map(|d| transport::match_artifact(&d.artifact_id))
            .map(str::to_string)
    }

    pub fn detect_companion_framework(&self) -> bool {
        self.dependencies.any_in_group(COMPANION_FRAMEWORK_GROUP)
    }

    /// Package of the companion framework's entry class, first source root wins
    pub fn detect_entry_package(&self) -> Option<String> {
        self.source_roots.iter().find_map(|root| {
            tracing::debug!("Scanning source root {:?} for entry marker", root);
            self.scanner.first_match(root).map(|m| m.package)
        })
    }

    /// Detect, then settle the transport, logging remediation advice on fallback
    pub fn detect_with_transport(&self) -> (DetectionResult, TransportChoice) {
        let detection = self.detect();
        let choice = TransportChoice::from_detection(&detection);
        choice.report();
        (detection, choice)
    }
}
