//! End-to-end generation run for one project

use super::{ExecutionEnvironment, GENERATE_GOAL, GenerationTool, Session, ToolCoordinates, ToolInvocation};
use crate::config::GeneratorSettings;
use crate::detect::{DetectionResult, EnvironmentDetector, TransportChoice};
use crate::error::Result;
use crate::project::ProjectModel;
use crate::spec_source::{ApiDocument, SpecSource};
use crate::strategy::{DestinationGenerator, StrategyLoader, TypeRegistry};
use std::fmt;

/// A strategy loaded for this run
pub struct LoadedStrategy {
    pub name: String,
    pub generator: Box<dyn DestinationGenerator>,
}

impl fmt::Debug for LoadedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedStrategy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub detection: DetectionResult,
    pub transport: TransportChoice,
    pub strategy: Option<LoadedStrategy>,
}

#[derive(Debug)]
pub enum RunOutcome {
    Skipped,
    Completed(RunReport),
}

/// Drives detection, strategy loading and model generation for one project
pub struct Orchestrator<'a> {
    project: &'a ProjectModel,
    settings: &'a GeneratorSettings,
    session: &'a Session,
    tool: &'a dyn GenerationTool,
    registry: &'a TypeRegistry,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        project: &'a ProjectModel,
        settings: &'a GeneratorSettings,
        session: &'a Session,
        tool: &'a dyn GenerationTool,
        registry: &'a TypeRegistry,
    ) -> Self {
        Self {
            project,
            settings,
            session,
            tool,
            registry,
        }
    }

    /// The request `generate_models` would send
    pub fn model_invocation(&self, language: &str) -> ToolInvocation {
        ToolInvocation {
            coordinates: ToolCoordinates::codegen(self.settings.codegen_version.as_str()),
            goal: GENERATE_GOAL.to_string(),
            configuration: self.settings.model_params(self.project, language).to_config(),
        }
    }

    /// Generate data-transfer models for `language`
    pub fn generate_models(&self, language: &str) -> Result<()> {
        self.check_specification()?;
        let env = ExecutionEnvironment {
            project: self.project,
            session: self.session,
            tool: self.tool,
        };
        env.execute(&self.model_invocation(language))
    }

    /// Load the configured destination generator, if any
    pub fn load_destination_generator(&self) -> Result<Option<LoadedStrategy>> {
        let Some(name) = self.settings.destination_generator.as_deref() else {
            return Ok(None);
        };
        let generator = StrategyLoader::new(self.registry)
            .load_destination_generator(name, &self.project.build_output_dir)?;
        Ok(Some(LoadedStrategy {
            name: name.to_string(),
            generator,
        }))
    }

    pub fn run(&self, language: &str) -> Result<RunOutcome> {
        if self.settings.skip {
            tracing::info!("Skipping REST DSL generation");
            return Ok(RunOutcome::Skipped);
        }

        let (detection, transport) = EnvironmentDetector::for_project(self.project).detect_with_transport();
        let strategy = self.load_destination_generator()?;
        self.generate_models(language)?;

        Ok(RunOutcome::Completed(RunReport {
            detection,
            transport,
            strategy,
        }))
    }

    /// Local documents must exist and parse; remote ones are left to the tool
    fn check_specification(&self) -> Result<()> {
        let uri = self.settings.specification_uri(self.project);
        match SpecSource::resolve(&uri) {
            SpecSource::Local(path) => {
                let path = self.project.base_dir.join(path);
                let document = ApiDocument::load(&path)?;
                tracing::debug!(
                    "Using API specification {:?} (title: {}, version: {})",
                    document.path,
                    document.title().unwrap_or("-"),
                    document.version().unwrap_or("-")
                );
            }
            SpecSource::Remote(url) => {
                let auth = self.settings.auth_map();
                let mut headers: Vec<&str> = auth.keys().map(String::as_str).collect();
                headers.sort_unstable();
                tracing::info!(
                    "Specification {} is remote; fetching is left to the generation tool (auth headers: {:?})",
                    url,
                    headers
                );
            }
        }
        Ok(())
    }
}
