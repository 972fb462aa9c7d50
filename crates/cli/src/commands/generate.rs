use anyhow::{Context, Result};
use restgen_core::generate::ToolInvocation;
use restgen_core::{
    CommandTool, GenerationTool, Orchestrator, ProjectModel, RunOutcome, Session, TypeRegistry,
};
use tracing::{debug, info};

use crate::display::print_run_report;
use crate::utils::{load_project, load_settings};

#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub project: Option<String>,
    pub config: Option<String>,
    pub language: Option<String>,
    pub offline: bool,
    pub dry_run: bool,
}

/// Prints the request instead of running the tool
struct DryRunTool<'a> {
    command: &'a CommandTool,
}

impl GenerationTool for DryRunTool<'_> {
    fn execute(
        &self,
        invocation: &ToolInvocation,
        project: &ProjectModel,
        session: &Session,
    ) -> std::result::Result<(), String> {
        println!("{}", self.command.to_shell_command(invocation));
        println!("Working directory: {}", project.base_dir.display());
        if session.offline {
            println!("Environment variables:");
            println!("  RESTGEN_OFFLINE=true");
        }
        let configuration =
            serde_json::to_string_pretty(&invocation.configuration).map_err(|e| e.to_string())?;
        println!("{configuration}");
        Ok(())
    }
}

pub fn generate_command(options: GenerateOptions) -> Result<()> {
    let project = load_project(options.project.as_deref())?;
    let settings = load_settings(options.config.as_deref(), &project.base_dir)?;
    let language = options.language.as_deref().unwrap_or(&settings.language);
    debug!("Generating {} models for {}", language, project.base_dir.display());

    let session = Session {
        offline: options.offline,
        ..Default::default()
    };
    let registry = TypeRegistry::with_builtins();
    let command = settings.command_tool();
    let dry_run_tool = DryRunTool { command: &command };
    let tool: &dyn GenerationTool = if options.dry_run {
        &dry_run_tool
    } else {
        &command
    };

    let outcome = Orchestrator::new(&project, &settings, &session, tool, &registry)
        .run(language)
        .context("Model generation failed")?;

    match outcome {
        RunOutcome::Skipped => println!("Generation skipped"),
        RunOutcome::Completed(report) => {
            if !options.dry_run {
                info!("Models generated into {}", settings.model_output(&project));
            }
            print_run_report(&report);
        }
    }

    Ok(())
}
