//! Invocation protocol for the external generation tool
//!
//! The tool is identified by `group:artifact:version` coordinates and invoked
//! with a goal and a [`GenerationConfig`] tree inside an
//! [`ExecutionEnvironment`]. What it does with the request is its own business.

use super::GenerationConfig;
use crate::error::{Error, Result};
use crate::project::ProjectModel;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

/// Coordinates of the model generator used by default
pub const CODEGEN_GROUP_ID: &str = "io.swagger.codegen.v3";
pub const CODEGEN_ARTIFACT_ID: &str = "swagger-codegen-maven-plugin";
pub const DEFAULT_CODEGEN_VERSION: &str = "3.0.54";
pub const GENERATE_GOAL: &str = "generate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ToolCoordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// The default model generator at `version`
    pub fn codegen(version: impl Into<String>) -> Self {
        Self::new(CODEGEN_GROUP_ID, CODEGEN_ARTIFACT_ID, version)
    }
}

impl fmt::Display for ToolCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A single request to the external tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInvocation {
    pub coordinates: ToolCoordinates,
    pub goal: String,
    pub configuration: GenerationConfig,
}

/// Build session state forwarded to the tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub offline: bool,
    pub properties: BTreeMap<String, String>,
}

/// The external generation tool
///
/// Implementations block until the tool finishes. An `Err` carries the tool's
/// own diagnostic, unmodified.
pub trait GenerationTool {
    fn execute(
        &self,
        invocation: &ToolInvocation,
        project: &ProjectModel,
        session: &Session,
    ) -> std::result::Result<(), String>;
}

/// Project, session and tool handle a request is executed within
pub struct ExecutionEnvironment<'a> {
    pub project: &'a ProjectModel,
    pub session: &'a Session,
    pub tool: &'a dyn GenerationTool,
}

impl ExecutionEnvironment<'_> {
    pub fn execute(&self, invocation: &ToolInvocation) -> Result<()> {
        tracing::debug!(
            "Executing {}:{} with {} parameters",
            invocation.coordinates,
            invocation.goal,
            invocation.configuration.len()
        );
        self.tool
            .execute(invocation, self.project, self.session)
            .map_err(|diagnostic| Error::ExternalToolFailure {
                coordinates: invocation.coordinates.to_string(),
                diagnostic,
            })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectPayload<'a> {
    base_dir: &'a Path,
    build_dir: &'a Path,
}

#[derive(Serialize)]
struct RequestPayload<'a> {
    #[serde(flatten)]
    invocation: &'a ToolInvocation,
    project: ProjectPayload<'a>,
    session: &'a Session,
}

/// Runs the tool as a child process
///
/// The command line is `<program> <args...> <group>:<artifact>:<version>:<goal>`,
/// run in the project base directory. The full request is written to stdin as
/// JSON and `RESTGEN_OFFLINE` mirrors the session's offline flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTool {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandTool {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The shell form of the command, for logs and dry runs
    pub fn to_shell_command(&self, invocation: &ToolInvocation) -> String {
        let mut cmd = self.program.clone();
        for arg in self.args.iter().chain(std::iter::once(&goal_arg(invocation))) {
            cmd.push(' ');
            if arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }
}

fn goal_arg(invocation: &ToolInvocation) -> String {
    format!("{}:{}", invocation.coordinates, invocation.goal)
}

impl GenerationTool for CommandTool {
    fn execute(
        &self,
        invocation: &ToolInvocation,
        project: &ProjectModel,
        session: &Session,
    ) -> std::result::Result<(), String> {
        let payload = serde_json::to_vec_pretty(&RequestPayload {
            invocation,
            project: ProjectPayload {
                base_dir: &project.base_dir,
                build_dir: &project.build_dir,
            },
            session,
        })
        .map_err(|e| format!("failed to encode request: {e}"))?;

        tracing::info!("Running: {}", self.to_shell_command(invocation));
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(goal_arg(invocation))
            .current_dir(&project.base_dir)
            .env("RESTGEN_OFFLINE", session.offline.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to launch '{}': {e}", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&payload) {
                Ok(()) => {}
                // The tool may not care about the request body.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!("Tool closed stdin before reading the request");
                }
                Err(e) => return Err(format!("failed to send request: {e}")),
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| format!("failed to wait for '{}': {e}", self.program))?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            if !stderr.trim().is_empty() {
                tracing::debug!("Tool stderr: {}", stderr.trim());
            }
            Ok(())
        } else {
            Err(format!("{}: {}", output.status, stderr.trim_end()))
        }
    }
}
