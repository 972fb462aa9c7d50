use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{GenerateOptions, detect_command, generate_command};

#[derive(Parser, Debug)]
#[command(name = "restgen")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug          Override the log filter\n    RESTGEN_CONFIG=<file>   Settings file to use instead of .restgen.json")]
pub struct Restgen {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect the transport component, framework and entry package of a project
    #[command(visible_alias = "d")]
    Detect {
        /// Project directory or descriptor file (defaults to current directory)
        #[arg(short, long)]
        project: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate data-transfer models for a project
    #[command(visible_alias = "g")]
    Generate {
        /// Project directory or descriptor file (defaults to current directory)
        #[arg(short, long)]
        project: Option<String>,

        /// Settings file (defaults to RESTGEN_CONFIG, then .restgen.json)
        #[arg(short, long)]
        config: Option<String>,

        /// Target language, overriding the settings
        #[arg(short, long)]
        language: Option<String>,

        /// Ask the generation tool to work offline
        #[arg(long)]
        offline: bool,

        /// Print the tool request without executing it
        #[arg(short, long)]
        dry_run: bool,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Detect { project, json } => detect_command(project.as_deref(), json),
            Commands::Generate {
                project,
                config,
                language,
                offline,
                dry_run,
            } => generate_command(GenerateOptions {
                project,
                config,
                language,
                offline,
                dry_run,
            }),
        }
    }
}
