//! restgen - Detection and orchestration engine for REST DSL scaffolding
//!
//! This crate provides functionality to:
//! - Infer a project's transport component, framework flavor and entry package
//!   from its declared dependencies and source tree
//! - Resolve pluggable destination generator strategies by name
//! - Drive an external model generator with a composed configuration tree
pub mod auth;
pub mod config;
pub mod detect;
pub mod error;
pub mod generate;
pub mod project;
pub mod spec_source;
pub mod strategy;

// Re-export commonly used types
pub use error::{Error, Result, StrategyError};

// Re-export main API components
pub use config::GeneratorSettings;
pub use detect::{DetectionResult, EnvironmentDetector, TransportChoice};
pub use generate::{CommandTool, GenerationTool, Orchestrator, RunOutcome, RunReport, Session};
pub use project::{DependencyList, DependencyRecord, ProjectModel};
pub use strategy::{DestinationGenerator, RouteContext, StrategyLoader, TypeRegistry};
