//! Pluggable destination strategies
//!
//! A strategy decides which endpoint a generated route forwards to. Strategies
//! are selected by name at configuration time and resolved through a
//! [`TypeRegistry`], optionally layered with declarations found in the
//! project's own build output.

mod loader;
mod manifest;
mod registry;

pub use loader::{LayeredResolver, StrategyLoader};
pub use manifest::{MANIFEST_FILE_NAME, StrategyDeclaration, StrategyManifest};
pub use registry::{Capability, ContractId, Registration, TypeRegistry};

/// Name under which [`DirectToOperationId`] is registered
pub const DIRECT_TO_OPERATION_ID: &str = "direct-to-operation-id";

/// The route a destination is generated for
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteContext {
    pub operation_id: String,
    pub method: String,
    pub path: String,
}

impl RouteContext {
    pub fn new(
        operation_id: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            method: method.into(),
            path: path.into(),
        }
    }
}

/// Capability every destination strategy provides
pub trait DestinationGenerator: Send + Sync {
    /// Endpoint URI a generated route should forward to
    fn generate_destination_for(&self, route: &RouteContext) -> String;
}

impl Capability for dyn DestinationGenerator {
    const NAME: &'static str = "destination-generator";
}

/// Forwards every operation to `direct:<operationId>`
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectToOperationId;

impl DestinationGenerator for DirectToOperationId {
    fn generate_destination_for(&self, route: &RouteContext) -> String {
        format!("direct:{}", route.operation_id)
    }
}

const PLACEHOLDERS: &[&str] = &["operationId", "method", "path"];

/// Destination built from a template such as `seda:{operationId}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDestinationGenerator {
    template: String,
}

impl TemplateDestinationGenerator {
    /// Validate `template`; every `{...}` must name a known placeholder
    pub fn parse(template: &str) -> Result<Self, String> {
        if template.trim().is_empty() {
            return Err("destination template is empty".to_string());
        }

        let mut rest = template;
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| format!("unclosed placeholder in template '{template}'"))?;
            let name = &after[..close];
            if !PLACEHOLDERS.contains(&name) {
                return Err(format!(
                    "unknown placeholder '{{{name}}}' in template '{template}', expected one of {}",
                    PLACEHOLDERS.join(", ")
                ));
            }
            rest = &after[close + 1..];
        }

        Ok(Self {
            template: template.to_string(),
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl DestinationGenerator for TemplateDestinationGenerator {
    fn generate_destination_for(&self, route: &RouteContext) -> String {
        self.template
            .replace("{operationId}", &route.operation_id)
            .replace("{method}", &route.method.to_lowercase())
            .replace("{path}", &route.path)
    }
}
