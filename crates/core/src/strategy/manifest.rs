//! Project-local strategy declarations
//!
//! A project can declare strategies in a `strategies.toml` placed in its build
//! output directory:
//!
//! ```toml
//! [[strategy]]
//! name = "com.example.SedaDestinations"
//! contract = "destination-generator"
//! template = "seda:{operationId}"
//! ```

use super::{Capability, DestinationGenerator, Registration, TemplateDestinationGenerator};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE_NAME: &str = "strategies.toml";

/// One declared strategy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StrategyDeclaration {
    pub name: String,
    pub contract: String,
    #[serde(default)]
    pub template: Option<String>,
}

impl StrategyDeclaration {
    /// Registration for this declaration
    ///
    /// Construction is deferred; a bad template only fails when the strategy
    /// is actually loaded.
    pub fn into_registration(self) -> Registration {
        if self.contract != <dyn DestinationGenerator as Capability>::NAME {
            return Registration::declared(self.name, self.contract);
        }

        let template = self.template;
        Registration::new::<dyn DestinationGenerator, _>(self.name, move || {
            let template = template
                .as_deref()
                .ok_or_else(|| "no destination template declared".to_string())?;
            let generator = TemplateDestinationGenerator::parse(template)?;
            Ok(Box::new(generator))
        })
    }
}

/// Parsed `strategies.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StrategyManifest {
    #[serde(default, rename = "strategy")]
    pub strategies: Vec<StrategyDeclaration>,
}

impl StrategyManifest {
    /// Read the manifest under `root`; a missing root or file is an empty manifest
    pub fn read(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILE_NAME);
        if !path.is_file() {
            tracing::debug!("No strategy manifest at {:?}", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        toml::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!(
                "invalid strategy manifest {}: {e}",
                path.display()
            ))
        })
    }
}
