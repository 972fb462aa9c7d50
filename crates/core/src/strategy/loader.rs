//! Strategy resolution by name
//!
//! Names are resolved through a [`LayeredResolver`]: declarations found in the
//! project-local root first, then the ambient registry. The layer lives only
//! for a single load.

use super::{Capability, DestinationGenerator, Registration, StrategyManifest, TypeRegistry};
use crate::error::{Result, StrategyError};
use std::path::{Path, PathBuf};

/// Project-local declarations layered over an ambient registry
#[derive(Debug)]
pub struct LayeredResolver<'a> {
    root: PathBuf,
    overlay: TypeRegistry,
    parent: &'a TypeRegistry,
}

impl<'a> LayeredResolver<'a> {
    /// Open the layer for `root`
    pub fn open(root: &Path, parent: &'a TypeRegistry) -> Result<Self> {
        let manifest = StrategyManifest::read(root)?;
        let mut overlay = TypeRegistry::new();
        for declaration in manifest.strategies {
            overlay.insert(declaration.into_registration());
        }
        tracing::debug!(
            "Opened strategy layer for {:?} with {} local declarations",
            root,
            overlay.len()
        );
        Ok(Self {
            root: root.to_path_buf(),
            overlay,
            parent,
        })
    }

    pub fn resolve(&self, name: &str) -> Option<&Registration> {
        self.overlay.get(name).or_else(|| self.parent.get(name))
    }
}

impl Drop for LayeredResolver<'_> {
    fn drop(&mut self) {
        tracing::debug!("Released strategy layer for {:?}", self.root);
    }
}

/// Loads strategies by name; nothing is cached between calls
#[derive(Debug, Clone, Copy)]
pub struct StrategyLoader<'a> {
    ambient: &'a TypeRegistry,
}

impl<'a> StrategyLoader<'a> {
    pub fn new(ambient: &'a TypeRegistry) -> Self {
        Self { ambient }
    }

    /// Resolve `name`, verify it provides `C`, then construct it
    pub fn load<C: Capability + ?Sized>(&self, name: &str, project_root: &Path) -> Result<Box<C>> {
        let layer = LayeredResolver::open(project_root, self.ambient).map_err(|e| {
            StrategyError::NotResolvable {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;
        let registration = layer
            .resolve(name)
            .ok_or_else(|| StrategyError::NotResolvable {
                name: name.to_string(),
                reason: "no registration or manifest declaration".to_string(),
            })?;
        let instance = registration.instantiate::<C>()?;
        tracing::info!("Loaded {} strategy {}", C::NAME, name);
        Ok(instance)
    }

    pub fn load_destination_generator(
        &self,
        name: &str,
        project_root: &Path,
    ) -> Result<Box<dyn DestinationGenerator>> {
        self.load::<dyn DestinationGenerator>(name, project_root)
    }
}
