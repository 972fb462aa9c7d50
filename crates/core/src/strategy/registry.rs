//! Named type registry
//!
//! Maps type names to factories tagged with the capability contract they
//! produce, so a name can be checked for compatibility before anything is
//! constructed.

use super::{DIRECT_TO_OPERATION_ID, DestinationGenerator, DirectToOperationId};
use crate::error::StrategyError;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// A capability contract strategies can be registered under
///
/// Implemented for trait objects, e.g. `dyn DestinationGenerator`.
pub trait Capability: 'static {
    const NAME: &'static str;
}

type Factory<C> = Arc<dyn Fn() -> Result<Box<C>, String> + Send + Sync>;

/// Identity of the contract a registration produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractId {
    /// Absent for contracts only known by name, e.g. declared in a manifest
    type_id: Option<TypeId>,
    name: String,
}

impl ContractId {
    pub fn of<C: Capability + ?Sized>() -> Self {
        Self {
            type_id: Some(TypeId::of::<C>()),
            name: C::NAME.to_string(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            type_id: None,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is<C: Capability + ?Sized>(&self) -> bool {
        self.type_id == Some(TypeId::of::<C>())
    }
}

/// A named, constructible type
pub struct Registration {
    name: String,
    contract: ContractId,
    factory: Option<Box<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("contract", &self.contract.name)
            .finish()
    }
}

impl Registration {
    pub fn new<C, F>(name: impl Into<String>, factory: F) -> Self
    where
        C: Capability + ?Sized,
        F: Fn() -> Result<Box<C>, String> + Send + Sync + 'static,
    {
        let factory: Factory<C> = Arc::new(factory);
        Self {
            name: name.into(),
            contract: ContractId::of::<C>(),
            factory: Some(Box::new(factory)),
        }
    }

    /// A type known only by the contract it declares
    pub fn declared(name: impl Into<String>, contract: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contract: ContractId::named(contract),
            factory: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contract(&self) -> &ContractId {
        &self.contract
    }

    /// Check the contract, then construct
    pub fn instantiate<C: Capability + ?Sized>(&self) -> Result<Box<C>, StrategyError> {
        let factory = self
            .factory
            .as_ref()
            .filter(|_| self.contract.is::<C>())
            .and_then(|f| f.downcast_ref::<Factory<C>>())
            .ok_or_else(|| StrategyError::NotCompatible {
                name: self.name.clone(),
                required: C::NAME,
                found: self.contract.name.clone(),
            })?;

        (**factory)().map_err(|reason| StrategyError::NotConstructible {
            name: self.name.clone(),
            reason,
        })
    }
}

/// Registry of named types
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: HashMap<String, Registration>,
}

impl TypeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in strategies
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register::<dyn DestinationGenerator, _>(DIRECT_TO_OPERATION_ID, || {
            Ok(Box::new(DirectToOperationId))
        });
        registry
    }

    /// Register a factory producing contract `C`
    pub fn register<C, F>(&mut self, name: impl Into<String>, factory: F)
    where
        C: Capability + ?Sized,
        F: Fn() -> Result<Box<C>, String> + Send + Sync + 'static,
    {
        self.insert(Registration::new::<C, F>(name, factory));
    }

    pub fn insert(&mut self, registration: Registration) {
        tracing::debug!(
            "Registering {} as {}",
            registration.name,
            registration.contract.name
        );
        self.entries.insert(registration.name.clone(), registration);
    }

    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::RouteContext;

    trait RouteFilter: Send + Sync {
        fn accepts(&self, route: &RouteContext) -> bool;
    }

    impl Capability for dyn RouteFilter {
        const NAME: &'static str = "route-filter";
    }

    struct AcceptAll;

    impl RouteFilter for AcceptAll {
        fn accepts(&self, _route: &RouteContext) -> bool {
            true
        }
    }

    #[test]
    fn test_builtins() {
        let registry = TypeRegistry::with_builtins();
        assert!(registry.contains(DIRECT_TO_OPERATION_ID));
        assert_eq!(registry.names(), vec![DIRECT_TO_OPERATION_ID]);
    }

    #[test]
    fn test_instantiate_compatible() {
        let registry = TypeRegistry::with_builtins();
        let generator = registry
            .get(DIRECT_TO_OPERATION_ID)
            .unwrap()
            .instantiate::<dyn DestinationGenerator>()
            .unwrap();
        let route = RouteContext::new("listPets", "GET", "/pets");
        assert_eq!(generator.generate_destination_for(&route), "direct:listPets");
    }

    #[test]
    fn test_unrelated_contract_is_not_compatible() {
        let mut registry = TypeRegistry::new();
        registry.register::<dyn RouteFilter, _>("com.example.AcceptAll", || {
            panic!("must not be constructed when the contract does not match")
        });

        let result = registry
            .get("com.example.AcceptAll")
            .unwrap()
            .instantiate::<dyn DestinationGenerator>();
        match result.err() {
            Some(e @ StrategyError::NotCompatible { .. }) => {
                assert!(e.to_string().contains("strategies manifest"));
                let StrategyError::NotCompatible { name, required, found } = e else {
                    unreachable!()
                };
                assert_eq!(name, "com.example.AcceptAll");
                assert_eq!(required, "destination-generator");
                assert_eq!(found, "route-filter");
            }
            other => panic!("expected NotCompatible, got {other:?}"),
        }
    }

    #[test]
    fn test_declared_only_is_not_compatible() {
        let registration = Registration::declared("com.example.Declared", "destination-generator");
        // Same contract name, but nothing that can actually build it.
        assert!(matches!(
            registration.instantiate::<dyn DestinationGenerator>(),
            Err(StrategyError::NotCompatible { .. })
        ));
    }

    #[test]
    fn test_failing_factory_is_not_constructible() {
        let mut registry = TypeRegistry::new();
        registry.register::<dyn DestinationGenerator, _>("com.example.Broken", || {
            Err("missing endpoint prefix".to_string())
        });

        let err = registry
            .get("com.example.Broken")
            .unwrap()
            .instantiate::<dyn DestinationGenerator>()
            .err()
            .unwrap();
        assert!(matches!(err, StrategyError::NotConstructible { .. }));
        assert!(err.to_string().contains("missing endpoint prefix"));
    }

    #[test]
    fn test_other_contracts_still_instantiate() {
        let mut registry = TypeRegistry::new();
        registry.register::<dyn RouteFilter, _>("accept-all", || Ok(Box::new(AcceptAll)));
        let filter = registry
            .get("accept-all")
            .unwrap()
            .instantiate::<dyn RouteFilter>()
            .unwrap();
        assert!(filter.accepts(&RouteContext::default()));
    }
}
