//! Startup composition of a [`TypeConverterRegistry`].

use super::{RegistryConfig, TypeConverterRegistry};
use crate::{
    builtins,
    fallback::{self, FallbackStrategy},
};
use dashmap::DashMap;
use shunt_core::{
    ConversionError, Converter, ConverterRef, FnConverter, TypeCatalog, TypeKey, TypeTag, Value,
};
use std::{collections::HashMap, sync::Arc};

/// Builder for constructing a [`TypeConverterRegistry`].
///
/// Static registration only exists here: once built, the static table
/// cannot change.
pub struct RegistryBuilder {
    catalog: TypeCatalog,
    config: RegistryConfig,
    statics: HashMap<TypeKey, ConverterRef>,
    fallbacks: Vec<Arc<dyn FallbackStrategy>>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Empty static table, built-in catalog, default config and fallback chain.
    pub fn new() -> Self {
        Self {
            catalog: TypeCatalog::builtin(),
            config: RegistryConfig::default(),
            statics: HashMap::new(),
            fallbacks: fallback::default_chain(),
        }
    }

    /// Use a custom type catalog.
    pub fn catalog(mut self, catalog: TypeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Select the registry behaviour.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a converter for `source -> target`.
    ///
    /// Registering the same key twice keeps the later converter.
    pub fn register<C: Converter>(self, target: TypeTag, source: TypeTag, converter: C) -> Self {
        self.register_ref(target, source, ConverterRef::new(converter))
    }

    /// Register an already shared converter.
    pub fn register_ref(mut self, target: TypeTag, source: TypeTag, converter: ConverterRef) -> Self {
        let key = TypeKey::new(target, source);
        if let Some(previous) = self.statics.insert(key, converter) {
            tracing::warn!(
                %key,
                replaced = previous.name(),
                "static converter registered twice"
            );
        }
        self
    }

    /// Register a closure as the converter for `source -> target`.
    pub fn register_fn<F>(
        self,
        target: TypeTag,
        source: TypeTag,
        name: impl Into<String>,
        f: F,
    ) -> Self
    where
        F: Fn(&Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        self.register(target, source, FnConverter::new(name, f))
    }

    /// Register the built-in converters.
    pub fn with_builtins(self) -> Self {
        builtins::builtin_converters()
            .into_iter()
            .fold(self, |builder, (key, converter)| {
                builder.register_ref(key.target, key.source, converter)
            })
    }

    /// Register every converter submitted through `inventory`.
    #[cfg(feature = "inventory")]
    pub fn with_registered(self) -> Self {
        super::collected::registrations().fold(self, |builder, registration| {
            builder.register_ref(
                registration.target,
                registration.source,
                (registration.create)(),
            )
        })
    }

    /// Append a strategy to the end of the fallback chain.
    pub fn fallback<S: FallbackStrategy>(mut self, strategy: S) -> Self {
        self.fallbacks.push(Arc::new(strategy));
        self
    }

    /// Replace the whole fallback chain. Strategies are tried in order.
    pub fn fallback_chain(mut self, chain: Vec<Arc<dyn FallbackStrategy>>) -> Self {
        self.fallbacks = chain;
        self
    }

    /// Build the registry.
    pub fn build(self) -> TypeConverterRegistry {
        tracing::debug!(
            converters = self.statics.len(),
            fallbacks = self.fallbacks.len(),
            config = ?self.config,
            "built type converter registry"
        );
        TypeConverterRegistry {
            catalog: self.catalog,
            config: self.config,
            statics: self.statics,
            dynamic: DashMap::new(),
            fallbacks: self.fallbacks,
        }
    }
}
