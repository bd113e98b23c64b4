//! The type converter registry.
//!
//! The registry maps [`TypeKey`]s to converters held in two tables:
//!
//! - the **static table**, filled by [`RegistryBuilder`] at startup and
//!   frozen afterwards;
//! - the **dynamic table**, filled lazily whenever fallback discovery
//!   succeeds and never evicted.
//!
//! # Resolution
//!
//! 1. Exact key in the static table.
//! 2. Exact key in the dynamic table.
//! 3. Ancestor keys, most specific first, in the order chosen by
//!    [`Precedence`].
//! 4. Fallback discovery; the result is cached under the key chosen by
//!    [`CacheKeyPolicy`].
//!
//! A cached converter found at an ancestor level is skipped when a strategy
//! ahead of it in the fallback chain claims the concrete source type.
//!
//! The registry is shared state: every caller holding the same
//! `Arc<TypeConverterRegistry>` sees every other caller's discoveries.

mod builder;
#[cfg(feature = "inventory")]
mod collected;
mod config;

pub use builder::RegistryBuilder;
#[cfg(feature = "inventory")]
pub use collected::ConverterRegistration;
pub use config::{CacheKeyPolicy, Precedence, RegistryConfig};

use crate::fallback::{DiscoveredConverter, FallbackStrategy};
use dashmap::DashMap;
use shunt_core::{
    ConvertError, ConverterRef, TypeCatalog, TypeConverter, TypeKey, TypeTag, Value,
};
use std::{collections::HashMap, sync::Arc};

/// Which table served a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// Registered at startup.
    Static,
    /// Cached by fallback discovery.
    Dynamic,
}

/// How a `(target, source)` request is currently served.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The table holding the converter.
    pub table: Table,
    /// The key the converter is stored under.
    pub key: TypeKey,
    /// The converter itself.
    pub converter: ConverterRef,
}

/// A discovered converter and the chain position of the strategy behind it.
struct Cached {
    converter: ConverterRef,
    rank: usize,
}

/// Process-wide converter registry.
pub struct TypeConverterRegistry {
    catalog: TypeCatalog,
    config: RegistryConfig,
    statics: HashMap<TypeKey, ConverterRef>,
    dynamic: DashMap<TypeKey, Cached>,
    fallbacks: Vec<Arc<dyn FallbackStrategy>>,
}

impl TypeConverterRegistry {
    /// Start composing a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A registry with the built-in converters and the given behaviour.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self::builder().config(config).with_builtins().build()
    }

    /// Report which table and key currently serve `source -> target`.
    ///
    /// This is the observability hook for precedence state. It never
    /// mutates the registry.
    pub fn resolve(&self, target: TypeTag, source: TypeTag) -> Option<Resolution> {
        let exact = TypeKey::new(target, source);
        if let Some(found) = self.find(Table::Static, exact) {
            return Some(found);
        }
        if let Some(found) = self.find(Table::Dynamic, exact) {
            return Some(found);
        }

        let ancestry = self.catalog.ancestry(source);
        let mut ancestors = ancestry
            .iter()
            .filter(|tag| **tag != source)
            .map(|tag| TypeKey::new(target, *tag));

        match self.config.precedence {
            Precedence::StaticFirst => ancestors
                .clone()
                .find_map(|key| self.find(Table::Static, key))
                .or_else(|| ancestors.find_map(|key| self.find_inherited(key, source))),
            Precedence::SpecificityFirst => ancestors.find_map(|key| {
                self.find(Table::Static, key)
                    .or_else(|| self.find_inherited(key, source))
            }),
        }
    }

    /// Snapshot of the dynamic table.
    pub fn dynamic_entries(&self) -> Vec<(TypeKey, ConverterRef)> {
        self.dynamic
            .iter()
            .map(|entry| (*entry.key(), entry.value().converter.clone()))
            .collect()
    }

    /// Number of cached converters.
    pub fn dynamic_len(&self) -> usize {
        self.dynamic.len()
    }

    /// Number of converters registered at startup.
    pub fn static_len(&self) -> usize {
        self.statics.len()
    }

    /// The type catalog used for ancestry.
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// The active behaviour.
    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    fn find(&self, table: Table, key: TypeKey) -> Option<Resolution> {
        let converter = match table {
            Table::Static => self.statics.get(&key).cloned(),
            Table::Dynamic => self
                .dynamic
                .get(&key)
                .map(|entry| entry.value().converter.clone()),
        }?;
        Some(Resolution {
            table,
            key,
            converter,
        })
    }

    /// Dynamic hit at an ancestor level of `source`.
    fn find_inherited(&self, key: TypeKey, source: TypeTag) -> Option<Resolution> {
        let converter = {
            let entry = self.dynamic.get(&key)?;
            if self.preempted(entry.rank, key.target, source) {
                return None;
            }
            entry.converter.clone()
        };
        Some(Resolution {
            table: Table::Dynamic,
            key,
            converter,
        })
    }

    /// Whether a strategy ranked before `rank` claims `source -> target`.
    fn preempted(&self, rank: usize, target: TypeTag, source: TypeTag) -> bool {
        self.fallbacks
            .iter()
            .take(rank)
            .any(|strategy| strategy.scope(target, source, &self.catalog).is_some())
    }

    fn discover(&self, key: TypeKey, value: &Value) -> Result<Value, ConvertError> {
        let mut last_error = None;

        for (rank, strategy) in self.fallbacks.iter().enumerate() {
            let Some(scope) = strategy.scope(key.target, key.source, &self.catalog) else {
                continue;
            };
            match strategy.apply(key.target, value) {
                Ok(converted) => {
                    let cache_key = match self.config.cache_key {
                        CacheKeyPolicy::ConcreteSource => key,
                        CacheKeyPolicy::MatchedAncestor => TypeKey::new(key.target, scope),
                    };
                    // Racing discoveries keep the first converter cached.
                    let cached = self
                        .dynamic
                        .entry(cache_key)
                        .or_insert_with(|| Cached {
                            converter: ConverterRef::new(DiscoveredConverter::new(
                                Arc::clone(strategy),
                                key.target,
                            )),
                            rank,
                        })
                        .value()
                        .converter
                        .clone();
                    tracing::debug!(
                        %key,
                        cache_key = %cache_key,
                        converter = cached.name(),
                        "cached fallback converter"
                    );
                    return Ok(converted);
                }
                Err(err) => {
                    tracing::debug!(
                        %key,
                        strategy = strategy.name(),
                        error = %err,
                        "fallback strategy failed"
                    );
                    last_error = Some(err);
                }
            }
        }

        Err(match last_error {
            Some(source) => ConvertError::Failed { key, source },
            None => ConvertError::NoConverterFound { key },
        })
    }
}

impl Default for TypeConverterRegistry {
    fn default() -> Self {
        Self::with_config(RegistryConfig::default())
    }
}

impl TypeConverter for TypeConverterRegistry {
    fn lookup(&self, target: TypeTag, source: TypeTag) -> Option<ConverterRef> {
        self.resolve(target, source).map(|found| found.converter)
    }

    fn convert(&self, target: TypeTag, value: &Value) -> Result<Value, ConvertError> {
        if value.is_null() && !self.catalog.is_nullable(target) {
            return Err(ConvertError::NullNotAllowed { target });
        }

        let key = TypeKey::new(target, value.type_tag());
        let Some(found) = self.resolve(key.target, key.source) else {
            return self.discover(key, value);
        };

        tracing::trace!(
            %key,
            table = ?found.table,
            matched = %found.key,
            converter = found.converter.name(),
            "resolved converter"
        );
        found
            .converter
            .convert(value)
            .map_err(|source| ConvertError::Failed { key, source })
    }
}
