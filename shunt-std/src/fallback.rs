//! Fallback discovery strategies.
//!
//! When no registered converter matches a request, the registry tries a
//! fixed, priority-ordered chain of generic strategies. The first one that
//! produces a value is wrapped in a [`DiscoveredConverter`] and cached.
//!
//! Each strategy reports a *scope*: the broadest source type it generalises
//! over for the requested target. Whether the cache is keyed on the scope or
//! on the concrete source type is decided by
//! [`CacheKeyPolicy`](crate::registry::CacheKeyPolicy).

use shunt_core::{ConversionError, Converter, TypeCatalog, TypeTag, Value};
use std::sync::Arc;

/// A generic conversion strategy tried when lookup misses.
pub trait FallbackStrategy: Send + Sync + 'static {
    /// Name used in logs and in the discovered converter's name.
    fn name(&self) -> &'static str;

    /// The source type this strategy matches on for `target`, or `None` when
    /// it does not apply to `source` at all.
    fn scope(&self, target: TypeTag, source: TypeTag, catalog: &TypeCatalog) -> Option<TypeTag>;

    /// Produce a `target` value from `value`.
    fn apply(&self, target: TypeTag, value: &Value) -> Result<Value, ConversionError>;
}

/// The default chain: [`Assignable`], [`ParseText`], [`DisplayText`].
pub fn default_chain() -> Vec<Arc<dyn FallbackStrategy>> {
    vec![
        Arc::new(Assignable),
        Arc::new(ParseText),
        Arc::new(DisplayText),
    ]
}

/// Values that already are the target type pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assignable;

impl FallbackStrategy for Assignable {
    fn name(&self) -> &'static str {
        "assignable"
    }

    fn scope(&self, target: TypeTag, source: TypeTag, catalog: &TypeCatalog) -> Option<TypeTag> {
        catalog.is_assignable(source, target).then_some(target)
    }

    fn apply(&self, _target: TypeTag, value: &Value) -> Result<Value, ConversionError> {
        Ok(value.clone())
    }
}

/// Parses text into integers and booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseText;

impl FallbackStrategy for ParseText {
    fn name(&self) -> &'static str {
        "parse-text"
    }

    fn scope(&self, target: TypeTag, source: TypeTag, catalog: &TypeCatalog) -> Option<TypeTag> {
        let parsable = target == TypeTag::INT || target == TypeTag::BOOL;
        (parsable && catalog.is_assignable(source, TypeTag::TEXT)).then_some(TypeTag::TEXT)
    }

    fn apply(&self, target: TypeTag, value: &Value) -> Result<Value, ConversionError> {
        let Some(text) = value.as_text() else {
            return Err(ConversionError::Unsupported {
                source_type: value.type_tag(),
            });
        };
        let malformed = |reason: String| ConversionError::Malformed {
            input: text.to_owned(),
            target,
            reason,
        };
        let trimmed = text.trim();
        match target {
            TypeTag::INT => trimmed
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| malformed(e.to_string())),
            TypeTag::BOOL => trimmed
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|e| malformed(e.to_string())),
            _ => Err(malformed(format!("{target} is not parsable"))),
        }
    }
}

/// Converts anything to text through its textual representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayText;

impl FallbackStrategy for DisplayText {
    fn name(&self) -> &'static str {
        "display-text"
    }

    fn scope(&self, target: TypeTag, _source: TypeTag, _catalog: &TypeCatalog) -> Option<TypeTag> {
        (target == TypeTag::TEXT).then_some(TypeTag::OBJECT)
    }

    fn apply(&self, _target: TypeTag, value: &Value) -> Result<Value, ConversionError> {
        Ok(Value::Text(value.to_string()))
    }
}

/// A converter produced by fallback discovery.
pub struct DiscoveredConverter {
    name: String,
    target: TypeTag,
    strategy: Arc<dyn FallbackStrategy>,
}

impl DiscoveredConverter {
    /// Bind `strategy` to `target`.
    pub fn new(strategy: Arc<dyn FallbackStrategy>, target: TypeTag) -> Self {
        Self {
            name: format!("fallback:{}", strategy.name()),
            target,
            strategy,
        }
    }
}

impl Converter for DiscoveredConverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn convert(&self, value: &Value) -> Result<Value, ConversionError> {
        self.strategy.apply(self.target, value)
    }
}
