//! Converters and the conversion API.
//!
//! A [`Converter`] turns a value of one type into a value of another. The
//! registry stores converters behind [`ConverterRef`] handles so the same
//! instance can be served to many callers and compared by identity.
//!
//! Route stages never talk to a concrete registry. They depend on the
//! [`TypeConverter`] trait, and the composition root decides which registry
//! (and which precedence behaviour) sits behind it.

use crate::{
    error::{ConversionError, ConvertError},
    types::TypeTag,
    value::Value,
};
use std::{fmt, sync::Arc};

/// A unit of conversion behaviour.
///
/// Converters are immutable once constructed. The target type is implied by
/// the key the converter is registered under.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Converter`",
    label = "missing `Converter` implementation",
    note = "Converters must implement `name` and `convert`."
)]
pub trait Converter: Send + Sync + 'static {
    /// Name used in logs and by the observability hook.
    fn name(&self) -> &str;

    /// Convert `value`, or report why it cannot be converted.
    fn convert(&self, value: &Value) -> Result<Value, ConversionError>;
}

/// Shared handle to a registered converter.
#[derive(Clone)]
pub struct ConverterRef(Arc<dyn Converter>);

impl ConverterRef {
    /// Wrap a converter.
    pub fn new<C: Converter>(converter: C) -> Self {
        Self(Arc::new(converter))
    }

    /// The converter's name.
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Apply the converter.
    pub fn convert(&self, value: &Value) -> Result<Value, ConversionError> {
        self.0.convert(value)
    }

    /// Whether both handles point at the same converter instance.
    pub fn same_as(&self, other: &ConverterRef) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl From<Arc<dyn Converter>> for ConverterRef {
    fn from(inner: Arc<dyn Converter>) -> Self {
        Self(inner)
    }
}

impl fmt::Debug for ConverterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConverterRef").field(&self.name()).finish()
    }
}

/// A converter backed by a closure.
pub struct FnConverter<F> {
    name: String,
    f: F,
}

impl<F> FnConverter<F>
where
    F: Fn(&Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
{
    /// Create a named converter from a closure.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Converter for FnConverter<F>
where
    F: Fn(&Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn convert(&self, value: &Value) -> Result<Value, ConversionError> {
        (self.f)(value)
    }
}

/// The conversion API consumed by message-processing stages.
pub trait TypeConverter: Send + Sync {
    /// Find the converter that would serve `source -> target`, without side effects.
    fn lookup(&self, target: TypeTag, source: TypeTag) -> Option<ConverterRef>;

    /// Convert `value` to `target`.
    fn convert(&self, target: TypeTag, value: &Value) -> Result<Value, ConvertError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shout() -> ConverterRef {
        ConverterRef::new(FnConverter::new("shout", |v: &Value| {
            Ok(Value::text(v.to_string().to_uppercase()))
        }))
    }

    #[test]
    fn identity_is_per_instance() {
        let a = shout();
        let b = shout();
        assert!(a.same_as(&a.clone()));
        assert!(!a.same_as(&b));
        assert_eq!(a.name(), b.name());
    }

    #[test]
    fn fn_converter_applies_closure() {
        let out = shout().convert(&Value::text("hi")).unwrap();
        assert_eq!(out, Value::text("HI"));
        assert_eq!(format!("{:?}", shout()), "ConverterRef(\"shout\")");
    }
}
