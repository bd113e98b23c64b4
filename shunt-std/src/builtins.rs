//! Built-in converters registered at startup.
//!
//! There is intentionally no converter from a general list to text: list
//! bodies reach text only through fallback discovery.

use shunt_core::{ConversionError, ConverterRef, FnConverter, TypeKey, TypeTag, Value};

/// Every built-in converter with the key it is registered under.
pub fn builtin_converters() -> Vec<(TypeKey, ConverterRef)> {
    vec![
        (
            TypeKey::new(TypeTag::TEXT, TypeTag::MESSAGE_CONTENTS),
            contents_to_text(),
        ),
        (TypeKey::new(TypeTag::TEXT, TypeTag::INT), int_to_text()),
        (TypeKey::new(TypeTag::TEXT, TypeTag::BOOL), bool_to_text()),
    ]
}

/// Unwraps a framework container to the text of its first element.
///
/// An empty container converts to [`Value::Null`].
pub fn contents_to_text() -> ConverterRef {
    ConverterRef::new(FnConverter::new("contents-to-text", |value: &Value| {
        let Some(list) = value.as_list() else {
            return Err(ConversionError::Unsupported {
                source_type: value.type_tag(),
            });
        };
        Ok(match list.first() {
            None => Value::Null,
            Some(Value::Text(s)) => Value::Text(s.clone()),
            Some(other) => Value::Text(other.to_string()),
        })
    }))
}

/// Formats integers as decimal text.
pub fn int_to_text() -> ConverterRef {
    ConverterRef::new(FnConverter::new("int-to-text", |value: &Value| {
        value
            .as_int()
            .map(|i| Value::Text(i.to_string()))
            .ok_or(ConversionError::Unsupported {
                source_type: value.type_tag(),
            })
    }))
}

/// Formats booleans as `true`/`false`.
pub fn bool_to_text() -> ConverterRef {
    ConverterRef::new(FnConverter::new("bool-to-text", |value: &Value| {
        value
            .as_bool()
            .map(|b| Value::Text(b.to_string()))
            .ok_or(ConversionError::Unsupported {
                source_type: value.type_tag(),
            })
    }))
}
