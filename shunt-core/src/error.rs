//! Error types for Shunt.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`ShuntError`] - Top-level error type for all Shunt operations
//! - [`ConvertError`] - Errors returned by a registry conversion request
//! - [`ConversionError`] - Errors raised by an individual converter
//! - [`CatalogError`] - Errors while declaring the type catalog
//! - [`RouteError`] - Errors from route execution

use crate::types::{TypeKey, TypeTag};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Shunt operations.
#[derive(Error, Debug)]
pub enum ShuntError {
    /// A conversion request failed.
    #[error("conversion error: {0}")]
    Convert(#[from] ConvertError),

    /// The type catalog could not be built.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A route failed.
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors surfaced to the caller of a conversion request.
///
/// Conversions are never retried; the first failure is returned as is.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// No registered converter and no fallback strategy applies to the key.
    #[error("no converter found for {key}")]
    NoConverterFound {
        /// The requested conversion.
        key: TypeKey,
    },

    /// The value is null and the target type cannot hold null.
    #[error("cannot convert null to non-nullable type {target}")]
    NullNotAllowed {
        /// The requested target type.
        target: TypeTag,
    },

    /// A matched converter or fallback strategy could not produce a value.
    #[error("conversion {key} failed")]
    Failed {
        /// The requested conversion.
        key: TypeKey,
        /// What the converter reported.
        #[source]
        source: ConversionError,
    },
}

impl ConvertError {
    /// The key of the failed request, if one was resolved.
    pub fn key(&self) -> Option<TypeKey> {
        match self {
            ConvertError::NoConverterFound { key } | ConvertError::Failed { key, .. } => Some(*key),
            ConvertError::NullNotAllowed { .. } => None,
        }
    }
}

/// Errors raised by a single converter or fallback strategy.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The source data is not a valid representation of the target type.
    #[error("cannot convert {input:?} to {target}: {reason}")]
    Malformed {
        /// Textual form of the rejected input.
        input: String,
        /// The requested target type.
        target: TypeTag,
        /// Why the input was rejected.
        reason: String,
    },

    /// The converter was handed a value shape it does not handle.
    #[error("converter does not accept values of type {source_type}")]
    Unsupported {
        /// Runtime type of the rejected value.
        source_type: TypeTag,
    },

    /// A custom converter error.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur while declaring a [`TypeCatalog`](crate::TypeCatalog).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A declaration names a parent that was never declared.
    #[error("type {tag} extends undeclared type {parent}")]
    UnknownParent {
        /// The declaring type.
        tag: TypeTag,
        /// The missing parent.
        parent: TypeTag,
    },

    /// The same type was declared twice.
    #[error("type {0} declared more than once")]
    Duplicate(TypeTag),

    /// The type inherits from itself.
    #[error("inheritance cycle through type {0}")]
    Cycle(TypeTag),
}

/// Errors that can occur while building or running routes.
#[derive(Error, Debug)]
pub enum RouteError {
    /// No route is bound to the endpoint.
    #[error("no route found for endpoint: {0}")]
    NotFound(String),

    /// Two routes were bound to the same endpoint.
    #[error("route already exists for endpoint: {0}")]
    DuplicateRoute(String),

    /// A step of the route failed.
    #[error("route {route} failed at step {step}")]
    Hook {
        /// Endpoint of the failing route.
        route: String,
        /// Zero-based index of the failing hook.
        step: usize,
        /// The hook's error.
        #[source]
        source: BoxError,
    },
}

impl From<BoxError> for ShuntError {
    fn from(err: BoxError) -> Self {
        ShuntError::Custom(err)
    }
}

impl From<BoxError> for ConversionError {
    fn from(err: BoxError) -> Self {
        ConversionError::Custom(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn failed_conversion_exposes_converter_error_as_source() {
        let err = ConvertError::Failed {
            key: TypeKey::new(TypeTag::INT, TypeTag::TEXT),
            source: ConversionError::Malformed {
                input: "abc".into(),
                target: TypeTag::INT,
                reason: "invalid digit".into(),
            },
        };
        assert_eq!(err.to_string(), "conversion Text -> Int failed");
        let source = err.source().map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("cannot convert \"abc\" to Int: invalid digit")
        );
    }

    #[test]
    fn null_error_has_no_key() {
        let err = ConvertError::NullNotAllowed {
            target: TypeTag::BOOL,
        };
        assert!(err.key().is_none());
        assert_eq!(err.to_string(), "cannot convert null to non-nullable type Bool");
    }
}
