//! # shunt-core
//!
//! Core types and traits for the Shunt type conversion framework.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! converter plugins that don't need the full `shunt-std` registry.
//!
//! # Building Blocks
//!
//! ## Type identity ([`TypeTag`], [`TypeCatalog`])
//!
//! Message bodies are dynamically typed [`Value`]s. Each value reports a
//! [`TypeTag`], and a [`TypeCatalog`] declares how tags relate: which list
//! type extends which, which capabilities a container has. Converter lookup
//! walks a tag's ancestry from the concrete type to [`TypeTag::OBJECT`].
//!
//! ## Conversion ([`Converter`], [`TypeConverter`])
//!
//! A [`Converter`] handles one `(target, source)` [`TypeKey`]. The
//! [`TypeConverter`] trait is the API route stages call; `shunt-std`
//! provides the registry behind it.
//!
//! ## Routes ([`Exchange`], [`Hook`])
//!
//! An [`Exchange`] carries a body and headers through the [`Hook`]s of a
//! route. Hooks that need typed bodies ask a [`TypeConverter`] for them.
//!
//! # Error Types
//!
//! - [`ShuntError`] - Top-level error type
//! - [`ConvertError`] - Failed conversion requests
//! - [`ConversionError`] - Errors raised inside a converter
//! - [`CatalogError`] - Invalid type declarations
//! - [`RouteError`] - Route execution errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod converter;
mod error;
mod exchange;
mod hook;
mod types;
mod value;

// Re-exports
pub use converter::{Converter, ConverterRef, FnConverter, TypeConverter};
pub use error::{
    BoxError, CatalogError, ConversionError, ConvertError, RouteError, ShuntError,
};
pub use exchange::{Exchange, RESPONSE_CODE};
pub use hook::{DynHook, FnHook, Hook, HookResult};
pub use types::{Ancestry, CatalogBuilder, TypeCatalog, TypeDecl, TypeKey, TypeTag};
pub use value::{List, Record, Value};
