//! # shunt - Message Body Type Conversion
//!
//! `shunt` converts message bodies between types through a shared
//! [`TypeConverterRegistry`]. Converters registered at startup live in a
//! static table; converters found by fallback discovery are cached in a
//! dynamic table that every route in the process sees.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shunt::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(TypeConverterRegistry::default());
//!
//! let mut routes = Routes::builder();
//! routes.add(
//!     Route::builder("direct:logging")
//!         .hook(LoggingHook::new(registry.clone()).prefix("Logging body: "))
//!         .build(),
//! )?;
//! let routes = routes.build();
//!
//! routes.send_body("direct:logging", Value::array_list([Value::Int(1)])).await?;
//! ```
//!
//! ## Precedence
//!
//! [`RegistryConfig::legacy`] reproduces the behaviour where a converter
//! cached for a list body shadows the built-in container converter.
//! The default, [`RegistryConfig::corrected`], keeps static converters ahead
//! of cached ones at every ancestor level.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use shunt_core::{
    // Types
    Ancestry,
    // Error types
    BoxError,
    CatalogBuilder,
    CatalogError,
    ConversionError,
    ConvertError,
    // Converters
    Converter,
    ConverterRef,
    // Hooks
    DynHook,
    // Exchange
    Exchange,
    FnConverter,
    FnHook,
    Hook,
    HookResult,
    List,
    RESPONSE_CODE,
    Record,
    RouteError,
    ShuntError,
    // Types
    TypeCatalog,
    TypeConverter,
    TypeDecl,
    TypeKey,
    TypeTag,
    // Values
    Value,
};

// Registry
pub use shunt_std::registry::{
    CacheKeyPolicy, Precedence, RegistryBuilder, RegistryConfig, Resolution, Table,
    TypeConverterRegistry,
};

// Routes
pub use shunt_std::route::{Route, RouteBuilder, Routes, RoutesBuilder};

#[cfg(feature = "inventory")]
pub use shunt_std::registry::ConverterRegistration;

/// Fallback discovery strategies.
pub mod fallback {
    pub use shunt_std::fallback::{
        Assignable, DiscoveredConverter, DisplayText, FallbackStrategy, ParseText,
        default_chain,
    };
}

/// Built-in converters.
pub mod builtins {
    pub use shunt_std::builtins::{
        bool_to_text, builtin_converters, contents_to_text, int_to_text,
    };
}

/// Standard hook implementations.
pub mod hooks {
    #![allow(clippy::wildcard_imports)]
    pub use shunt_std::hooks::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use shunt_std::testing::*;
}

/// Prelude module - common imports for Shunt.
///
/// # Usage
///
/// ```rust,ignore
/// use shunt::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        ConvertError,
        // Core traits
        Converter,
        ConverterRef,
        Exchange,
        Hook,
        HookResult,
        // Registry
        RegistryConfig,
        Route,
        RouteError,
        Routes,
        TypeConverter,
        TypeConverterRegistry,
        TypeKey,
        TypeTag,
        Value,
        hooks::{ConvertBodyHook, LoggingHook, SetHeaderHook},
    };
}

#[cfg(feature = "inventory")]
pub use inventory;
