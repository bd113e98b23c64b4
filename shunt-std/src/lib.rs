//! # shunt-std
//!
//! Standard implementations for the Shunt type conversion framework.
//!
//! This crate provides:
//! - **Registry**: [`TypeConverterRegistry`] with static and dynamic tables
//! - **Fallback discovery**: the [`fallback`] strategy chain
//! - **Built-in converters**: container, integer and boolean to text
//! - **Route hooks**: Logging, body conversion, headers
//! - **Routes**: [`Route`] and [`Routes`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use shunt_core;

// Modules
pub mod builtins;
pub mod fallback;
pub mod hooks;
pub mod registry;
pub mod route;
pub mod testing;

pub use registry::{
    CacheKeyPolicy, Precedence, RegistryBuilder, RegistryConfig, Resolution, Table,
    TypeConverterRegistry,
};
pub use route::{Route, RouteBuilder, Routes, RoutesBuilder};

#[cfg(feature = "inventory")]
pub use inventory;
#[cfg(feature = "inventory")]
pub use registry::ConverterRegistration;
