#![allow(dead_code)]

use shunt::{
    RESPONSE_CODE, Record, Route, Routes, TypeConverterRegistry, TypeTag, Value,
    hooks::{ConvertBodyHook, LogSink, LoggingHook, SetHeaderHook},
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Test Bodies
// ============================================================================

pub const FRUIT: TypeTag = TypeTag::new("Fruit");

pub fn fruit(name: &str) -> Value {
    Record::new(FRUIT).with("name", name).into()
}

/// A plain list of records, the body that triggers list-to-text discovery.
pub fn fruit_basket() -> Value {
    Value::array_list([fruit("apples"), fruit("bananas"), fruit("cherries")])
}

/// A framework container holding a single text value.
pub fn hello() -> Value {
    Value::contents_list([Value::text("hello")])
}

// ============================================================================
// Routes
// ============================================================================

pub const LOGGING: &str = "direct:logging";
pub const ECHO: &str = "http:echo";

/// A logging route and an echo route sharing one registry.
pub fn echo_routes(registry: &Arc<TypeConverterRegistry>, sink: &LogSink) -> Routes {
    let mut builder = Routes::builder();
    builder
        .add(
            Route::builder(LOGGING)
                .hook(
                    LoggingHook::new(registry.clone())
                        .prefix("Logging body: ")
                        .sink(sink.clone()),
                )
                .build(),
        )
        .unwrap();
    builder
        .add(
            Route::builder(ECHO)
                .hook(ConvertBodyHook::new(registry.clone(), TypeTag::TEXT))
                .hook(SetHeaderHook::new(RESPONSE_CODE, 200_i64))
                .build(),
        )
        .unwrap();
    builder.build()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shunt_std=debug")),
        )
        .with_test_writer()
        .try_init();
}
